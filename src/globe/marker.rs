//! Destination marker: a cone with a ball on top, standing on the globe surface

use nalgebra::{UnitQuaternion, Vector3};
use std::f64::consts::PI;

use crate::models::{Coordinate, HighlightedLocation};

/// Height of the marker cone
pub const CONE_HEIGHT: f64 = 0.2;
/// Base radius of the marker cone
pub const CONE_RADIUS: f64 = 0.04;
/// Radius of the ball at the marker tip
pub const HEAD_RADIUS: f64 = 0.05;
/// Gap between the globe surface and the marker
pub const SURFACE_OFFSET: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub location: HighlightedLocation,
    /// Position in the globe's local frame
    pub position: Vector3<f64>,
    /// Rotates the cone's local down axis onto the outward surface normal
    pub orientation: UnitQuaternion<f64>,
    radius: f64,
}

/// Spherical to Cartesian projection in the globe's local frame.
///
/// Polar angle `phi = 90 - latitude`, azimuth `theta = longitude + 90`, so
/// (0, 0) faces +z at zero rotation. The cone is lowered by `height / 50`
/// so its base sits flush.
#[must_use]
pub fn project(coordinate: Coordinate, radius: f64) -> Vector3<f64> {
    let phi = (90.0 - coordinate.latitude).to_radians();
    let theta = (coordinate.longitude + 90.0).to_radians();

    Vector3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos() - CONE_HEIGHT / 50.0,
        radius * phi.sin() * theta.sin(),
    )
}

fn outward_orientation(position: &Vector3<f64>) -> UnitQuaternion<f64> {
    let down = Vector3::new(0.0, -1.0, 0.0);
    let outward = position.normalize();
    // rotation_between is undefined for opposite vectors (north pole)
    UnitQuaternion::rotation_between(&down, &outward)
        .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI))
}

impl Marker {
    /// Build a marker for `location` on a globe of `earth_radius`
    #[must_use]
    pub fn place(location: HighlightedLocation, earth_radius: f64) -> Self {
        let radius = earth_radius + SURFACE_OFFSET;
        let position = project(location.coordinate, radius);
        let orientation = outward_orientation(&position);
        Self {
            location,
            position,
            orientation,
            radius,
        }
    }

    /// Distance from the globe centre the marker was projected at
    #[must_use]
    pub fn surface_radius(&self) -> f64 {
        self.radius
    }

    /// Position of the ball at the marker tip, in the globe's local frame
    #[must_use]
    pub fn head_position(&self) -> Vector3<f64> {
        let offset = Vector3::new(0.0, -CONE_HEIGHT / 1.2, 0.0);
        self.position + self.orientation * offset
    }
}
