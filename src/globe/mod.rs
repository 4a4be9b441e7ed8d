//! Globe scene model
//!
//! The globe is a textured sphere spinning about its y axis at an externally
//! supplied angular speed, carrying at most one destination marker. A front
//! end draws whatever state this module holds; nothing here talks to a GPU.

pub mod marker;
pub mod scene;
pub mod stars;

use nalgebra::Vector3;

use crate::models::HighlightedLocation;
pub use marker::Marker;
pub use scene::{Scene, SceneHandle, spawn_render_loop};
pub use stars::StarField;

/// Rotation applied per frame for each unit of angular speed
pub const ROTATION_PER_SPEED: f64 = 0.01;

/// Euler rotation of the globe mesh, radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeTransform {
    pub rotation: Vector3<f64>,
}

impl Default for GlobeTransform {
    fn default() -> Self {
        Self {
            rotation: Vector3::zeros(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Globe {
    radius: f64,
    speed: f64,
    transform: GlobeTransform,
    marker: Option<Marker>,
}

impl Globe {
    #[must_use]
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            speed: 0.0,
            transform: GlobeTransform::default(),
            marker: None,
        }
    }

    /// Radius used for a viewport of the given width: `min(width / 300, max)`
    #[must_use]
    pub fn responsive_radius(viewport_width: f64, max_radius: f64) -> f64 {
        (viewport_width / 300.0).min(max_radius)
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Resize the sphere. An existing marker is re-projected onto the new surface.
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
        if let Some(marker) = self.marker.take() {
            self.marker = Some(Marker::place(marker.location, radius));
        }
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    #[must_use]
    pub fn transform(&self) -> &GlobeTransform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut GlobeTransform {
        &mut self.transform
    }

    #[must_use]
    pub fn rotation_y(&self) -> f64 {
        self.transform.rotation.y
    }

    pub fn set_rotation_y(&mut self, radians: f64) {
        self.transform.rotation.y = radians;
    }

    pub fn rotate_y(&mut self, radians: f64) {
        self.transform.rotation.y += radians;
    }

    /// Advance one frame. `clock_secs` is the scene clock, which drives the
    /// slight wobble about the x axis.
    pub fn advance_frame(&mut self, clock_secs: f64) {
        self.transform.rotation.y += self.speed * ROTATION_PER_SPEED;
        self.transform.rotation.x += (clock_secs * self.speed * 0.5).sin() * 0.0001;
    }

    /// Place a marker at `location`, replacing any previous one. `None` clears the marker.
    pub fn highlight(&mut self, location: Option<&HighlightedLocation>) {
        self.marker = location.map(|location| Marker::place(location.clone(), self.radius));
    }

    #[must_use]
    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }
}
