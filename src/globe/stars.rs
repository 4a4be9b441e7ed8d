//! Decorative star field surrounding the globe

use nalgebra::Vector3;
use rand::RngExt;
use std::f64::consts::TAU;

/// Rotation of the whole field about y per frame, radians
pub const STAR_DRIFT_PER_FRAME: f64 = 0.0005;

#[derive(Debug, Clone)]
pub struct StarField {
    positions: Vec<Vector3<f64>>,
    radius: f64,
    rotation_y: f64,
}

impl StarField {
    /// Scatter `count` stars on a spherical shell between `0.6 * radius` and
    /// `2.6 * radius`. Directions are uniform over the sphere.
    pub fn generate<R: RngExt + ?Sized>(rng: &mut R, count: usize, radius: f64) -> Self {
        let positions = (0..count)
            .map(|_| {
                let theta = rng.random_range(0.0..TAU);
                let phi = (2.0 * rng.random_range(0.0..1.0) - 1.0_f64).acos();
                let scale = rng.random_range(0.6..2.6);

                Vector3::new(
                    radius * phi.sin() * theta.cos() * scale,
                    radius * phi.sin() * theta.sin() * scale,
                    radius * phi.cos() * scale,
                )
            })
            .collect();

        Self {
            positions,
            radius,
            rotation_y: 0.0,
        }
    }

    #[must_use]
    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn rotation_y(&self) -> f64 {
        self.rotation_y
    }

    pub fn advance_frame(&mut self) {
        self.rotation_y += STAR_DRIFT_PER_FRAME;
    }
}
