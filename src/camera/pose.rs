use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Camera world position and the point it orbits around.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraPose {
    /// Camera position in world space.
    pub position: Vec3,
    /// Orbit pivot in world space.
    pub target: Vec3,
}

impl CameraPose {
    /// Build a pose from a position and a target.
    #[must_use]
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Distance between the camera and its target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }
}
