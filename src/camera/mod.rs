//! Camera orbit model.
//!
//! Pose, constraint state, the [`OrbitEngine`] capability trait and the
//! default spherical-coordinate engine.

/// Orbit constraints derived from authored options.
pub mod constraints;
/// Default spherical-coordinate orbit engine.
pub mod controller;
/// The orbit math capability trait.
pub mod engine;
/// Camera position + target.
pub mod pose;

pub use constraints::{deg_to_rad, OrbitConstraints};
pub use controller::SphericalOrbit;
pub use engine::OrbitEngine;
pub use pose::CameraPose;
