use std::f32::consts::PI;

use crate::options::OrbitOptions;

/// Convert authored degrees to radians. Infinite bounds map to themselves
/// so "unbounded" survives the conversion exactly.
#[must_use]
pub fn deg_to_rad(degrees: f32) -> f32 {
    if degrees.is_infinite() {
        degrees
    } else {
        degrees * PI / 180.0
    }
}

/// Constraint state consumed by an [`OrbitEngine`](super::OrbitEngine).
///
/// Derived from [`OrbitOptions`] with every angle converted to radians.
/// Paired bounds are expected to satisfy `min <= max`; inverted pairs are
/// logged but passed through untouched.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::struct_excessive_bools)]
pub struct OrbitConstraints {
    /// Master switch for all interaction.
    pub enabled: bool,
    /// Allow rotating.
    pub enable_rotate: bool,
    /// Allow panning.
    pub enable_pan: bool,
    /// Allow zooming.
    pub enable_zoom: bool,
    /// Allow keyboard panning.
    pub enable_keys: bool,
    /// Smooth residual motion over several updates.
    pub enable_damping: bool,
    /// Fraction of residual motion applied per update.
    pub damping_factor: f32,
    /// Closest dolly distance.
    pub min_distance: f32,
    /// Farthest dolly distance.
    pub max_distance: f32,
    /// Polar lower bound (radians from +Y).
    pub min_polar_angle: f32,
    /// Polar upper bound (radians from +Y).
    pub max_polar_angle: f32,
    /// Azimuth lower bound (radians).
    pub min_azimuth_angle: f32,
    /// Azimuth upper bound (radians).
    pub max_azimuth_angle: f32,
    /// Rotation sensitivity.
    pub rotate_speed: f32,
    /// Pan sensitivity.
    pub pan_speed: f32,
    /// Zoom sensitivity.
    pub zoom_speed: f32,
    /// Pixels per key press when keyboard panning.
    pub key_pan_speed: f32,
    /// Spin around the target without input.
    pub auto_rotate: bool,
    /// Auto-rotation speed.
    pub auto_rotate_speed: f32,
    /// Pan in screen space instead of along the ground plane.
    pub screen_space_panning: bool,
    /// Minimum orthographic zoom.
    pub min_zoom: f32,
}

impl OrbitConstraints {
    /// Derive constraints from authored options.
    #[must_use]
    pub fn from_options(opts: &OrbitOptions) -> Self {
        let constraints = Self {
            enabled: opts.enabled,
            enable_rotate: opts.enable_rotate,
            enable_pan: opts.enable_pan,
            enable_zoom: opts.enable_zoom,
            enable_keys: opts.enable_keys,
            enable_damping: opts.enable_damping,
            damping_factor: opts.damping_factor,
            min_distance: opts.min_distance,
            max_distance: opts.max_distance,
            min_polar_angle: deg_to_rad(opts.min_polar_angle),
            max_polar_angle: deg_to_rad(opts.max_polar_angle),
            min_azimuth_angle: opts
                .min_azimuth_angle
                .map_or(f32::NEG_INFINITY, deg_to_rad),
            max_azimuth_angle: opts
                .max_azimuth_angle
                .map_or(f32::INFINITY, deg_to_rad),
            rotate_speed: opts.rotate_speed,
            pan_speed: opts.pan_speed,
            zoom_speed: opts.zoom_speed,
            key_pan_speed: opts.key_pan_speed,
            auto_rotate: opts.auto_rotate,
            auto_rotate_speed: opts.auto_rotate_speed,
            screen_space_panning: opts.screen_space_panning,
            min_zoom: opts.min_zoom,
        };
        constraints.warn_inverted_bounds();
        constraints
    }

    /// Whether per-frame integration has anything to do.
    #[must_use]
    pub fn needs_integration(&self) -> bool {
        self.enabled && (self.enable_damping || self.auto_rotate)
    }

    fn warn_inverted_bounds(&self) {
        let pairs = [
            ("distance", self.min_distance, self.max_distance),
            ("polar angle", self.min_polar_angle, self.max_polar_angle),
            (
                "azimuth angle",
                self.min_azimuth_angle,
                self.max_azimuth_angle,
            ),
        ];
        for (name, min, max) in pairs {
            if min > max {
                log::warn!("inverted {name} bounds: min {min} > max {max}");
            }
        }
    }
}

impl Default for OrbitConstraints {
    fn default() -> Self {
        Self::from_options(&OrbitOptions::default())
    }
}
