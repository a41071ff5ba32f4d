use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use super::{CameraPose, OrbitConstraints, OrbitEngine};

/// Keeps the polar angle off the poles so the view basis stays defined.
const POLE_EPSILON: f32 = 1e-6;
/// Minimum squared displacement reported as movement by `update`.
const MOVE_EPSILON: f32 = 1e-6;
/// Residual deltas below this (squared) are treated as settled.
const REST_EPSILON: f32 = 1e-12;

/// Radius / azimuth / polar decomposition of a camera offset.
///
/// Azimuth (`theta`) is measured around +Y from +Z; polar (`phi`) is
/// measured down from +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius: 0.0,
                theta: 0.0,
                phi: 0.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let ring = self.phi.sin() * self.radius;
        Vec3::new(
            ring * self.theta.sin(),
            self.phi.cos() * self.radius,
            ring * self.theta.cos(),
        )
    }
}

/// Wrap an angle into `[-PI, PI)`.
fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Keep `theta` between the azimuth bounds.
///
/// With both bounds finite they are wrapped first, so a range such as
/// 170°..190° straddles the ±180° seam instead of snapping across it. A
/// single infinite bound leaves the other as a plain one-sided limit.
fn limit_azimuth(theta: f32, min: f32, max: f32) -> f32 {
    if !(min.is_finite() && max.is_finite()) {
        return theta.max(min).min(max);
    }
    let (min, max) = (wrap_angle(min), wrap_angle(max));
    let theta = wrap_angle(theta);
    if min <= max {
        theta.max(min).min(max)
    } else if theta > (min + max) / 2.0 {
        theta.max(min)
    } else {
        theta.min(max)
    }
}

/// Default [`OrbitEngine`]: spherical-coordinate orbit around a target.
///
/// Input is accumulated into rotation / pan / dolly deltas. With damping
/// enabled the deltas are consumed a `damping_factor` fraction per
/// [`update`](OrbitEngine::update); without damping every input is applied
/// immediately.
pub struct SphericalOrbit {
    position: Vec3,
    target: Vec3,
    constraints: OrbitConstraints,
    viewport: Vec2,
    fov_y: f32,
    rotate_delta: Vec2,
    pan_offset: Vec3,
    scale: f32,
    disposed: bool,
}

impl Default for SphericalOrbit {
    fn default() -> Self {
        Self::new(CameraPose::new(Vec3::Z, Vec3::ZERO))
    }
}

impl SphericalOrbit {
    /// Create an engine at the given pose with default constraints.
    #[must_use]
    pub fn new(pose: CameraPose) -> Self {
        Self {
            position: pose.position,
            target: pose.target,
            constraints: OrbitConstraints::default(),
            viewport: Vec2::new(800.0, 600.0),
            fov_y: 80.0_f32.to_radians(),
            rotate_delta: Vec2::ZERO,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
            disposed: false,
        }
    }

    /// Update the render surface size used to scale pixel deltas.
    #[allow(clippy::cast_precision_loss)]
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width.max(1) as f32, height.max(1) as f32);
    }

    /// Whether [`OrbitEngine::dispose`] has been called.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn accepts_input(&self, flag: bool) -> bool {
        !self.disposed && self.constraints.enabled && flag
    }

    /// Damped input waits for the next frame; undamped input applies now.
    fn apply_if_undamped(&mut self) {
        if !self.constraints.enable_damping {
            let _moved = self.update();
        }
    }

    /// Rotation per update from auto-rotate: one turn per 60 s at speed 1
    /// and 60 updates per second.
    fn auto_rotation_angle(&self) -> f32 {
        TAU / 60.0 / 60.0 * self.constraints.auto_rotate_speed
    }

    /// No pending input; the pose is left bit-for-bit untouched.
    fn is_at_rest(&self) -> bool {
        !self.constraints.auto_rotate
            && self.scale == 1.0
            && self.rotate_delta.length_squared() < REST_EPSILON
            && self.pan_offset.length_squared() < REST_EPSILON
    }

    fn zoom_scale(&self) -> f32 {
        0.95_f32.powf(self.constraints.zoom_speed)
    }

    /// World-space basis `(right, up)` for panning.
    fn pan_basis(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.position).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = if self.constraints.screen_space_panning {
            right.cross(forward)
        } else {
            Vec3::Y.cross(right)
        };
        (right, up)
    }
}

impl OrbitEngine for SphericalOrbit {
    fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.target)
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    fn constraints(&self) -> &OrbitConstraints {
        &self.constraints
    }

    fn set_constraints(&mut self, constraints: OrbitConstraints) {
        self.constraints = constraints;
    }

    fn rotate(&mut self, delta: Vec2) {
        if !self.accepts_input(self.constraints.enable_rotate) {
            return;
        }
        let per_pixel = TAU / self.viewport.y * self.constraints.rotate_speed;
        self.rotate_delta -= delta * per_pixel;
        self.apply_if_undamped();
    }

    fn pan(&mut self, delta: Vec2) {
        if !self.accepts_input(self.constraints.enable_pan) {
            return;
        }
        // Scale so the point under the cursor at the target depth tracks it.
        let target_distance =
            (self.position - self.target).length() * (self.fov_y / 2.0).tan();
        let per_pixel = 2.0 * target_distance / self.viewport.y
            * self.constraints.pan_speed;
        let (right, up) = self.pan_basis();
        let scaled = delta * per_pixel;
        self.pan_offset += up * scaled.y - right * scaled.x;
        self.apply_if_undamped();
    }

    fn zoom(&mut self, delta: f32) {
        if !self.accepts_input(self.constraints.enable_zoom) || delta == 0.0 {
            return;
        }
        if delta > 0.0 {
            self.scale *= self.zoom_scale();
        } else {
            self.scale /= self.zoom_scale();
        }
        self.apply_if_undamped();
    }

    fn update(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        if self.is_at_rest() {
            self.rotate_delta = Vec2::ZERO;
            self.pan_offset = Vec3::ZERO;
            return false;
        }
        let c = &self.constraints;
        let mut spherical = Spherical::from_offset(self.position - self.target);

        if c.auto_rotate {
            spherical.theta -= self.auto_rotation_angle();
        }

        let step = if c.enable_damping { c.damping_factor } else { 1.0 };
        spherical.theta += self.rotate_delta.x * step;
        spherical.phi += self.rotate_delta.y * step;

        spherical.theta = limit_azimuth(
            spherical.theta,
            c.min_azimuth_angle,
            c.max_azimuth_angle,
        );
        // max/min rather than clamp: bounds may be infinite or inverted.
        spherical.phi = spherical
            .phi
            .max(c.min_polar_angle)
            .min(c.max_polar_angle)
            .max(POLE_EPSILON)
            .min(PI - POLE_EPSILON);
        spherical.radius = (spherical.radius * self.scale)
            .max(c.min_distance)
            .min(c.max_distance);

        self.target += self.pan_offset * step;
        let previous = self.position;
        self.position = self.target + spherical.to_offset();

        if c.enable_damping {
            let decay = 1.0 - c.damping_factor;
            self.rotate_delta *= decay;
            self.pan_offset *= decay;
        } else {
            self.rotate_delta = Vec2::ZERO;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        previous.distance_squared(self.position) > MOVE_EPSILON
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.rotate_delta = Vec2::ZERO;
        self.pan_offset = Vec3::ZERO;
        self.scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OrbitOptions;

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-4
    }

    fn undamped(pose: CameraPose) -> SphericalOrbit {
        let mut orbit = SphericalOrbit::new(pose);
        orbit.set_constraints(OrbitConstraints::from_options(&OrbitOptions {
            enable_damping: false,
            ..OrbitOptions::default()
        }));
        orbit
    }

    fn start() -> CameraPose {
        CameraPose::new(Vec3::new(0.0, 1.0, 5.0), Vec3::ZERO)
    }

    #[test]
    fn spherical_round_trips_offsets() {
        let offset = Vec3::new(1.0, 2.0, 3.0);
        assert!(approx(Spherical::from_offset(offset).to_offset(), offset));
    }

    #[test]
    fn update_without_input_keeps_pose_exactly() {
        let mut orbit = SphericalOrbit::new(start());
        assert!(!orbit.update());
        assert_eq!(orbit.pose(), start());
    }

    #[test]
    fn undamped_rotation_applies_immediately_and_keeps_distance() {
        let mut orbit = undamped(start());
        orbit.rotate(Vec2::new(120.0, 0.0));
        let pose = orbit.pose();
        assert!(!approx(pose.position, start().position));
        assert!((pose.distance() - start().distance()).abs() < 1e-4);
    }

    #[test]
    fn damped_rotation_waits_for_update_and_settles() {
        let mut orbit = SphericalOrbit::new(start());
        orbit.rotate(Vec2::new(120.0, 0.0));
        assert!(approx(orbit.pose().position, start().position));

        assert!(orbit.update());
        let first = orbit.pose().position;
        for _ in 0..500 {
            let _ = orbit.update();
        }
        let settled = orbit.pose().position;
        assert!(!approx(first, settled));
        assert!(!orbit.update());
    }

    #[test]
    fn zoom_in_shrinks_distance_within_limits() {
        let mut orbit = undamped(start());
        let before = orbit.pose().distance();
        orbit.zoom(1.0);
        let after = orbit.pose().distance();
        assert!((after - before * 0.95_f32.powf(0.5)).abs() < 1e-4);

        for _ in 0..1000 {
            orbit.zoom(1.0);
        }
        assert!((orbit.pose().distance() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn zoom_out_is_capped_by_max_distance() {
        let mut orbit = undamped(start());
        for _ in 0..5000 {
            orbit.zoom(-1.0);
        }
        assert!((orbit.pose().distance() - 1000.0).abs() < 1e-1);
    }

    #[test]
    fn pan_moves_target_and_camera_together() {
        let mut orbit = undamped(start());
        orbit.pan(Vec2::new(40.0, 0.0));
        let pose = orbit.pose();
        assert!(pose.target.length() > 0.0);
        assert!((pose.distance() - start().distance()).abs() < 1e-3);
        assert!(approx(pose.position - pose.target, start().position));
    }

    #[test]
    fn ground_plane_pan_keeps_target_height() {
        let mut orbit = undamped(start());
        orbit.pan(Vec2::new(0.0, 40.0));
        assert!(orbit.pose().target.y.abs() < 1e-5);
    }

    #[test]
    fn disabled_flags_gate_input() {
        let mut orbit = SphericalOrbit::new(start());
        orbit.set_constraints(OrbitConstraints::from_options(&OrbitOptions {
            enable_damping: false,
            enable_zoom: false,
            ..OrbitOptions::default()
        }));
        orbit.zoom(1.0);
        assert!(approx(orbit.pose().position, start().position));

        let mut constraints = orbit.constraints().clone();
        constraints.enabled = false;
        orbit.set_constraints(constraints);
        orbit.rotate(Vec2::new(100.0, 100.0));
        orbit.pan(Vec2::new(100.0, 100.0));
        assert!(approx(orbit.pose().position, start().position));
    }

    #[test]
    fn azimuth_bounds_pin_horizontal_swing() {
        let mut orbit = SphericalOrbit::new(CameraPose::new(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
        ));
        orbit.set_constraints(OrbitConstraints::from_options(&OrbitOptions {
            enable_damping: false,
            min_azimuth_angle: Some(0.0),
            max_azimuth_angle: Some(0.0),
            ..OrbitOptions::default()
        }));
        orbit.rotate(Vec2::new(300.0, 0.0));
        assert!(orbit.pose().position.x.abs() < 1e-4);
    }

    #[test]
    fn azimuth_range_across_the_seam_is_continuous() {
        let theta = 175.0_f32.to_radians();
        let mut orbit = SphericalOrbit::new(CameraPose::new(
            Vec3::new(5.0 * theta.sin(), 0.0, 5.0 * theta.cos()),
            Vec3::ZERO,
        ));
        orbit.set_constraints(OrbitConstraints::from_options(&OrbitOptions {
            enable_damping: false,
            min_azimuth_angle: Some(170.0),
            max_azimuth_angle: Some(190.0),
            ..OrbitOptions::default()
        }));

        // About +10 degrees: crosses 180 and stays inside the range.
        orbit.rotate(Vec2::new(-340.0, 0.0));
        let swung = Spherical::from_offset(orbit.pose().position);
        assert!(swung.theta < -3.0, "snapped back to {}", swung.theta);

        // Far past the upper bound: pinned at 190 (= -170) degrees.
        orbit.rotate(Vec2::new(-2000.0, 0.0));
        let pinned = Spherical::from_offset(orbit.pose().position);
        assert!((pinned.theta - (-170.0_f32).to_radians()).abs() < 1e-3);
    }

    #[test]
    fn wrapped_limits_match_plain_ranges() {
        let close = |a: f32, b: f32| (a - b).abs() < 1e-6;
        let (min, max) = (-0.5, 0.5);
        assert!(close(limit_azimuth(0.2, min, max), 0.2));
        assert!(close(limit_azimuth(1.0, min, max), 0.5));
        assert!(close(limit_azimuth(-1.0, min, max), -0.5));
        assert_eq!(limit_azimuth(9.0, f32::NEG_INFINITY, 1.0), 1.0);
    }

    #[test]
    fn polar_bounds_stop_tilt() {
        let mut orbit = undamped(start());
        orbit.rotate(Vec2::new(0.0, 5000.0));
        // Pinned at the pole, not flipped over it.
        let spherical = Spherical::from_offset(orbit.pose().position);
        assert!(spherical.phi < 1e-2);
        assert!((orbit.pose().distance() - start().distance()).abs() < 1e-3);

        orbit.rotate(Vec2::new(0.0, -5000.0));
        let spherical = Spherical::from_offset(orbit.pose().position);
        assert!((spherical.phi - 120.0_f32.to_radians()).abs() < 1e-3);
    }

    #[test]
    fn auto_rotate_advances_azimuth_per_update() {
        let mut orbit = SphericalOrbit::new(CameraPose::new(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
        ));
        orbit.set_constraints(OrbitConstraints::from_options(&OrbitOptions {
            auto_rotate: true,
            ..OrbitOptions::default()
        }));
        assert!(orbit.update());
        let theta = Spherical::from_offset(orbit.pose().position).theta;
        assert!((theta + TAU / 3600.0 * 2.0).abs() < 1e-5);
    }

    #[test]
    fn disposed_engine_ignores_input() {
        let mut orbit = undamped(start());
        orbit.dispose();
        assert!(orbit.is_disposed());
        orbit.rotate(Vec2::new(100.0, 0.0));
        assert!(!orbit.update());
        assert!(approx(orbit.pose().position, start().position));
    }
}
