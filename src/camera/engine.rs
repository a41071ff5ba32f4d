use glam::{Vec2, Vec3};

use super::{CameraPose, OrbitConstraints};

/// Orbit math capability driven by an [`OrbitControl`](crate::OrbitControl).
///
/// An engine owns the camera pose and the constraint set. Input deltas are
/// accumulated through [`rotate`](Self::rotate), [`pan`](Self::pan) and
/// [`zoom`](Self::zoom); [`update`](Self::update) integrates damping and
/// auto-rotation. Every input method is gated by the engine's own enable
/// flags, so callers may forward input unconditionally.
///
/// One engine belongs to exactly one control for its whole life and is
/// disposed exactly once. The control drops it right after
/// [`dispose`](Self::dispose), so no method is called afterwards.
pub trait OrbitEngine {
    /// Current camera position and target.
    fn pose(&self) -> CameraPose;

    /// Hard-set the camera position (no transition).
    fn set_position(&mut self, position: Vec3);

    /// Hard-set the orbit target (no transition).
    fn set_target(&mut self, target: Vec3);

    /// Active constraint set.
    fn constraints(&self) -> &OrbitConstraints;

    /// Replace the constraint set in place.
    fn set_constraints(&mut self, constraints: OrbitConstraints);

    /// Accumulate a rotation from a pointer delta in pixels.
    fn rotate(&mut self, delta: Vec2);

    /// Accumulate a pan from a pointer delta in pixels.
    fn pan(&mut self, delta: Vec2);

    /// Accumulate a dolly step. Positive values zoom in.
    fn zoom(&mut self, delta: f32);

    /// Integrate one step of damping / auto-rotation. Returns `true` if the
    /// camera moved.
    fn update(&mut self) -> bool;

    /// Release any resources held by the engine.
    fn dispose(&mut self);

    /// Master enable flag.
    fn is_enabled(&self) -> bool {
        self.constraints().enabled
    }
}
