//! Pushes authored options into an engine and the host camera.

use glam::Vec3;

use super::host::OrbitHost;
use crate::camera::{OrbitConstraints, OrbitEngine};
use crate::options::OrbitOptions;

/// Which lifecycle step is binding options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindPhase {
    /// First bind after the engine is created.
    Attach,
    /// Options changed on a live control.
    Update,
}

/// Apply `options` to `engine` and mirror the camera into `host`.
///
/// On attach the camera position and target are hard-set before the
/// constraints are registered. Both phases then assign the target with the
/// rest of the constraint fields and re-apply the authored camera position
/// to the engine and the host transform.
pub fn configure<E: OrbitEngine, H: OrbitHost>(
    options: &OrbitOptions,
    engine: &mut E,
    host: &mut H,
    phase: BindPhase,
) {
    let camera_position = Vec3::from_array(options.camera_position);
    let target = Vec3::from_array(options.target_position);

    if phase == BindPhase::Attach {
        engine.set_position(camera_position);
        engine.set_target(target);
        host.sync_camera(&engine.pose());
    }

    engine.set_constraints(OrbitConstraints::from_options(options));
    engine.set_target(target);
    engine.set_position(camera_position);
    host.sync_camera(&engine.pose());

    log::debug!(
        "orbit options bound ({phase:?}): camera {camera_position}, \
         target {target}"
    );
}
