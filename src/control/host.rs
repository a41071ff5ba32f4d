use serde::{Deserialize, Serialize};

use crate::camera::CameraPose;
use crate::input::Affordance;

/// Name of the event raised when the camera pose should be persisted.
pub const CAMERA_ORBIT_UPDATED: &str = "camera-orbit-updated";

/// Payload of [`CAMERA_ORBIT_UPDATED`]:
/// `{ "cameraPose": { "position": [..], "target": [..] } }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitUpdated {
    /// Camera pose at the time of emission.
    pub camera_pose: CameraPose,
}

impl OrbitUpdated {
    /// Event name on the host bus.
    pub const NAME: &'static str = CAMERA_ORBIT_UPDATED;
    /// The event does not bubble past the scene.
    pub const BUBBLES: bool = false;

    /// Wrap a pose.
    #[must_use]
    pub fn new(camera_pose: CameraPose) -> Self {
        Self { camera_pose }
    }

    /// JSON detail string, as dispatched on DOM event buses.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// The scene runtime an [`OrbitControl`](crate::OrbitControl) is attached
/// to. Owns the render loop, the render surface and the camera transform.
pub trait OrbitHost {
    /// Whether a camera is attached to the controlled entity.
    fn has_camera(&self) -> bool;

    /// Mirror the engine pose into the host camera transform.
    fn sync_camera(&mut self, pose: &CameraPose);

    /// Show the given cursor affordance over the render surface.
    fn set_affordance(&mut self, affordance: Affordance);

    /// Raise [`CAMERA_ORBIT_UPDATED`] on the host event bus.
    fn emit(&mut self, event: &OrbitUpdated);
}
