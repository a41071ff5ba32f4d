//! Recording doubles for the engine and host seams.

use glam::{Vec2, Vec3};

use crate::camera::{CameraPose, OrbitConstraints, OrbitEngine};
use crate::control::{OrbitHost, OrbitUpdated};
use crate::input::Affordance;

/// Engine that records every call and moves nothing.
#[derive(Debug, Default)]
pub(crate) struct RecordingEngine {
    pub pose: CameraPose,
    pub constraints: OrbitConstraints,
    pub rotations: Vec<Vec2>,
    pub pans: Vec<Vec2>,
    pub zooms: Vec<f32>,
    pub updates: usize,
}

impl RecordingEngine {
    /// Input and integration calls received.
    pub fn calls(&self) -> usize {
        self.rotations.len() + self.pans.len() + self.zooms.len() + self.updates
    }
}

impl OrbitEngine for RecordingEngine {
    fn pose(&self) -> CameraPose {
        self.pose
    }

    fn set_position(&mut self, position: Vec3) {
        self.pose.position = position;
    }

    fn set_target(&mut self, target: Vec3) {
        self.pose.target = target;
    }

    fn constraints(&self) -> &OrbitConstraints {
        &self.constraints
    }

    fn set_constraints(&mut self, constraints: OrbitConstraints) {
        self.constraints = constraints;
    }

    fn rotate(&mut self, delta: Vec2) {
        self.rotations.push(delta);
    }

    fn pan(&mut self, delta: Vec2) {
        self.pans.push(delta);
    }

    fn zoom(&mut self, delta: f32) {
        self.zooms.push(delta);
    }

    fn update(&mut self) -> bool {
        self.updates += 1;
        true
    }

    fn dispose(&mut self) {}
}

/// Host that records camera syncs, cursor changes and emitted events.
#[derive(Debug)]
pub(crate) struct RecordingHost {
    pub camera: bool,
    pub synced: Vec<CameraPose>,
    pub affordances: Vec<Affordance>,
    pub events: Vec<OrbitUpdated>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            camera: true,
            synced: Vec::new(),
            affordances: Vec::new(),
            events: Vec::new(),
        }
    }
}

impl OrbitHost for RecordingHost {
    fn has_camera(&self) -> bool {
        self.camera
    }

    fn sync_camera(&mut self, pose: &CameraPose) {
        self.synced.push(*pose);
    }

    fn set_affordance(&mut self, affordance: Affordance) {
        self.affordances.push(affordance);
    }

    fn emit(&mut self, event: &OrbitUpdated) {
        self.events.push(*event);
    }
}
