use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Class of device the control runs on. Mobile-class devices get a
/// tighter default polar limit so the camera cannot dip below the horizon.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    /// Desktop or laptop with a mouse.
    #[default]
    Desktop,
    /// Phone or tablet.
    Mobile,
}

impl DeviceClass {
    /// Classify a browser user-agent string.
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Self {
        const MOBILE_MARKERS: [&str; 6] =
            ["Android", "iPhone", "iPad", "iPod", "Mobile", "IEMobile"];
        if MOBILE_MARKERS.iter().any(|m| user_agent.contains(m)) {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    /// Default `maxPolarAngle` in degrees for this device class.
    #[must_use]
    pub fn default_max_polar_angle(self) -> f32 {
        match self {
            Self::Desktop => 120.0,
            Self::Mobile => 90.0,
        }
    }
}

/// Declarative orbit-control options, as authored by the host.
///
/// Angles are in degrees; [`OrbitConstraints`](crate::camera::OrbitConstraints)
/// holds the derived radian values. Keys use the authored camelCase names so
/// presets written for the scene markup load unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Orbit Controls", inline)]
#[serde(default, rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct OrbitOptions {
    /// Spin the camera around the target without input.
    #[schemars(title = "Auto Rotate")]
    pub auto_rotate: bool,
    /// Auto-rotation speed; 2.0 is one turn per 30 s at 60 fps.
    #[schemars(
        title = "Auto Rotate Speed",
        range(min = -20.0, max = 20.0),
        extend("step" = 0.5)
    )]
    pub auto_rotate_speed: f32,
    /// Initial / authored camera position.
    #[schemars(title = "Camera Position")]
    pub camera_position: [f32; 3],
    /// Fraction of residual motion applied per update when damping.
    #[schemars(
        title = "Damping Factor",
        range(min = 0.01, max = 1.0),
        extend("step" = 0.01)
    )]
    pub damping_factor: f32,
    /// Master switch for all interaction.
    pub enabled: bool,
    /// Smooth residual motion over several frames.
    #[schemars(title = "Enable Damping")]
    pub enable_damping: bool,
    /// Keyboard panning flag, forwarded to the engine.
    #[schemars(skip)]
    pub enable_keys: bool,
    /// Allow panning.
    #[schemars(title = "Enable Pan")]
    pub enable_pan: bool,
    /// Allow rotating.
    #[schemars(title = "Enable Rotate")]
    pub enable_rotate: bool,
    /// Allow zooming.
    #[schemars(title = "Enable Zoom")]
    pub enable_zoom: bool,
    /// Pixels moved per key press when keyboard panning.
    #[schemars(skip)]
    pub key_pan_speed: f32,
    /// Upper horizontal swing limit in degrees; `None` is unbounded.
    #[schemars(title = "Max Azimuth Angle")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_azimuth_angle: Option<f32>,
    /// Farthest the camera may dolly out.
    #[schemars(title = "Max Distance", range(min = 1.0, max = 10000.0))]
    pub max_distance: f32,
    /// Lowest the camera may tilt, in degrees from straight up.
    #[schemars(
        title = "Max Polar Angle",
        range(min = 0.0, max = 180.0),
        extend("step" = 1.0)
    )]
    pub max_polar_angle: f32,
    /// Lower horizontal swing limit in degrees; `None` is unbounded.
    #[schemars(title = "Min Azimuth Angle")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_azimuth_angle: Option<f32>,
    /// Closest the camera may dolly in.
    #[schemars(title = "Min Distance", range(min = 0.0, max = 10000.0))]
    pub min_distance: f32,
    /// Highest the camera may tilt, in degrees from straight up.
    #[schemars(
        title = "Min Polar Angle",
        range(min = 0.0, max = 180.0),
        extend("step" = 1.0)
    )]
    pub min_polar_angle: f32,
    /// Minimum zoom for orthographic cameras.
    #[schemars(skip)]
    pub min_zoom: f32,
    /// Pan sensitivity multiplier.
    #[schemars(
        title = "Pan Speed",
        range(min = 0.1, max = 5.0),
        extend("step" = 0.1)
    )]
    pub pan_speed: f32,
    /// Rotation sensitivity multiplier.
    #[schemars(
        title = "Rotate Speed",
        range(min = 0.01, max = 2.0),
        extend("step" = 0.01)
    )]
    pub rotate_speed: f32,
    /// Pan in screen space instead of along the ground plane.
    #[schemars(title = "Screen Space Panning")]
    pub screen_space_panning: bool,
    /// Point the camera orbits around.
    #[schemars(title = "Target Position")]
    pub target_position: [f32; 3],
    /// Zoom sensitivity multiplier.
    #[schemars(
        title = "Zoom Speed",
        range(min = 0.01, max = 5.0),
        extend("step" = 0.01)
    )]
    pub zoom_speed: f32,
}

impl OrbitOptions {
    /// Defaults for the given device class.
    #[must_use]
    pub fn for_device(device: DeviceClass) -> Self {
        Self {
            max_polar_angle: device.default_max_polar_angle(),
            ..Self::default()
        }
    }
}

impl Default for OrbitOptions {
    fn default() -> Self {
        Self {
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            camera_position: [0.0; 3],
            damping_factor: 0.1,
            enabled: true,
            enable_damping: true,
            enable_keys: true,
            enable_pan: true,
            enable_rotate: true,
            enable_zoom: true,
            key_pan_speed: 7.0,
            max_azimuth_angle: None,
            max_distance: 1000.0,
            max_polar_angle: DeviceClass::Desktop.default_max_polar_angle(),
            min_azimuth_angle: None,
            min_distance: 1.0,
            min_polar_angle: 0.0,
            min_zoom: 0.0,
            pan_speed: 1.0,
            rotate_speed: 0.05,
            screen_space_panning: false,
            target_position: [0.0; 3],
            zoom_speed: 0.5,
        }
    }
}
