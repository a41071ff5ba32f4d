//! Orbit-control options with TOML preset support.
//!
//! The declarative control schema and the frame-pacing settings are
//! consolidated here. Options serialize to/from TOML so a host can ship
//! camera presets, and to JSON Schema so a UI can render an editor for them.

mod controls;
mod timing;

use std::path::Path;

pub use controls::{DeviceClass, OrbitOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use timing::TimingOptions;

use crate::error::OrbitError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[controls]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct OrbitConfig {
    /// Constraint, speed and pose options for the orbit control.
    pub controls: OrbitOptions,
    /// Frame pacing.
    pub timing: TimingOptions,
}

impl OrbitConfig {
    /// Defaults for the given device class (mobile gets the tighter polar
    /// limit).
    #[must_use]
    pub fn for_device(device: DeviceClass) -> Self {
        Self {
            controls: OrbitOptions::for_device(device),
            ..Self::default()
        }
    }

    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(OrbitConfig)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, OrbitError> {
        let content = std::fs::read_to_string(path).map_err(OrbitError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, OrbitError> {
        toml::from_str(content)
            .map_err(|e| OrbitError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), OrbitError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrbitError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(OrbitError::Io)?;
        }
        std::fs::write(path, content).map_err(OrbitError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
