//! Crate-level error types.

use std::fmt;

/// Errors produced by the orbiter crate.
///
/// The interaction path itself never fails: disabled controls and no-op
/// gestures are absorbed. These cover attach-time dependencies and the
/// file / platform surfaces around the control.
#[derive(Debug)]
pub enum OrbitError {
    /// The host has no camera attached to the entity being controlled.
    MissingCamera,
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Input trace could not be decoded.
    Trace(String),
    /// Browser API call failed (listener registration, event dispatch).
    Web(String),
}

impl fmt::Display for OrbitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCamera => {
                write!(f, "orbit control requires a camera on the entity")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Trace(msg) => write!(f, "input trace error: {msg}"),
            Self::Web(msg) => write!(f, "web error: {msg}"),
        }
    }
}

impl std::error::Error for OrbitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for OrbitError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn io_errors_keep_their_source() {
        let err = OrbitError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing.toml",
        ));
        assert!(err.to_string().contains("missing.toml"));
        assert!(err.source().is_some());
    }

    #[test]
    fn missing_camera_has_no_source() {
        let err = OrbitError::MissingCamera;
        assert!(err.source().is_none());
        assert!(err.to_string().contains("camera"));
    }
}
