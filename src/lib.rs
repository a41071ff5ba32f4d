// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (clippy default thresholds)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Orbit-camera interaction for 3D scenes.
//!
//! Orbiter lets a user rotate, pan and zoom a camera around a target point
//! with pointer and wheel input, keeps the motion inside configured
//! constraints and reports a debounced "camera pose changed" notification
//! so the host can persist the pose.
//!
//! # Key entry points
//!
//! - [`OrbitControl`] - the per-entity control; drive it through
//!   [`Lifecycle`] and [`OrbitControl::handle_event`]
//! - [`OrbitEngine`] - the orbit math seam, with [`camera::SphericalOrbit`]
//!   as the default implementation
//! - [`OrbitHost`] - the scene runtime seam (camera, cursor, event bus)
//! - [`options::OrbitConfig`] - TOML-loadable options and presets
//!
//! # Time
//!
//! Nothing here reads a clock. Every entry point takes the current
//! [`web_time::Instant`]; frame throttling, the wheel debounce and the
//! post-attach settle notification are deadlines checked on the next
//! [`Lifecycle::on_frame`].
//!
//! The `web` feature adds a canvas binding, `web::WebOrbit`.

pub mod camera;
pub mod control;
pub mod error;
pub mod input;
pub mod options;
#[cfg(test)]
mod test_support;
pub mod util;
#[cfg(feature = "web")]
pub mod web;

pub use camera::{CameraPose, OrbitEngine};
pub use control::{Lifecycle, OrbitControl, OrbitHost, OrbitUpdated};
pub use error::OrbitError;
pub use input::InputEvent;
pub use options::{OrbitConfig, OrbitOptions};
