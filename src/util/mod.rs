//! Shared timing utilities.
//!
//! Helpers for rate-limiting per-frame work and for cancellable deferred
//! deadlines driven by an external clock.

/// Cancellable one-shot deadlines.
pub mod deferred;
/// Leading-edge frame throttling.
pub mod frame_timing;

pub use deferred::DeferredTask;
pub use frame_timing::FrameThrottle;
