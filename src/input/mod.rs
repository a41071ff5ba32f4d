//! Input handling: event types and the listener that turns raw pointer and
//! wheel events into engine motion, cursor affordance and notifications.

/// Platform-agnostic input events.
pub mod event;
/// Pointer/wheel listener with wheel debounce.
pub mod listener;

pub use event::{InputEvent, MouseButton};
pub use listener::{
    Affordance, InputListener, InteractionState, PointerMode, Reaction,
};
