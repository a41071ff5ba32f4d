//! Shared, single-threaded ownership of a control for callback-driven
//! hosts (DOM listeners, render-loop closures).
//!
//! Event delivery can run arbitrary host code that reaches back into the
//! control. Hosts that implement [`QueuedHost`] buffer emitted events, and
//! [`with_control`] hands them back only after the `RefCell` borrow has been
//! released, so delivering them may borrow the control again.

use std::cell::RefCell;
use std::rc::Rc;

use super::host::{OrbitHost, OrbitUpdated};
use super::OrbitControl;
use crate::camera::OrbitEngine;

/// A control shared between the app and its input callbacks.
pub type SharedControl<E, H> = Rc<RefCell<OrbitControl<E, H>>>;

/// A host that queues emitted events instead of delivering them in place.
pub trait QueuedHost: OrbitHost {
    /// Take the events queued since the last call, oldest first.
    fn take_queued(&mut self) -> Vec<OrbitUpdated>;
}

/// Run `f` on the control, then return its result together with the
/// events emitted meanwhile. The borrow is released before returning.
///
/// Returns `None` without running `f` if the control is already borrowed,
/// i.e. the call re-entered from inside another `with_control`.
pub fn with_control<E, H, R>(
    control: &SharedControl<E, H>,
    f: impl FnOnce(&mut OrbitControl<E, H>) -> R,
) -> Option<(R, Vec<OrbitUpdated>)>
where
    E: OrbitEngine,
    H: QueuedHost,
{
    let mut guard = control.try_borrow_mut().ok()?;
    let result = f(&mut guard);
    let queued = guard.host_mut().take_queued();
    drop(guard);
    Some((result, queued))
}
