//! Extension trait for Dioxus signals.
//!
//! Workflows in `wordscope-core` mutate the session through a closure and
//! usually want a value back (a ticket, an outcome). `SignalExt::mutate`
//! gives that shape to any `Signal<T>`:
//!
//! ```ignore
//! let ticket = session.mutate(|s| s.begin_select(&file_id));
//! ```

use dioxus::prelude::*;
use wordscope_core::session::Session;
use wordscope_core::workflow::SessionHandle;

pub trait SignalExt<T: 'static> {
    /// Mutate the signal's value in place and return the closure's result.
    ///
    /// The write guard is dropped before returning, so this is safe to call
    /// between awaits in a spawned task.
    fn mutate<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R;
}

impl<T: 'static> SignalExt<T> for Signal<T> {
    fn mutate<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut value = self.write();
        f(&mut *value)
    }
}

/// The app's session signal, handed to core workflows.
#[derive(Clone, Copy, PartialEq)]
pub struct SessionSignal(pub Signal<Session>);

impl SessionHandle for SessionSignal {
    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut signal = self.0;
        signal.mutate(f)
    }
}
