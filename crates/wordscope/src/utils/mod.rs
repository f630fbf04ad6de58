//! Utility modules shared by components.

pub mod signal_ext;

pub use signal_ext::SignalExt;
