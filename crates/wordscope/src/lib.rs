//! Wordscope: browser client for the document analysis service.
//!
//! All state transitions live in `wordscope-core`; this crate only renders
//! the session and turns user events into workflow calls.

pub mod components;
pub mod utils;
