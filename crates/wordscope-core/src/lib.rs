//! # Wordscope Core
//!
//! Platform-independent client library for the Wordscope document analysis
//! service.
//!
//! This crate owns everything the frontends (web/desktop app, CLI) share:
//! the wire model, the typed API boundary, and the state machines that keep
//! the UI consistent while uploads, history refreshes and result fetches race
//! each other.
//!
//! ## Modules
//!
//! - [`api`] - `AnalysisApi` trait and the reqwest-backed HTTP client
//! - [`models`] - Wire types (`DocumentSummary`, `MetricsRecord`, responses)
//! - [`upload`] - Upload lifecycle state machine, file validation, drop zone
//! - [`history`] - History list with wholesale, generation-fenced refresh
//! - [`session`] - Composition root reducer owning the "current analysis" slot
//! - [`workflow`] - Async operations wiring the API to the session
//! - [`presentation`] - Pure view model for metrics (table / chart)
//! - [`formatting`] - Human-readable timestamps and numbers
//! - [`metrics`] - Request timing collection with rolling averages
//! - [`config`] - Production configuration constants
//! - [`error`] - Error types for validation and API calls

#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod error;
pub mod formatting;
pub mod history;
pub mod metrics;
pub mod models;
pub mod presentation;
pub mod session;
pub mod upload;
pub mod workflow;

pub use api::{AnalysisApi, HttpAnalysisClient};
pub use error::{ApiError, ValidationError};
pub use models::{
    DocumentSummary, MetricsRecord, ResultResponse, SelectedFile, TopWords, UploadResponse,
    WordCount,
};
pub use session::Session;
