//! Typed boundary to the remote analysis service.
//!
//! [`AnalysisApi`] is the seam between the orchestration layer and the
//! network. The app and the CLI use [`HttpAnalysisClient`]; tests substitute
//! scripted implementations to control response timing and content.
//!
//! The trait carries no business logic: it maps requests to endpoints and
//! responses (or error bodies) to [`ApiError`] variants.

mod http;

pub use http::{extract_detail, interpret_response, HttpAnalysisClient};

use crate::error::ApiError;
use crate::models::{DocumentSummary, ResultResponse, SelectedFile, UploadResponse};

/// Operations offered by the analysis service.
///
/// Futures are `?Send` because the primary target is single-threaded WASM.
#[async_trait::async_trait(?Send)]
pub trait AnalysisApi {
    /// `POST /upload/` with the file as multipart field `file`.
    async fn upload(&self, file: &SelectedFile) -> Result<UploadResponse, ApiError>;

    /// `GET /history/?limit=<n>`, most recent first.
    async fn list_history(&self, limit: usize) -> Result<Vec<DocumentSummary>, ApiError>;

    /// `GET /results/<file_id>`.
    async fn get_result(&self, file_id: &str) -> Result<ResultResponse, ApiError>;

    /// `GET /health` liveness probe.
    async fn health(&self) -> Result<(), ApiError>;
}
