//! Error types for wordscope-core.
//!
//! Two families exist:
//!
//! - [`ValidationError`]: raised on the client before any request is sent
//!   (bad extension, empty or oversized file, upload already running).
//! - [`ApiError`]: anything that went wrong talking to the service.
//!
//! Both are `Clone` so they can be stored inside UI state, and both are
//! turned into plain user-facing strings at the operation boundary.

use thiserror::Error;

use crate::config::MAX_UPLOAD_BYTES;

/// Client-side rejections of a file selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The selection contained no file
    #[error("No file selected.")]
    NoFile,
    /// Extension is not one of the accepted document types
    #[error("Only {accepted} files are supported.")]
    UnsupportedType { filename: String, accepted: String },
    /// File has zero bytes
    #[error("{0} is empty.")]
    EmptyFile(String),
    /// File is larger than the service accepts
    #[error("File exceeds maximum allowed size ({limit_mb} MB).", limit_mb = MAX_UPLOAD_BYTES / (1024 * 1024))]
    TooLarge { filename: String, size: u64 },
    /// A second upload was attempted while one is in flight
    #[error("An upload is already in progress.")]
    UploadInProgress,
}

/// Failures of a call to the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Transport failure or a server-side (5xx) error
    #[error("Network error: {reason}")]
    Network {
        reason: String,
        /// Structured `detail` from the error body, when the service sent one
        detail: Option<String>,
    },
    /// The service rejected the request (4xx)
    #[error("Validation failed: {0}")]
    Validation(String),
    /// Unknown `file_id`
    #[error("Not found: {0}")]
    NotFound(String),
    /// Result exists but analysis has not finished (202)
    #[error("Analysis pending: {0}")]
    Pending(String),
    /// Success status but the body did not match the expected shape
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Creates a transport-level error without a service detail.
    pub fn network(reason: impl Into<String>) -> Self {
        ApiError::Network {
            reason: reason.into(),
            detail: None,
        }
    }

    /// The service's structured `detail`, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Validation(detail) | ApiError::NotFound(detail) | ApiError::Pending(detail) => {
                Some(detail.as_str())
            }
            ApiError::Network { detail, .. } => detail.as_deref(),
            ApiError::Decode(_) => None,
        }
    }

    /// Message shown to the user: the service detail verbatim, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail()
            .filter(|detail| !detail.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
