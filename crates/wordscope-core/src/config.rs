//! Production configuration constants.
//!
//! These values mirror the limits enforced by the analysis service so the
//! client can reject bad input before it ever reaches the network.
//!
//! # Usage
//!
//! ```
//! use wordscope_core::config::{ApiConfig, DEFAULT_HISTORY_LIMIT};
//!
//! let config = ApiConfig::new("http://localhost:8000/");
//! assert_eq!(config.base_url(), "http://localhost:8000");
//! assert_eq!(config.history_limit(), DEFAULT_HISTORY_LIMIT);
//! ```

// =============================================================================
// Service Endpoint
// =============================================================================

/// Base URL of the analysis service when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Environment variable consulted for the service base URL.
///
/// The CLI reads it at runtime. The app reads the same name at compile time
/// through `option_env!`, which only takes a literal.
pub const API_URL_ENV: &str = "WORDSCOPE_API_URL";

/// Number of history entries requested when no limit is given.
///
/// Matches the service-side default for `GET /history/`.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

// =============================================================================
// Upload Validation
// =============================================================================

/// File extensions the service accepts (lowercase, with leading dot).
pub const ACCEPTED_EXTENSIONS: &[&str] = &[".txt"];

/// Largest upload the service accepts (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

// =============================================================================
// User-facing Fallback Messages
// =============================================================================

/// Shown when an upload fails without a structured `detail` from the service.
pub const UPLOAD_FALLBACK_MESSAGE: &str = "Upload failed";

/// Shown when loading a past result fails without a structured `detail`.
pub const RESULT_FALLBACK_MESSAGE: &str = "Could not load analysis results";

/// Value for the `accept` attribute of the file input.
///
/// This is only a hint to the native picker; drag-and-drop bypasses it, so
/// validation always runs again in [`crate::upload::validate_selection`].
pub fn accept_attribute() -> String {
    ACCEPTED_EXTENSIONS.join(",")
}

/// Connection settings for [`crate::api::HttpAnalysisClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    history_limit: usize,
}

impl ApiConfig {
    /// Creates a config for the given base URL.
    ///
    /// Trailing slashes are stripped so endpoint paths can be appended
    /// verbatim. An empty URL falls back to [`DEFAULT_API_BASE_URL`].
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            DEFAULT_API_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };

        Self {
            base_url,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Builds a config from an optional override (env var, CLI flag).
    pub fn from_override(base_url: Option<&str>) -> Self {
        Self::new(base_url.unwrap_or(DEFAULT_API_BASE_URL))
    }

    /// Sets the number of history entries fetched per refresh (minimum 1).
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Joins an endpoint path (starting with `/`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
