//! reqwest-backed implementation of [`AnalysisApi`].
//!
//! reqwest works on both native and WASM platforms:
//! - Native: hyper with rustls for HTTPS
//! - WASM: the browser `fetch()` API
//!
//! Status handling is split out into [`interpret_response`] so the mapping
//! from HTTP status and body to [`ApiError`] can be tested without a server.

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use super::AnalysisApi;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{DocumentSummary, ResultResponse, SelectedFile, UploadResponse};

/// Detail used when a 404 carries no body.
const NOT_FOUND_DETAIL: &str = "File not found";

/// Detail used when a 202 carries no body.
const PENDING_DETAIL: &str = "Analysis pending";

/// HTTP client for the analysis service.
///
/// `reqwest::Client` pools connections internally, so one instance should be
/// shared for the lifetime of the app.
#[derive(Clone, Debug)]
pub struct HttpAnalysisClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpAnalysisClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn results_url(&self, file_id: &str) -> String {
        self.config
            .endpoint(&format!("/results/{}", urlencoding::encode(file_id)))
    }

    async fn finish<T: DeserializeOwned>(
        &self,
        response: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<T, ApiError> {
        let response = response.map_err(|e| ApiError::network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(format!("Failed to read response body: {}", e)))?;

        debug!("Service answered {} ({} bytes)", status, body.len());
        interpret_response(status, &body)
    }
}

#[async_trait::async_trait(?Send)]
impl AnalysisApi for HttpAnalysisClient {
    async fn upload(&self, file: &SelectedFile) -> Result<UploadResponse, ApiError> {
        info!("Uploading {} ({} bytes)", file.name, file.size());

        let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.config.endpoint("/upload/"))
            .multipart(form)
            .send()
            .await;

        self.finish(response).await
    }

    async fn list_history(&self, limit: usize) -> Result<Vec<DocumentSummary>, ApiError> {
        let response = self
            .client
            .get(self.config.endpoint("/history/"))
            .query(&[("limit", limit)])
            .send()
            .await;

        self.finish(response).await
    }

    async fn get_result(&self, file_id: &str) -> Result<ResultResponse, ApiError> {
        let response = self.client.get(self.results_url(file_id)).send().await;
        self.finish(response).await
    }

    async fn health(&self) -> Result<(), ApiError> {
        let response = self
            .client
            .get(self.config.endpoint("/health"))
            .send()
            .await;

        self.finish::<Value>(response).await.map(|_| ())
    }
}

/// Maps an HTTP status and body to a decoded value or an [`ApiError`].
///
/// - `202` → [`ApiError::Pending`] (result stored, analysis not finished)
/// - other `2xx` → body decoded as `T`, else [`ApiError::Decode`]
/// - `404` → [`ApiError::NotFound`]
/// - other `4xx` → [`ApiError::Validation`]
/// - everything else → [`ApiError::Network`]
///
/// The service's `detail` is carried along whenever the body has one.
pub fn interpret_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let detail = extract_detail(body);

    match status {
        202 => Err(ApiError::Pending(
            detail.unwrap_or_else(|| PENDING_DETAIL.to_string()),
        )),
        200..=299 => Ok(serde_json::from_str(body)?),
        404 => Err(ApiError::NotFound(
            detail.unwrap_or_else(|| NOT_FOUND_DETAIL.to_string()),
        )),
        400..=499 => Err(ApiError::Validation(
            detail.unwrap_or_else(|| format!("Request rejected (HTTP {})", status)),
        )),
        _ => Err(ApiError::Network {
            reason: format!("HTTP {}", status),
            detail,
        }),
    }
}

/// Pulls the structured `detail` out of an error body.
///
/// The service sends either `{"detail": "message"}` or, for request
/// validation failures, `{"detail": [{"msg": "..."}, ...]}`; the latter is
/// joined with `"; "`.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METRICS: &str = r#"{"total_word_count": 120, "unique_word_count": 80,
        "average_sentence_length": 12.5, "flesch_kincaid_grade_level": 8.1,
        "top_10_words": [["the", 10], ["a", 7]]}"#;

    #[test]
    fn test_success_decodes_body() {
        let body = format!(r#"{{"file_id": "abc123", "filename": "sample.txt", "metrics": {METRICS}}}"#);
        let response: UploadResponse = interpret_response(201, &body).unwrap();
        assert_eq!(response.file_id, "abc123");
        assert_eq!(response.metrics.total_word_count, 120);
    }

    #[test]
    fn test_success_with_wrong_shape_is_decode_error() {
        let result: Result<UploadResponse, _> = interpret_response(200, r#"{"ok": true}"#);
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_not_found_uses_detail() {
        let result: Result<ResultResponse, _> =
            interpret_response(404, r#"{"detail": "File not found"}"#);
        assert_eq!(result.unwrap_err(), ApiError::NotFound("File not found".into()));

        let result: Result<ResultResponse, _> = interpret_response(404, "");
        assert_eq!(result.unwrap_err(), ApiError::NotFound(NOT_FOUND_DETAIL.into()));
    }

    #[test]
    fn test_accepted_means_pending() {
        let result: Result<ResultResponse, _> =
            interpret_response(202, r#"{"detail": "Analysis pending"}"#);
        assert_eq!(result.unwrap_err(), ApiError::Pending("Analysis pending".into()));
    }

    #[test]
    fn test_client_errors_are_validation() {
        let result: Result<UploadResponse, _> =
            interpret_response(400, r#"{"detail": "Only .txt files are supported."}"#);
        assert_eq!(
            result.unwrap_err().user_message("Upload failed"),
            "Only .txt files are supported."
        );

        let result: Result<UploadResponse, _> = interpret_response(
            413,
            r#"{"detail": "File exceeds maximum allowed size (5 MB)."}"#,
        );
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_server_errors_are_network() {
        let result: Result<UploadResponse, _> = interpret_response(500, "Internal Server Error");
        match result.unwrap_err() {
            ApiError::Network { reason, detail } => {
                assert_eq!(reason, "HTTP 500");
                assert!(detail.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extract_detail_list() {
        let body = r#"{"detail": [{"loc": ["body", "file"], "msg": "field required"},
                                  {"msg": "value is not a file"}]}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("field required; value is not a file")
        );
        assert_eq!(extract_detail(r#"{"detail": 42}"#), None);
        assert_eq!(extract_detail("<html>"), None);
    }

    #[test]
    fn test_results_url_encodes_id() {
        let client = HttpAnalysisClient::new(ApiConfig::new("http://localhost:8000"));
        assert_eq!(
            client.results_url("a b/c"),
            "http://localhost:8000/results/a%20b%2Fc"
        );
    }
}
