//! Subcommand execution on top of the shared workflows.
//!
//! Each command runs against a fresh [`Session`], so the CLI gets the same
//! validation and error messages as the web app.

use std::cell::RefCell;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use tracing::info;
use wordscope_core::config::{ApiConfig, RESULT_FALLBACK_MESSAGE};
use wordscope_core::session::SelectOutcome;
use wordscope_core::upload::validate_selection;
use wordscope_core::workflow::{check_health, select_document, submit_upload, UploadOutcome};
use wordscope_core::{
    AnalysisApi, DocumentSummary, HttpAnalysisClient, MetricsRecord, SelectedFile, Session,
};

/// A finished analysis, either freshly uploaded or fetched by id.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub file_id: String,
    pub filename: String,
    pub metrics: MetricsRecord,
}

pub fn client(config: ApiConfig) -> HttpAnalysisClient {
    HttpAnalysisClient::new(config)
}

fn current_report(session: &RefCell<Session>) -> Result<AnalysisReport> {
    let session = session.borrow();
    let current = session
        .current()
        .ok_or_else(|| anyhow!("Service returned no analysis"))?;
    Ok(AnalysisReport {
        file_id: current.file_id.clone(),
        filename: current.filename.clone(),
        metrics: current.metrics.clone(),
    })
}

/// Validates a local file, uploads it and returns the computed metrics.
///
/// Size and extension are checked from file metadata before the contents
/// are read.
pub async fn upload(client: &HttpAnalysisClient, path: &Path) -> Result<AnalysisReport> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("{} is not a file path", path.display()))?;

    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("Failed to stat {}", path.display()))?;
    validate_selection(&name, metadata.len())?;

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    info!("Uploading {} ({} bytes)", name, bytes.len());

    let session = RefCell::new(Session::new());
    let limit = client.config().history_limit();
    match submit_upload(client, &session, SelectedFile::new(name, bytes), limit).await {
        UploadOutcome::Succeeded { .. } => current_report(&session),
        UploadOutcome::Failed(message) => bail!(message),
        UploadOutcome::Rejected(err) => Err(err.into()),
    }
}

pub async fn history(client: &HttpAnalysisClient, limit: usize) -> Result<Vec<DocumentSummary>> {
    client
        .list_history(limit.max(1))
        .await
        .context("Failed to fetch history")
}

/// Fetches the stored metrics for `file_id`.
pub async fn show(client: &HttpAnalysisClient, file_id: &str) -> Result<AnalysisReport> {
    let session = RefCell::new(Session::new());
    match select_document(client, &session, file_id).await {
        SelectOutcome::Displayed => current_report(&session),
        SelectOutcome::Failed(message) => bail!(message),
        SelectOutcome::Stale => bail!(RESULT_FALLBACK_MESSAGE),
    }
}

pub async fn health(client: &HttpAnalysisClient) -> Result<()> {
    if check_health(client).await {
        Ok(())
    } else {
        bail!(
            "Analysis service at {} is not reachable",
            client.config().base_url()
        )
    }
}
