//! Async operations connecting the [`AnalysisApi`] to a [`Session`].
//!
//! Each workflow follows the same shape: take a ticket from the session,
//! await the service without holding any borrow, then hand the response back
//! to the session, which decides whether it still applies. Frontends only
//! provide access to their session storage through [`SessionHandle`] and, for
//! uploads from the UI, a [`FileSource`] for the picked or dropped file.

use std::cell::RefCell;

use instant::Instant;
use tracing::{debug, info, warn};

use crate::api::AnalysisApi;
use crate::error::ValidationError;
use crate::history::RefreshOutcome;
use crate::metrics::{global_metrics, RequestKind};
use crate::models::SelectedFile;
use crate::session::{SelectOutcome, Session};

/// Mutable access to wherever the frontend keeps its [`Session`].
///
/// Implementations must not hold the borrow across an `.await`; the
/// workflows only call `update` between awaits.
pub trait SessionHandle {
    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R;
}

impl SessionHandle for RefCell<Session> {
    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// A file handed over by a picker or a drop, not yet read.
#[async_trait::async_trait(?Send)]
pub trait FileSource {
    fn name(&self) -> String;

    /// Size reported by the platform before reading.
    fn size(&self) -> u64;

    async fn read_bytes(&self) -> Result<Vec<u8>, String>;
}

#[async_trait::async_trait(?Send)]
impl FileSource for SelectedFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        SelectedFile::size(self)
    }

    async fn read_bytes(&self) -> Result<Vec<u8>, String> {
        Ok(self.bytes.clone())
    }
}

/// How an upload attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Service accepted the file; `displayed` is false when a later request
    /// took over the metrics view
    Succeeded { file_id: String, displayed: bool },
    /// Read or service failure, with the message shown to the user
    Failed(String),
    /// Refused before any request was sent
    Rejected(ValidationError),
}

/// Re-fetches the history list. Failures keep the previous list.
pub async fn refresh_history<A, S>(api: &A, session: &S, limit: usize) -> RefreshOutcome
where
    A: AnalysisApi + ?Sized,
    S: SessionHandle,
{
    let generation = session.update(Session::begin_refresh);

    let started = Instant::now();
    let result = api.list_history(limit).await;
    global_metrics().record_since(RequestKind::History, started, result.is_ok());

    let outcome = session.update(|s| s.complete_refresh(generation, result));
    if let RefreshOutcome::Updated(count) = outcome {
        debug!("History refreshed with {} entries", count);
    }
    outcome
}

/// Validates, reads and uploads a picked or dropped file.
///
/// This is the single path for both picker and drop selections. On success
/// the history list is refreshed once.
pub async fn select_and_upload<A, S, F>(
    api: &A,
    session: &S,
    source: &F,
    history_limit: usize,
) -> UploadOutcome
where
    A: AnalysisApi + ?Sized,
    S: SessionHandle,
    F: FileSource + ?Sized,
{
    let name = source.name();
    if let Err(err) = session.update(|s| s.select_file(&name, source.size())) {
        warn!("Rejected selection {}: {}", name, err);
        return UploadOutcome::Rejected(err);
    }

    let bytes = match source.read_bytes().await {
        Ok(bytes) => bytes,
        Err(err) => {
            let message = format!("Could not read {}: {}", name, err);
            warn!("{}", message);
            session.update(|s| s.fail_selection(message.clone()));
            return UploadOutcome::Failed(message);
        }
    };

    upload_selected(api, session, SelectedFile::new(name, bytes), history_limit).await
}

/// Uploads a file that is already in memory.
pub async fn submit_upload<A, S>(
    api: &A,
    session: &S,
    file: SelectedFile,
    history_limit: usize,
) -> UploadOutcome
where
    A: AnalysisApi + ?Sized,
    S: SessionHandle,
{
    if let Err(err) = session.update(|s| s.select_file(&file.name, file.size())) {
        return UploadOutcome::Rejected(err);
    }
    upload_selected(api, session, file, history_limit).await
}

async fn upload_selected<A, S>(
    api: &A,
    session: &S,
    file: SelectedFile,
    history_limit: usize,
) -> UploadOutcome
where
    A: AnalysisApi + ?Sized,
    S: SessionHandle,
{
    let ticket = match session.update(|s| s.begin_upload(&file)) {
        Ok(ticket) => ticket,
        Err(err) => return UploadOutcome::Rejected(err),
    };

    let started = Instant::now();
    let result = api.upload(&file).await;
    global_metrics().record_since(RequestKind::Upload, started, result.is_ok());

    let file_id = result.as_ref().ok().map(|response| response.file_id.clone());
    let completion = session.update(|s| s.complete_upload(ticket, result));

    if completion.refresh_history {
        refresh_history(api, session, history_limit).await;
    }

    match file_id {
        Some(file_id) => {
            info!("📤 Uploaded {} as {}", file.name, file_id);
            UploadOutcome::Succeeded {
                file_id,
                displayed: completion.displayed,
            }
        }
        None => {
            let message = session
                .update(|s| s.upload_state().status_text())
                .unwrap_or_default();
            warn!("Upload of {} failed: {}", file.name, message);
            UploadOutcome::Failed(message)
        }
    }
}

/// Fetches a stored result and shows it unless a later request superseded it.
pub async fn select_document<A, S>(api: &A, session: &S, file_id: &str) -> SelectOutcome
where
    A: AnalysisApi + ?Sized,
    S: SessionHandle,
{
    let ticket = session.update(|s| s.begin_select(file_id));

    let started = Instant::now();
    let result = api.get_result(file_id).await;
    global_metrics().record_since(RequestKind::Result, started, result.is_ok());

    let outcome = session.update(|s| s.complete_select(ticket, result));
    if let SelectOutcome::Failed(message) = &outcome {
        warn!("Loading result {} failed: {}", file_id, message);
    }
    outcome
}

/// Returns whether the service answered its liveness probe.
pub async fn check_health<A: AnalysisApi + ?Sized>(api: &A) -> bool {
    match api.health().await {
        Ok(()) => true,
        Err(err) => {
            warn!("Health check failed: {}", err);
            false
        }
    }
}
