//! Client session reducer.
//!
//! [`Session`] holds everything the UI renders: the upload lifecycle, the
//! history list, the drop-zone highlight, and the "current" analysis shown in
//! the metrics view. Every async operation is split into a `begin_*` call
//! that hands out a ticket and a `complete_*` call that takes the ticket back
//! with the response. The reducer never awaits; workflows do.
//!
//! # Display fencing
//!
//! Uploads and history selections both write the current-analysis slot. Each
//! one takes the next [`Generation`] from the display counter when it starts,
//! and its response is applied only if that generation is still the latest
//! issued. The display therefore reflects the most recently *requested*
//! result, whatever order responses arrive in.
//!
//! The upload card is not fenced: a superseded upload still moves to
//! `Succeeded` or `Failed`, it just does not take over the metrics view.

use std::fmt;

use tracing::{debug, info};

use crate::config::{RESULT_FALLBACK_MESSAGE, UPLOAD_FALLBACK_MESSAGE};
use crate::error::{ApiError, ValidationError};
use crate::history::{HistoryStore, RefreshOutcome};
use crate::models::{DocumentSummary, MetricsRecord, ResultResponse, SelectedFile, UploadResponse};
use crate::upload::{DragEventKind, DropResponse, DropZone, UploadController, UploadState};

/// Monotonic request id for one fenced slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues generations and answers whether one is still current.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationCounter {
    latest: u64,
}

impl GenerationCounter {
    pub fn issue(&mut self) -> Generation {
        self.latest += 1;
        Generation(self.latest)
    }

    pub fn is_latest(&self, generation: Generation) -> bool {
        generation.0 == self.latest
    }
}

/// Which operation produced the analysis on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSource {
    Upload,
    History,
}

/// The analysis currently shown by the metrics view.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentAnalysis {
    pub file_id: String,
    pub filename: String,
    pub metrics: MetricsRecord,
    pub source: AnalysisSource,
}

/// One-line message for the results area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Handed out by [`Session::begin_upload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    generation: Generation,
    filename: String,
}

/// Handed out by [`Session::begin_select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectTicket {
    generation: Generation,
    file_id: String,
}

/// What the caller should do after [`Session::complete_upload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadCompletion {
    /// The response became the current analysis
    pub displayed: bool,
    /// The upload succeeded and the history list must be re-fetched
    pub refresh_history: bool,
}

/// Result of [`Session::complete_select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    Displayed,
    Failed(String),
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    upload: UploadController,
    drop_zone: DropZone,
    history: HistoryStore,
    display: GenerationCounter,
    current: Option<CurrentAnalysis>,
    notice: Option<Notice>,
    loading_result: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn upload_state(&self) -> &UploadState {
        self.upload.state()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn current(&self) -> Option<&CurrentAnalysis> {
        self.current.as_ref()
    }

    pub fn current_metrics(&self) -> Option<&MetricsRecord> {
        self.current.as_ref().map(|current| &current.metrics)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn drop_zone(&self) -> &DropZone {
        &self.drop_zone
    }

    /// True while the picker and drop target must be disabled.
    pub fn is_upload_busy(&self) -> bool {
        self.upload.state().is_busy()
    }

    /// The `file_id` whose result is being fetched, if the latest select is
    /// still outstanding.
    pub fn loading_result(&self) -> Option<&str> {
        self.loading_result.as_deref()
    }

    /// True while any display-affecting request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.is_upload_busy() || self.loading_result.is_some()
    }

    // -------------------------------------------------------------------------
    // Upload
    // -------------------------------------------------------------------------

    /// Routes a drag event to the drop zone, disabled while uploading.
    pub fn handle_drag(&mut self, kind: DragEventKind) -> DropResponse {
        let disabled = self.is_upload_busy();
        self.drop_zone.handle(kind, disabled)
    }

    /// What the caller must do for a drag event, without touching state.
    pub fn drag_response(&self, kind: DragEventKind) -> DropResponse {
        DropResponse::for_event(kind, self.is_upload_busy())
    }

    /// Whether `handle_drag` would change the drop zone for this event.
    pub fn drag_changes_zone(&self, kind: DragEventKind) -> bool {
        self.drop_zone.would_change(kind, self.is_upload_busy())
    }

    /// Single entry point for picker and drop selections.
    pub fn select_file(&mut self, filename: &str, size: u64) -> Result<(), ValidationError> {
        self.upload.select(filename, size)
    }

    /// The selected file could not be read.
    pub fn fail_selection(&mut self, message: impl Into<String>) {
        self.upload.abort_selection(message);
    }

    /// Starts an upload and claims the display slot for it.
    pub fn begin_upload(&mut self, file: &SelectedFile) -> Result<UploadTicket, ValidationError> {
        self.upload.begin(&file.name, file.size())?;
        let generation = self.display.issue();
        self.loading_result = None;
        debug!("Upload of {} issued as {}", file.name, generation);

        Ok(UploadTicket {
            generation,
            filename: file.name.clone(),
        })
    }

    pub fn complete_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<UploadResponse, ApiError>,
    ) -> UploadCompletion {
        let latest = self.display.is_latest(ticket.generation);

        match result {
            Ok(response) => {
                info!("Upload of {} succeeded as {}", response.filename, response.file_id);
                if latest {
                    self.current = Some(CurrentAnalysis {
                        file_id: response.file_id.clone(),
                        filename: response.filename.clone(),
                        metrics: response.metrics.clone(),
                        source: AnalysisSource::Upload,
                    });
                    self.notice = None;
                } else {
                    debug!(
                        "Upload of {} ({}) superseded, not displaying",
                        ticket.filename, ticket.generation
                    );
                }
                self.upload
                    .succeed(response.file_id, response.filename, response.metrics);

                UploadCompletion {
                    displayed: latest,
                    refresh_history: true,
                }
            }
            Err(err) => {
                debug!("Upload of {} ({}) failed: {}", ticket.filename, ticket.generation, err);
                self.upload.fail(err.user_message(UPLOAD_FALLBACK_MESSAGE));
                UploadCompletion {
                    displayed: false,
                    refresh_history: false,
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // History selection
    // -------------------------------------------------------------------------

    /// Starts fetching a stored result and claims the display slot for it.
    pub fn begin_select(&mut self, file_id: &str) -> SelectTicket {
        let generation = self.display.issue();
        self.loading_result = Some(file_id.to_string());
        debug!("Select of {} issued as {}", file_id, generation);

        SelectTicket {
            generation,
            file_id: file_id.to_string(),
        }
    }

    pub fn complete_select(
        &mut self,
        ticket: SelectTicket,
        result: Result<ResultResponse, ApiError>,
    ) -> SelectOutcome {
        if !self.display.is_latest(ticket.generation) {
            debug!("Discarding stale result for {} ({})", ticket.file_id, ticket.generation);
            return SelectOutcome::Stale;
        }
        self.loading_result = None;

        match result {
            Ok(response) => {
                self.notice = Some(Notice::Info(format!(
                    "Showing analysis for {}",
                    response.filename
                )));
                self.current = Some(CurrentAnalysis {
                    file_id: ticket.file_id,
                    filename: response.filename,
                    metrics: response.metrics,
                    source: AnalysisSource::History,
                });
                SelectOutcome::Displayed
            }
            Err(err) => {
                let message = err.user_message(RESULT_FALLBACK_MESSAGE);
                self.notice = Some(Notice::Error(message.clone()));
                SelectOutcome::Failed(message)
            }
        }
    }

    // -------------------------------------------------------------------------
    // History refresh
    // -------------------------------------------------------------------------

    pub fn begin_refresh(&mut self) -> Generation {
        self.history.begin_refresh()
    }

    pub fn complete_refresh(
        &mut self,
        generation: Generation,
        result: Result<Vec<DocumentSummary>, ApiError>,
    ) -> RefreshOutcome {
        self.history.complete_refresh(generation, result)
    }
}
