//! Upload lifecycle state machine and file selection.
//!
//! Both input paths (native file picker and drag-and-drop) funnel into the
//! same entry point, [`UploadController::select`], so accepted-type checks
//! run no matter how the file arrived. Selection auto-submits: there is no
//! "armed but not submitted" state.
//!
//! # Transitions
//!
//! | From                       | Event            | To           |
//! |----------------------------|------------------|--------------|
//! | Idle / Succeeded / Failed  | valid selection  | Selecting    |
//! | Idle / Succeeded / Failed  | invalid selection| Failed       |
//! | Idle / Selecting / ...     | begin            | Uploading    |
//! | Selecting                  | read failure     | Failed       |
//! | Uploading                  | success          | Succeeded    |
//! | Uploading                  | failure          | Failed       |
//! | Uploading                  | select / begin   | (refused)    |

use std::path::Path;

use crate::config::{accept_attribute, ACCEPTED_EXTENSIONS, MAX_UPLOAD_BYTES};
use crate::error::ValidationError;
use crate::models::MetricsRecord;

/// Where the upload lifecycle currently is.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UploadState {
    /// Nothing selected yet
    #[default]
    Idle,
    /// A valid file was chosen and is being read into memory
    Selecting { filename: String },
    /// The request is in flight
    Uploading { filename: String },
    /// The service accepted and analyzed the file
    Succeeded {
        file_id: String,
        filename: String,
        metrics: MetricsRecord,
    },
    /// Validation, read, or service failure
    Failed { message: String },
}

impl UploadState {
    /// True while the selection surface must be disabled.
    ///
    /// `Selecting` counts as busy: the file is already on its way to the
    /// service and a second pick would start a second upload.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            UploadState::Selecting { .. } | UploadState::Uploading { .. }
        )
    }

    /// Status line for the upload card, if there is anything to say.
    pub fn status_text(&self) -> Option<String> {
        match self {
            UploadState::Idle => None,
            UploadState::Selecting { filename } => Some(format!("Reading {}…", filename)),
            UploadState::Uploading { filename } => Some(format!("Uploading {}…", filename)),
            UploadState::Succeeded { file_id, .. } => {
                Some(format!("Uploaded! File ID: {}", file_id))
            }
            UploadState::Failed { message } => Some(message.clone()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, UploadState::Failed { .. })
    }
}

/// Checks a candidate file against the accepted types and size limits.
pub fn validate_selection(filename: &str, size: u64) -> Result<(), ValidationError> {
    if filename.trim().is_empty() {
        return Err(ValidationError::NoFile);
    }

    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()));

    let accepted = extension
        .as_deref()
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext));
    if !accepted {
        return Err(ValidationError::UnsupportedType {
            filename: filename.to_string(),
            accepted: accept_attribute(),
        });
    }

    if size == 0 {
        return Err(ValidationError::EmptyFile(filename.to_string()));
    }

    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge {
            filename: filename.to_string(),
            size,
        });
    }

    Ok(())
}

/// Owns the [`UploadState`] and enforces the at-most-one-upload rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadController {
    state: UploadState,
}

impl UploadController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Accepts a file from the picker or a drop.
    ///
    /// While busy the call is refused and the state is left alone, so the
    /// in-flight upload keeps reporting. Any other rejection is recorded as
    /// `Failed` so the user sees why nothing happened.
    pub fn select(&mut self, filename: &str, size: u64) -> Result<(), ValidationError> {
        if self.state.is_busy() {
            return Err(ValidationError::UploadInProgress);
        }

        match validate_selection(filename, size) {
            Ok(()) => {
                self.state = UploadState::Selecting {
                    filename: filename.to_string(),
                };
                Ok(())
            }
            Err(err) => {
                self.state = UploadState::Failed {
                    message: err.to_string(),
                };
                Err(err)
            }
        }
    }

    /// Moves to `Uploading` once the file content is in hand.
    ///
    /// Validation runs again against the actual byte count, since the size
    /// reported at selection time may differ from what was read.
    pub fn begin(&mut self, filename: &str, size: u64) -> Result<(), ValidationError> {
        if matches!(self.state, UploadState::Uploading { .. }) {
            return Err(ValidationError::UploadInProgress);
        }

        if let Err(err) = validate_selection(filename, size) {
            self.state = UploadState::Failed {
                message: err.to_string(),
            };
            return Err(err);
        }

        self.state = UploadState::Uploading {
            filename: filename.to_string(),
        };
        Ok(())
    }

    /// Reading the selected file failed before anything was sent.
    pub fn abort_selection(&mut self, message: impl Into<String>) {
        if matches!(self.state, UploadState::Selecting { .. }) {
            self.state = UploadState::Failed {
                message: message.into(),
            };
        }
    }

    pub fn succeed(&mut self, file_id: String, filename: String, metrics: MetricsRecord) {
        self.state = UploadState::Succeeded {
            file_id,
            filename,
            metrics,
        };
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = UploadState::Failed {
            message: message.into(),
        };
    }
}

// =============================================================================
// Drag-and-drop
// =============================================================================

/// Browser drag events the drop zone reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEventKind {
    Enter,
    Over,
    Leave,
    Drop,
}

/// What the caller must do after feeding an event to [`DropZone::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropResponse {
    /// Call `prevent_default()` so the browser does not navigate to the file
    pub prevent_default: bool,
    /// Take the first dropped file and run it through the normal selection
    pub take_first_file: bool,
}

/// Visual and behavioural state of the drop target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropZone {
    active: bool,
}

impl DropResponse {
    /// Response to a drag event; depends only on the event and whether the
    /// zone is disabled.
    pub fn for_event(kind: DragEventKind, disabled: bool) -> Self {
        match kind {
            DragEventKind::Enter | DragEventKind::Over => DropResponse {
                prevent_default: true,
                take_first_file: false,
            },
            DragEventKind::Leave => DropResponse {
                prevent_default: false,
                take_first_file: false,
            },
            DragEventKind::Drop => DropResponse {
                prevent_default: true,
                take_first_file: !disabled,
            },
        }
    }
}

impl DropZone {
    /// Whether a drag is hovering (drives the highlight style).
    pub fn is_active(&self) -> bool {
        self.active
    }

    fn active_after(kind: DragEventKind, disabled: bool) -> bool {
        match kind {
            DragEventKind::Enter | DragEventKind::Over => !disabled,
            DragEventKind::Leave | DragEventKind::Drop => false,
        }
    }

    /// True when `handle` would flip the highlight for this event.
    ///
    /// `dragover` fires continuously; callers use this to skip state writes
    /// that would not change anything.
    pub fn would_change(&self, kind: DragEventKind, disabled: bool) -> bool {
        Self::active_after(kind, disabled) != self.active
    }

    /// Applies a drag event.
    ///
    /// When `disabled` (an upload is running) the highlight never turns on
    /// and drops are swallowed, but default navigation is still suppressed so
    /// a stray drop cannot replace the page.
    pub fn handle(&mut self, kind: DragEventKind, disabled: bool) -> DropResponse {
        self.active = Self::active_after(kind, disabled);
        DropResponse::for_event(kind, disabled)
    }
}

/// Picks the file to upload from a multi-file drop or picker event.
///
/// Only the first file is used; the rest are ignored without error.
pub fn first_file<T>(files: Vec<T>) -> Option<T> {
    let ignored = files.len().saturating_sub(1);
    if ignored > 0 {
        tracing::debug!("Ignoring {} extra dropped file(s)", ignored);
    }
    files.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TopWords;

    fn metrics() -> MetricsRecord {
        MetricsRecord {
            total_word_count: 3,
            unique_word_count: 3,
            average_sentence_length: 3.0,
            flesch_kincaid_grade_level: 1.0,
            top_10_words: TopWords::from(vec![("one", 1)]),
        }
    }

    #[test]
    fn test_validate_accepts_txt_any_case() {
        assert!(validate_selection("notes.txt", 10).is_ok());
        assert!(validate_selection("NOTES.TXT", 10).is_ok());
        assert!(validate_selection("archive.tar.txt", 10).is_ok());
    }

    #[test]
    fn test_validate_rejects_other_types() {
        for name in ["photo.png", "README", "txt", ".txt.exe", "report.pdf"] {
            assert!(
                matches!(
                    validate_selection(name, 10),
                    Err(ValidationError::UnsupportedType { .. })
                ),
                "{name} should be rejected"
            );
        }
        assert_eq!(validate_selection("", 10), Err(ValidationError::NoFile));
    }

    #[test]
    fn test_validate_size_limits() {
        assert_eq!(
            validate_selection("empty.txt", 0),
            Err(ValidationError::EmptyFile("empty.txt".into()))
        );
        assert!(validate_selection("max.txt", MAX_UPLOAD_BYTES).is_ok());
        assert!(matches!(
            validate_selection("big.txt", MAX_UPLOAD_BYTES + 1),
            Err(ValidationError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut controller = UploadController::new();
        assert_eq!(controller.state(), &UploadState::Idle);

        controller.select("sample.txt", 12).unwrap();
        assert!(controller.state().is_busy());

        controller.begin("sample.txt", 12).unwrap();
        assert!(matches!(controller.state(), UploadState::Uploading { .. }));

        controller.succeed("abc123".into(), "sample.txt".into(), metrics());
        assert!(!controller.state().is_busy());
        assert_eq!(
            controller.state().status_text().as_deref(),
            Some("Uploaded! File ID: abc123")
        );
    }

    #[test]
    fn test_second_selection_refused_while_uploading() {
        let mut controller = UploadController::new();
        controller.begin("first.txt", 5).unwrap();

        assert_eq!(
            controller.select("second.txt", 5),
            Err(ValidationError::UploadInProgress)
        );
        assert_eq!(
            controller.begin("second.txt", 5),
            Err(ValidationError::UploadInProgress)
        );
        assert_eq!(
            controller.state(),
            &UploadState::Uploading {
                filename: "first.txt".into()
            }
        );
    }

    #[test]
    fn test_invalid_selection_is_reported() {
        let mut controller = UploadController::new();
        assert!(controller.select("image.png", 100).is_err());
        assert!(controller.state().is_error());
        assert_eq!(
            controller.state().status_text().as_deref(),
            Some("Only .txt files are supported.")
        );

        // A failed state does not block the next attempt
        controller.select("good.txt", 100).unwrap();
        assert!(matches!(controller.state(), UploadState::Selecting { .. }));
    }

    #[test]
    fn test_abort_selection_only_from_selecting() {
        let mut controller = UploadController::new();
        controller.abort_selection("ignored");
        assert_eq!(controller.state(), &UploadState::Idle);

        controller.select("a.txt", 1).unwrap();
        controller.abort_selection("Failed to read a.txt");
        assert_eq!(
            controller.state().status_text().as_deref(),
            Some("Failed to read a.txt")
        );
    }

    #[test]
    fn test_drop_zone_protocol() {
        let mut zone = DropZone::default();

        let response = zone.handle(DragEventKind::Enter, false);
        assert!(zone.is_active());
        assert!(response.prevent_default);

        zone.handle(DragEventKind::Over, false);
        assert!(zone.is_active());

        let response = zone.handle(DragEventKind::Leave, false);
        assert!(!zone.is_active());
        assert!(!response.take_first_file);

        zone.handle(DragEventKind::Over, false);
        let response = zone.handle(DragEventKind::Drop, false);
        assert!(!zone.is_active());
        assert!(response.prevent_default);
        assert!(response.take_first_file);
    }

    #[test]
    fn test_drop_zone_disabled_swallows_drop() {
        let mut zone = DropZone::default();
        zone.handle(DragEventKind::Over, true);
        assert!(!zone.is_active());

        let response = zone.handle(DragEventKind::Drop, true);
        assert!(response.prevent_default);
        assert!(!response.take_first_file);
    }

    #[test]
    fn test_repeated_dragover_needs_no_update() {
        let mut zone = DropZone::default();
        assert!(zone.would_change(DragEventKind::Enter, false));
        zone.handle(DragEventKind::Enter, false);

        assert!(!zone.would_change(DragEventKind::Over, false));
        assert!(!zone.would_change(DragEventKind::Over, false));
        assert!(zone.would_change(DragEventKind::Leave, false));
        assert!(zone.would_change(DragEventKind::Drop, false));

        let idle = DropZone::default();
        assert!(!idle.would_change(DragEventKind::Over, true));
        assert!(!idle.would_change(DragEventKind::Leave, false));
        assert_eq!(
            DropResponse::for_event(DragEventKind::Over, true),
            DropResponse {
                prevent_default: true,
                take_first_file: false,
            }
        );
    }

    #[test]
    fn test_first_file_ignores_extras() {
        assert_eq!(first_file(vec!["a.txt", "b.txt"]), Some("a.txt"));
        assert_eq!(first_file(Vec::<&str>::new()), None);
    }
}
