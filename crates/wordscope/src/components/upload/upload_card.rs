use dioxus::html::{FileData, HasFileData};
use dioxus::logger::tracing::debug;
use dioxus::prelude::*;
use wordscope_core::config::{accept_attribute, MAX_UPLOAD_BYTES};
use wordscope_core::session::Session;
use wordscope_core::upload::{first_file, DragEventKind};
use wordscope_core::workflow::FileSource;

use crate::components::{use_session, use_session_actions, SessionAction};
use crate::utils::SignalExt;

/// A file handed over by the browser (or the desktop webview), unread.
#[derive(Clone)]
pub struct PickedFile(FileData);

impl PickedFile {
    pub fn new(file: FileData) -> Self {
        Self(file)
    }
}

#[async_trait::async_trait(?Send)]
impl FileSource for PickedFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn size(&self) -> u64 {
        self.0.size()
    }

    async fn read_bytes(&self) -> Result<Vec<u8>, String> {
        self.0
            .read_bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| e.to_string())
    }
}

/// Feeds a drag event to the session's drop zone and suppresses the
/// browser's default navigation when asked to.
///
/// The session is only written when the highlight actually changes, so the
/// stream of `dragover` events does not re-render the app.
fn apply_drag(mut session: Signal<Session>, evt: &DragEvent, kind: DragEventKind) -> bool {
    let (changes_zone, response) = {
        let state = session.peek();
        (state.drag_changes_zone(kind), state.drag_response(kind))
    };
    if changes_zone {
        session.mutate(|s| s.handle_drag(kind));
    }
    if response.prevent_default {
        evt.prevent_default();
    }
    response.take_first_file
}

/// Upload card: file picker plus drop zone, disabled while an upload runs.
///
/// Picker and drop both end in the same `SessionAction::Upload`, so the
/// controller's validation applies to either path.
#[component]
pub fn UploadCard() -> Element {
    let session = use_session();
    let actions = use_session_actions();

    let state = session.read();
    let busy = state.is_upload_busy();
    let drop_active = state.drop_zone().is_active();
    let status = state.upload_state().status_text();
    let is_error = state.upload_state().is_error();
    drop(state);

    let submit = move |files: Vec<FileData>| {
        if let Some(file) = first_file(files) {
            debug!("Selected {}", file.name());
            actions.send(SessionAction::Upload(PickedFile::new(file)));
        }
    };

    let zone_class = match (drop_active, busy) {
        (_, true) => "ws-dropzone ws-dropzone--disabled",
        (true, false) => "ws-dropzone ws-dropzone--active",
        (false, false) => "ws-dropzone",
    };
    let status_class = if is_error {
        "ws-upload-status ws-upload-status--error"
    } else {
        "ws-upload-status"
    };
    let limit_mb = MAX_UPLOAD_BYTES / (1024 * 1024);
    let accept = accept_attribute();

    rsx! {
        section { class: "ws-upload-card",
            div {
                class: zone_class,
                "aria-disabled": busy,
                ondragenter: move |evt: DragEvent| {
                    apply_drag(session, &evt, DragEventKind::Enter);
                },
                ondragover: move |evt: DragEvent| {
                    apply_drag(session, &evt, DragEventKind::Over);
                },
                ondragleave: move |evt: DragEvent| {
                    apply_drag(session, &evt, DragEventKind::Leave);
                },
                ondrop: move |evt: DragEvent| {
                    if apply_drag(session, &evt, DragEventKind::Drop) {
                        submit(evt.files());
                    }
                },

                div { class: "ws-dropzone-icon", "📄" }
                div { class: "ws-dropzone-title", "Analyze a text document" }
                div { class: "ws-dropzone-subtitle",
                    "Drop a {accept} file here or choose one (up to {limit_mb} MB)."
                }

                label {
                    class: if busy { "ws-upload-button ws-upload-button--disabled" } else { "ws-upload-button" },
                    input {
                        r#type: "file",
                        class: "ws-hidden-input",
                        accept: "{accept}",
                        disabled: busy,
                        onchange: move |evt: FormEvent| submit(evt.files()),
                    }
                    if busy { "Uploading…" } else { "Choose File" }
                }
            }

            if let Some(text) = status {
                p { class: status_class, role: "status", "{text}" }
            }
        }
    }
}
