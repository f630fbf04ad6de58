//! UI components for the Wordscope client.
//!
//! - `app_shell`: AppBar (status pills), Footer
//! - `upload`: UploadCard with picker and drop zone
//! - `results`: HistoryList, MetricsView
//!
//! # Context Providers
//!
//! [`App`] provides three contexts to the tree:
//!
//! ```ignore
//! let session = use_session();          // Signal<Session>, read to render
//! let actions = use_session_actions();  // send SessionAction to start work
//! let status = use_service_status();    // Signal<ServiceStatus>
//! ```
//!
//! Components never call the API directly. They send a [`SessionAction`]
//! and the coroutine in [`App`] runs the matching core workflow, each in its
//! own task so history clicks are not blocked behind a running upload.

mod app_shell;
mod results;
mod upload;

pub use app_shell::{AppBar, Footer, ServiceStatus};
pub use results::{HistoryList, MetricsView};
pub use upload::{PickedFile, UploadCard};

use std::rc::Rc;

use dioxus::logger::tracing::{debug, info, warn};
use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedReceiver;
use futures_util::StreamExt;
use wordscope_core::config::ApiConfig;
use wordscope_core::session::{SelectOutcome, Session};
use wordscope_core::workflow::{
    check_health, refresh_history, select_and_upload, select_document, UploadOutcome,
};
use wordscope_core::{AnalysisApi, HttpAnalysisClient};

use crate::utils::signal_ext::SessionSignal;

/// Work requested by components.
pub enum SessionAction {
    /// A file arrived from the picker or a drop
    Upload(PickedFile),
    /// A history entry was clicked
    OpenDocument(String),
    RefreshHistory,
    CheckHealth,
}

/// Shared handle to the analysis service.
#[derive(Clone)]
pub struct ApiHandle(Rc<dyn AnalysisApi>);

impl ApiHandle {
    pub fn http(config: ApiConfig) -> Self {
        Self(Rc::new(HttpAnalysisClient::new(config)))
    }

    pub fn api(&self) -> &dyn AnalysisApi {
        self.0.as_ref()
    }
}

pub fn use_session() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

pub fn use_session_actions() -> Coroutine<SessionAction> {
    use_context::<Coroutine<SessionAction>>()
}

pub fn use_service_status() -> Signal<ServiceStatus> {
    use_context::<Signal<ServiceStatus>>()
}

/// Service configuration, with the base URL taken from `WORDSCOPE_API_URL`
/// at build time when it is set.
fn build_config() -> ApiConfig {
    ApiConfig::from_override(option_env!("WORDSCOPE_API_URL"))
}

async fn run_action(
    action: SessionAction,
    api: ApiHandle,
    session: SessionSignal,
    mut status: Signal<ServiceStatus>,
    history_limit: usize,
) {
    match action {
        SessionAction::Upload(file) => {
            match select_and_upload(api.api(), &session, &file, history_limit).await {
                UploadOutcome::Succeeded { file_id, displayed } => {
                    info!("✅ Analysis ready for {} (displayed: {})", file_id, displayed);
                }
                UploadOutcome::Failed(message) => warn!("Upload failed: {}", message),
                UploadOutcome::Rejected(err) => debug!("Selection rejected: {}", err),
            }
        }
        SessionAction::OpenDocument(file_id) => {
            if select_document(api.api(), &session, &file_id).await == SelectOutcome::Displayed {
                info!("📄 Showing stored analysis {}", file_id);
            }
        }
        SessionAction::RefreshHistory => {
            refresh_history(api.api(), &session, history_limit).await;
        }
        SessionAction::CheckHealth => {
            let online = check_health(api.api()).await;
            status.set(if online {
                ServiceStatus::Online
            } else {
                ServiceStatus::Offline
            });
        }
    }
}

#[component]
pub fn App() -> Element {
    let config = use_hook(build_config);
    let history_limit = config.history_limit();
    let api_url = config.base_url().to_string();

    let api = use_hook(|| ApiHandle::http(config.clone()));

    let session = use_signal(Session::new);
    use_context_provider(|| session);

    let service_status = use_signal(|| ServiceStatus::Checking);
    use_context_provider(|| service_status);

    let actions = use_coroutine(move |mut rx: UnboundedReceiver<SessionAction>| {
        let api = api.clone();
        async move {
            while let Some(action) = rx.next().await {
                spawn(run_action(
                    action,
                    api.clone(),
                    SessionSignal(session),
                    service_status,
                    history_limit,
                ));
            }
        }
    });
    use_context_provider(|| actions);

    // Initial history load and liveness probe
    use_hook(|| {
        actions.send(SessionAction::RefreshHistory);
        actions.send(SessionAction::CheckHealth);
    });

    let state = session.read();
    let history = state.history().entries().to_vec();
    let current = state.current().cloned();
    let loading = state.loading_result().map(str::to_string);
    let notice = state
        .notice()
        .map(|notice| (notice.text().to_string(), notice.is_error()));
    drop(state);

    let active = current.as_ref().map(|c| c.file_id.clone());
    let filename = current.as_ref().map(|c| c.filename.clone());
    let metrics = current.map(|c| c.metrics);

    rsx! {
        div { class: "ws-app",
            AppBar {}

            main { class: "ws-main",
                div { class: "ws-column ws-column--inputs",
                    UploadCard {}
                    HistoryList {
                        entries: history,
                        active,
                        loading,
                        on_select: move |file_id: String| {
                            actions.send(SessionAction::OpenDocument(file_id));
                        },
                    }
                }

                div { class: "ws-column ws-column--results",
                    if let Some((text, is_error)) = notice {
                        p {
                            class: if is_error { "ws-notice ws-notice--error" } else { "ws-notice" },
                            role: if is_error { "alert" } else { "status" },
                            "{text}"
                        }
                    }
                    MetricsView { metrics, filename }
                }
            }

            Footer { api_url }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordscope_core::config::API_URL_ENV;

    #[test]
    fn test_build_config_uses_shared_env_name() {
        // option_env! only takes a literal
        assert_eq!(API_URL_ENV, "WORDSCOPE_API_URL");
        let expected = option_env!("WORDSCOPE_API_URL")
            .map(ApiConfig::new)
            .unwrap_or_default();
        assert_eq!(build_config(), expected);
    }
}
