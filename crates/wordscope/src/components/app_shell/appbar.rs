use dioxus::prelude::*;
use wordscope_core::metrics::{global_metrics, RequestSnapshot};
use wordscope_core::upload::UploadState;

use crate::components::{use_service_status, use_session};

/// Reachability of the analysis service, from the `/health` probe
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ServiceStatus {
    Checking,
    Online,
    Offline,
}

fn latency_label(name: &str, snapshot: &RequestSnapshot) -> Option<String> {
    snapshot
        .avg_ms
        .map(|avg| format!("{} {:.0} ms", name, avg))
}

/// Global app bar with logo and status pills
#[component]
pub fn AppBar() -> Element {
    let service_status = use_service_status();
    let session = use_session();

    let service_pill = match service_status() {
        ServiceStatus::Checking => rsx! {
            span { class: "ws-status-pill ws-status-pill--muted",
                span { class: "ws-status-dot ws-status-dot--muted" }
                "Service: checking…"
            }
        },
        ServiceStatus::Online => rsx! {
            span { class: "ws-status-pill ws-status-pill--ok",
                span { class: "ws-status-dot ws-status-dot--ok" }
                "Service: online"
            }
        },
        ServiceStatus::Offline => rsx! {
            span { class: "ws-status-pill ws-status-pill--error",
                span { class: "ws-status-dot ws-status-dot--error" }
                "Service: unreachable"
            }
        },
    };

    // Subscribes to the session so the pills refresh after every request
    let activity = match session.read().upload_state() {
        UploadState::Selecting { filename } | UploadState::Uploading { filename } => {
            Some(format!("Uploading {}…", filename))
        }
        _ => None,
    };

    let activity_pill = match activity {
        Some(text) => rsx! {
            span { class: "ws-status-pill ws-status-pill--warn",
                span { class: "ws-status-dot ws-status-dot--warn" }
                "{text}"
            }
        },
        None => rsx! { Fragment {} },
    };

    let snapshot = global_metrics().snapshot();
    let latency: Vec<String> = [
        latency_label("Upload", &snapshot.upload),
        latency_label("History", &snapshot.history),
        latency_label("Result", &snapshot.result),
    ]
    .into_iter()
    .flatten()
    .collect();
    let latency_text = latency.join(" • ");

    rsx! {
        header { class: "ws-appbar",
            div { class: "ws-appbar-left",
                div { class: "ws-logo",
                    span { class: "ws-logo-word", "Word" }
                    span { class: "ws-logo-word ws-logo-word--accent", "scope" }
                }
            }
            div { class: "ws-appbar-right",
                {activity_pill}
                {service_pill}
                if !latency_text.is_empty() {
                    span { class: "ws-status-pill ws-status-pill--muted", title: "Average latency, last 60 s",
                        "{latency_text}"
                    }
                }
            }
        }
    }
}
