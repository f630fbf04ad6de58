use dioxus::prelude::*;
use wordscope_core::formatting::{format_age, history_label};
use wordscope_core::DocumentSummary;

/// "Previous Analyses" list. Renders nothing when there are no entries.
#[component]
pub fn HistoryList(
    entries: Vec<DocumentSummary>,
    /// `file_id` currently shown in the metrics view
    active: Option<String>,
    /// `file_id` whose result is being fetched
    loading: Option<String>,
    on_select: EventHandler<String>,
) -> Element {
    if entries.is_empty() {
        return rsx! {};
    }

    rsx! {
        section { class: "ws-history",
            h2 { class: "ws-section-title", "Previous Analyses" }
            ul { class: "ws-history-list",
                for doc in entries {
                    HistoryRow {
                        key: "{doc.file_id}",
                        is_active: active.as_deref() == Some(doc.file_id.as_str()),
                        is_loading: loading.as_deref() == Some(doc.file_id.as_str()),
                        doc: doc.clone(),
                        on_select,
                    }
                }
            }
        }
    }
}

/// Click handler for a row: reports the row's `file_id` to `on_select`.
fn select_handler<E>(file_id: String, on_select: EventHandler<String>) -> impl FnMut(E) {
    move |_| on_select.call(file_id.clone())
}

#[component]
fn HistoryRow(
    doc: DocumentSummary,
    is_active: bool,
    is_loading: bool,
    on_select: EventHandler<String>,
) -> Element {
    let label = history_label(&doc);
    let age = format_age(&doc.uploaded_at);

    let class = match (is_active, is_loading) {
        (_, true) => "ws-history-item ws-history-item--loading",
        (true, false) => "ws-history-item ws-history-item--active",
        (false, false) => "ws-history-item",
    };

    rsx! {
        li { class,
            button {
                class: "ws-history-button",
                title: "{doc.file_id}",
                onclick: select_handler::<MouseEvent>(doc.file_id.clone(), on_select),
                span { class: "ws-history-label", "{label}" }
                span { class: "ws-history-age", "{age}" }
            }
        }
    }
}
