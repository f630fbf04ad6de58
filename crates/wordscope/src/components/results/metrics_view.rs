use dioxus::prelude::*;
use wordscope_core::presentation::{MetricsPresentation, ViewMode, WordBar};
use wordscope_core::MetricsRecord;

/// Metrics for the current analysis, as a table or a bar chart.
///
/// The table/chart choice is local to this component and resets on reload.
#[component]
pub fn MetricsView(metrics: Option<MetricsRecord>, filename: Option<String>) -> Element {
    let mut mode = use_signal(ViewMode::default);

    let (summary, words) = match MetricsPresentation::from_record(metrics.as_ref()) {
        MetricsPresentation::NoData => {
            return rsx! {
                section { class: "ws-metrics ws-metrics--empty",
                    p { class: "ws-placeholder", "No data" }
                }
            };
        }
        MetricsPresentation::Ready { summary, words } => (summary, words),
    };

    let next = mode().toggled();
    let next_label = next.label();

    rsx! {
        section { class: "ws-metrics",
            header { class: "ws-metrics-header",
                h2 { class: "ws-section-title", "Analysis" }
                if let Some(name) = filename {
                    span { class: "ws-metrics-filename", "{name}" }
                }
                button {
                    class: "ws-toggle-button",
                    onclick: move |_| mode.set(next),
                    "Show {next_label}"
                }
            }

            table { class: "ws-summary",
                tbody {
                    for row in summary {
                        tr { key: "{row.label}",
                            th { scope: "row", "{row.label}" }
                            td { "{row.value}" }
                        }
                    }
                }
            }

            h3 { class: "ws-subtitle", "Top words" }
            {match words {
                None => rsx! { p { class: "ws-placeholder", "No data" } },
                Some(bars) => match mode() {
                    ViewMode::Table => rsx! { TopWordsTable { bars } },
                    ViewMode::Chart => rsx! { TopWordsChart { bars } },
                },
            }}
        }
    }
}

#[component]
fn TopWordsTable(bars: Vec<WordBar>) -> Element {
    rsx! {
        table { class: "ws-top-words",
            thead {
                tr {
                    th { "#" }
                    th { "Word" }
                    th { "Count" }
                }
            }
            tbody {
                for bar in bars {
                    tr { key: "{bar.rank}",
                        td { "{bar.rank}" }
                        td { "{bar.word}" }
                        td { "{bar.count}" }
                    }
                }
            }
        }
    }
}

#[component]
fn TopWordsChart(bars: Vec<WordBar>) -> Element {
    rsx! {
        div { class: "ws-chart", role: "img", "aria-label": "Top words by count",
            for bar in bars {
                div { key: "{bar.rank}", class: "ws-chart-row",
                    span { class: "ws-chart-label", "{bar.word}" }
                    div { class: "ws-chart-track",
                        div {
                            class: "ws-chart-bar",
                            style: format!("width: {:.1}%", bar.width_pct),
                        }
                    }
                    span { class: "ws-chart-value", "{bar.count}" }
                }
            }
        }
    }
}
