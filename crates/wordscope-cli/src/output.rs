//! Output formatting for analyses, history and health checks.
//!
//! Supports both human-readable terminal output and JSON for scripting.
//! JSON output keeps the service's field names so it can be piped into the
//! same tooling that consumes the API directly.

use chrono::{DateTime, Utc};
use serde::Serialize;
use wordscope_core::formatting::{history_label, relative_age};
use wordscope_core::presentation::{summary_rows, word_bars};
use wordscope_core::{DocumentSummary, MetricsRecord};

use crate::commands::AnalysisReport;

/// Width of a full-length bar in the top-words chart
const BAR_WIDTH: usize = 24;

/// JSON output structure for a single analysis
#[derive(Serialize)]
pub struct JsonAnalysis<'a> {
    pub file_id: &'a str,
    pub filename: &'a str,
    pub metrics: &'a MetricsRecord,
}

#[derive(Serialize)]
pub struct JsonHealth<'a> {
    pub status: &'static str,
    pub api_url: &'a str,
}

pub fn render_analysis(report: &AnalysisReport, json: bool) -> String {
    if json {
        format_analysis_json(report)
    } else {
        format_analysis_human(report)
    }
}

pub fn render_history(entries: &[DocumentSummary], json: bool) -> String {
    if json {
        format_history_json(entries)
    } else {
        format_history_human(entries, &Utc::now())
    }
}

pub fn render_health(api_url: &str, json: bool) -> String {
    if json {
        let output = JsonHealth {
            status: "ok",
            api_url,
        };
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    } else {
        format!("Analysis service at {} is up", api_url)
    }
}

pub fn format_analysis_json(report: &AnalysisReport) -> String {
    let output = JsonAnalysis {
        file_id: &report.file_id,
        filename: &report.filename,
        metrics: &report.metrics,
    };
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

/// Formats an analysis as a summary table followed by a top-words chart.
pub fn format_analysis_human(report: &AnalysisReport) -> String {
    let mut output = format!("{} (file id: {})\n\n", report.filename, report.file_id);

    let rows = summary_rows(&report.metrics);
    let label_width = rows.iter().map(|row| row.label.chars().count()).max().unwrap_or(0);
    for row in &rows {
        let padding = label_width - row.label.chars().count();
        output.push_str(&format!(
            "  {}{}  {}\n",
            row.label,
            " ".repeat(padding),
            row.value
        ));
    }

    output.push_str("\nTop words:\n");
    match word_bars(&report.metrics.top_10_words) {
        None => output.push_str("  No data\n"),
        Some(bars) => {
            let word_width = bars.iter().map(|bar| bar.word.chars().count()).max().unwrap_or(0);
            for bar in bars {
                let padding = word_width - bar.word.chars().count();
                let filled = ((bar.width_pct / 100.0) * BAR_WIDTH as f64).round() as usize;
                output.push_str(&format!(
                    "  {:>2}. {}{}  {:>5}  {}\n",
                    bar.rank,
                    bar.word,
                    " ".repeat(padding),
                    bar.count,
                    "█".repeat(filled.max(1))
                ));
            }
        }
    }

    output.trim_end().to_string()
}

pub fn format_history_json(entries: &[DocumentSummary]) -> String {
    serde_json::to_string_pretty(entries).unwrap_or_else(|_| "[]".to_string())
}

/// Formats history entries, most recent first, with ages relative to `now`.
pub fn format_history_human(entries: &[DocumentSummary], now: &DateTime<Utc>) -> String {
    if entries.is_empty() {
        return "No previous analyses".to_string();
    }

    let mut output = format!(
        "{} previous analys{}:\n\n",
        entries.len(),
        if entries.len() == 1 { "is" } else { "es" }
    );
    for doc in entries {
        output.push_str(&format!(
            "  {}  {} ({})\n",
            doc.file_id,
            history_label(doc),
            relative_age(&doc.uploaded_at, now)
        ));
    }

    output.trim_end().to_string()
}
