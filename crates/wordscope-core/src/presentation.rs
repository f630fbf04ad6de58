//! View model for the metrics view.
//!
//! The metrics view is a pure function of `Option<&MetricsRecord>`. This
//! module does all of the shaping (summary rows, bar widths, "No data"
//! decisions) so the Dioxus components and the CLI only have to lay out
//! strings.
//!
//! Top words are always rendered in the order the service sent them, with
//! exactly as many entries as were sent: no re-sorting, no padding.

use crate::formatting::format_decimal;
use crate::models::{MetricsRecord, TopWords};

/// Table or chart rendering of the top words. Local, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Table,
    Chart,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Table => ViewMode::Chart,
            ViewMode::Chart => ViewMode::Table,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Table => "Table",
            ViewMode::Chart => "Chart",
        }
    }
}

/// One label/value line of the summary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: String,
}

/// One bar of the top-words chart (also used for table rows).
#[derive(Debug, Clone, PartialEq)]
pub struct WordBar {
    /// 1-based position in service order
    pub rank: usize,
    pub word: String,
    pub count: u64,
    /// Width relative to the largest count, in `0.0..=100.0`
    pub width_pct: f64,
}

/// Everything the metrics view needs.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricsPresentation {
    /// No record: show the placeholder
    NoData,
    Ready {
        summary: Vec<SummaryRow>,
        /// `None` when the list is empty or malformed
        words: Option<Vec<WordBar>>,
    },
}

impl MetricsPresentation {
    pub fn from_record(record: Option<&MetricsRecord>) -> Self {
        match record {
            None => MetricsPresentation::NoData,
            Some(record) => MetricsPresentation::Ready {
                summary: summary_rows(record),
                words: word_bars(&record.top_10_words),
            },
        }
    }
}

pub fn summary_rows(record: &MetricsRecord) -> Vec<SummaryRow> {
    vec![
        SummaryRow {
            label: "Total words",
            value: record.total_word_count.to_string(),
        },
        SummaryRow {
            label: "Unique words",
            value: record.unique_word_count.to_string(),
        },
        SummaryRow {
            label: "Average sentence length",
            value: format_decimal(record.average_sentence_length),
        },
        SummaryRow {
            label: "Flesch–Kincaid grade",
            value: format_decimal(record.flesch_kincaid_grade_level),
        },
    ]
}

/// Bars for the top-words series, or `None` if there is nothing to draw.
pub fn word_bars(top_words: &TopWords) -> Option<Vec<WordBar>> {
    let entries = top_words.entries().filter(|words| !words.is_empty())?;
    let max = entries.iter().map(|entry| entry.count).max().unwrap_or(1).max(1);

    Some(
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| WordBar {
                rank: index + 1,
                word: entry.word.clone(),
                count: entry.count,
                width_pct: entry.count as f64 / max as f64 * 100.0,
            })
            .collect(),
    )
}
