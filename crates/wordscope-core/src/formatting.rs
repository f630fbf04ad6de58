//! Formatting utilities for human-readable output.
//!
//! Shared by the app and the CLI so history entries and metric values read
//! the same everywhere.

use chrono::{DateTime, Utc};

use crate::models::DocumentSummary;

/// Format a duration in seconds as a relative age.
///
/// # Examples
///
/// ```
/// use wordscope_core::formatting::format_duration;
///
/// assert_eq!(format_duration(30), "Just now");
/// assert_eq!(format_duration(120), "2 mins ago");
/// assert_eq!(format_duration(7200), "2 hours ago");
/// assert_eq!(format_duration(172800), "2 days ago");
/// ```
pub fn format_duration(seconds: u64) -> String {
    let plural = |count: u64, unit: &str| {
        if count == 1 {
            format!("1 {} ago", unit)
        } else {
            format!("{} {}s ago", count, unit)
        }
    };

    match seconds {
        0..=59 => "Just now".to_string(),
        60..=3599 => plural(seconds / 60, "min"),
        3600..=86399 => plural(seconds / 3600, "hour"),
        _ => plural(seconds / 86400, "day"),
    }
}

/// Upload time as `YYYY-MM-DD HH:MM` (UTC).
pub fn format_uploaded_at(uploaded_at: &DateTime<Utc>) -> String {
    uploaded_at.format("%Y-%m-%d %H:%M").to_string()
}

/// Age of `then` relative to `now`. Future timestamps read as "Just now".
pub fn relative_age(then: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(*then).num_seconds().max(0);
    format_duration(elapsed as u64)
}

/// Age of `then` relative to the current time.
pub fn format_age(then: &DateTime<Utc>) -> String {
    relative_age(then, &Utc::now())
}

/// Label for a history entry: `"<filename> – <YYYY-MM-DD HH:MM>"`.
pub fn history_label(doc: &DocumentSummary) -> String {
    format!("{} – {}", doc.filename, format_uploaded_at(&doc.uploaded_at))
}

/// Fixed two-decimal rendering for averages and grade levels.
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        "–".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_format_duration_buckets() {
        assert_eq!(format_duration(0), "Just now");
        assert_eq!(format_duration(59), "Just now");
        assert_eq!(format_duration(60), "1 min ago");
        assert_eq!(format_duration(3599), "59 mins ago");
        assert_eq!(format_duration(3600), "1 hour ago");
        assert_eq!(format_duration(86399), "23 hours ago");
        assert_eq!(format_duration(86400), "1 day ago");
        assert_eq!(format_duration(31536000), "365 days ago");
    }

    #[test]
    fn test_history_label() {
        let doc = DocumentSummary {
            file_id: "abc123".into(),
            filename: "sample.txt".into(),
            uploaded_at: Utc.with_ymd_and_hms(2025, 6, 29, 9, 5, 42).unwrap(),
        };
        assert_eq!(history_label(&doc), "sample.txt – 2025-06-29 09:05");
    }

    #[test]
    fn test_relative_age() {
        let now = Utc.with_ymd_and_hms(2025, 6, 29, 12, 0, 0).unwrap();
        assert_eq!(relative_age(&(now - Duration::minutes(5)), &now), "5 mins ago");
        assert_eq!(relative_age(&(now + Duration::hours(1)), &now), "Just now");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(12.5), "12.50");
        assert_eq!(format_decimal(3.0), "3.00");
        assert_eq!(format_decimal(-1.2), "-1.20");
        assert_eq!(format_decimal(f64::NAN), "–");
    }
}
