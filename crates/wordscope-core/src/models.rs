//! Wire types exchanged with the analysis service.
//!
//! The service is the source of truth for every value here; the client never
//! computes metrics itself. Decoding is strict for identifiers and counts but
//! lenient in two places where the service is known to be loose:
//!
//! - `uploaded_at` may come with or without a UTC offset.
//! - `top_10_words` is decoded into [`TopWords::Malformed`] instead of failing
//!   the whole record when its shape is off, so the view can show a
//!   placeholder rather than an error.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::Deserializer;
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A previously analyzed document as listed by `GET /history/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Opaque identifier assigned by the service
    pub file_id: String,
    /// Original filename as uploaded
    pub filename: String,
    /// When the service received the upload
    #[serde(with = "lenient_timestamp")]
    pub uploaded_at: DateTime<Utc>,
}

/// One entry of the top-words frequency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// The `top_10_words` field of a metrics record.
///
/// On the wire this is a JSON array of `[word, count]` pairs, already sorted
/// by count descending. The order is preserved exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TopWords {
    /// Well-formed list (possibly empty)
    Ranked(Vec<WordCount>),
    /// Missing, not an array, or containing an entry that is not a
    /// `[string, positive integer]` pair
    #[default]
    Malformed,
}

impl TopWords {
    /// Entries in service order, or `None` when the field was malformed.
    pub fn entries(&self) -> Option<&[WordCount]> {
        match self {
            TopWords::Ranked(words) => Some(words),
            TopWords::Malformed => None,
        }
    }

    /// True when there is at least one entry worth rendering.
    pub fn has_entries(&self) -> bool {
        self.entries().is_some_and(|words| !words.is_empty())
    }

    fn from_value(value: &Value) -> Self {
        let Some(items) = value.as_array() else {
            return TopWords::Malformed;
        };

        let mut words = Vec::with_capacity(items.len());
        for item in items {
            match item.as_array().map(Vec::as_slice) {
                Some([Value::String(word), count]) => match count.as_u64() {
                    Some(count) if count > 0 => words.push(WordCount::new(word.clone(), count)),
                    _ => return TopWords::Malformed,
                },
                _ => return TopWords::Malformed,
            }
        }

        TopWords::Ranked(words)
    }
}

impl From<Vec<(&str, u64)>> for TopWords {
    fn from(pairs: Vec<(&str, u64)>) -> Self {
        TopWords::Ranked(
            pairs
                .into_iter()
                .map(|(word, count)| WordCount::new(word, count))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for TopWords {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(TopWords::from_value(&value))
    }
}

impl Serialize for TopWords {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TopWords::Ranked(words) => {
                let mut seq = serializer.serialize_seq(Some(words.len()))?;
                for entry in words {
                    seq.serialize_element(&(&entry.word, entry.count))?;
                }
                seq.end()
            }
            TopWords::Malformed => serializer.serialize_none(),
        }
    }
}

/// Text metrics computed by the service for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub total_word_count: u64,
    pub unique_word_count: u64,
    pub average_sentence_length: f64,
    pub flesch_kincaid_grade_level: f64,
    #[serde(default)]
    pub top_10_words: TopWords,
}

/// Body of a successful `POST /upload/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub file_id: String,
    pub filename: String,
    pub metrics: MetricsRecord,
}

/// Body of a successful `GET /results/<file_id>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultResponse {
    pub filename: String,
    pub metrics: MetricsRecord,
}

/// A file picked by the user, fully read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Parses the timestamp formats the service is known to emit.
///
/// Accepts RFC 3339 (`2025-06-29T12:00:00Z`, `...+02:00`) and naive ISO-8601
/// date-times (`2025-06-29T12:00:00.123456`), the latter read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

mod lenient_timestamp {
    use super::parse_timestamp;
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw)
            .ok_or_else(|| D::Error::custom(format!("unrecognized timestamp: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    const SAMPLE_UPLOAD: &str = r#"{
        "file_id": "abc123",
        "filename": "sample.txt",
        "metrics": {
            "total_word_count": 120,
            "unique_word_count": 80,
            "average_sentence_length": 12.5,
            "flesch_kincaid_grade_level": 8.1,
            "top_10_words": [["the", 10], ["a", 7]]
        }
    }"#;

    #[test]
    fn test_decode_upload_response() {
        let response: UploadResponse = serde_json::from_str(SAMPLE_UPLOAD).unwrap();
        assert_eq!(response.file_id, "abc123");
        assert_eq!(response.metrics.total_word_count, 120);
        assert_eq!(response.metrics.unique_word_count, 80);
        assert_eq!(
            response.metrics.top_10_words,
            TopWords::from(vec![("the", 10), ("a", 7)])
        );
    }

    #[test]
    fn test_top_words_order_is_preserved() {
        let top: TopWords = serde_json::from_str(r#"[["b", 2], ["a", 5]]"#).unwrap();
        let words: Vec<_> = top.entries().unwrap().iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["b", "a"]);
    }

    #[test]
    fn test_malformed_top_words_do_not_fail_record() {
        let cases = [
            r#""not a list""#,
            r#"[["the"]]"#,
            r#"[["the", -3]]"#,
            r#"[["the", 0]]"#,
            r#"[[10, "the"]]"#,
            r#"null"#,
        ];

        for case in cases {
            let json = format!(
                r#"{{"total_word_count": 3, "unique_word_count": 2,
                    "average_sentence_length": 3.0, "flesch_kincaid_grade_level": 1.2,
                    "top_10_words": {case}}}"#
            );
            let record: MetricsRecord = serde_json::from_str(&json).unwrap();
            assert_eq!(record.top_10_words, TopWords::Malformed, "case: {case}");
            assert!(!record.top_10_words.has_entries());
        }
    }

    #[test]
    fn test_missing_top_words_is_malformed() {
        let json = r#"{"total_word_count": 0, "unique_word_count": 0,
                       "average_sentence_length": 0, "flesch_kincaid_grade_level": 0}"#;
        let record: MetricsRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.top_10_words, TopWords::Malformed);
    }

    #[test]
    fn test_empty_top_words_is_ranked_but_empty() {
        let top: TopWords = serde_json::from_str("[]").unwrap();
        assert_eq!(top, TopWords::Ranked(vec![]));
        assert!(!top.has_entries());
    }

    #[test]
    fn test_top_words_serialize_as_pairs() {
        let top = TopWords::from(vec![("the", 10)]);
        assert_eq!(serde_json::to_string(&top).unwrap(), r#"[["the",10]]"#);
    }

    #[test]
    fn test_parse_naive_timestamp_as_utc() {
        let parsed = parse_timestamp("2025-06-29T12:00:00.123456").unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2025, 6, 29));
        assert_eq!(parsed.hour(), 12);
    }

    #[test]
    fn test_parse_offset_timestamp() {
        let parsed = parse_timestamp("2025-06-28T11:30:00+02:00").unwrap();
        assert_eq!(parsed.hour(), 9);
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_decode_history_entry() {
        let json = r#"[{"file_id": "def456", "filename": "another.txt",
                        "uploaded_at": "2025-06-28T09:30:00Z"}]"#;
        let docs: Vec<DocumentSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].file_id, "def456");
        assert_eq!(docs[0].uploaded_at.minute(), 30);
    }
}
