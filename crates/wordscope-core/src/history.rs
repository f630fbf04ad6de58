//! Previously analyzed documents.
//!
//! The store is a mirror of `GET /history/`: every refresh replaces the list
//! wholesale and nothing is ever inserted locally. Refreshes are fenced by a
//! generation counter so a slow earlier response cannot overwrite a newer one.

use tracing::{debug, warn};

use crate::models::DocumentSummary;
use crate::session::{Generation, GenerationCounter};

/// Result of applying a finished refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// List replaced; holds the new length
    Updated(usize),
    /// Request failed; previous list kept
    Failed,
    /// A later refresh was issued; response discarded
    Stale,
}

/// Ordered list of [`DocumentSummary`], most recent first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryStore {
    entries: Vec<DocumentSummary>,
    generations: GenerationCounter,
    loaded: bool,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[DocumentSummary] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True once at least one refresh has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn find(&self, file_id: &str) -> Option<&DocumentSummary> {
        self.entries.iter().find(|doc| doc.file_id == file_id)
    }

    /// Issues the generation for a new refresh request.
    pub fn begin_refresh(&mut self) -> Generation {
        self.generations.issue()
    }

    /// Applies a finished refresh if it is still the latest one issued.
    pub fn complete_refresh<E: std::fmt::Display>(
        &mut self,
        generation: Generation,
        result: Result<Vec<DocumentSummary>, E>,
    ) -> RefreshOutcome {
        if !self.generations.is_latest(generation) {
            debug!("Discarding stale history refresh {}", generation);
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(entries) => {
                self.entries = entries;
                self.loaded = true;
                RefreshOutcome::Updated(self.entries.len())
            }
            Err(err) => {
                warn!("History refresh failed, keeping {} entries: {}", self.entries.len(), err);
                RefreshOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn doc(id: &str) -> DocumentSummary {
        DocumentSummary {
            file_id: id.to_string(),
            filename: format!("{id}.txt"),
            uploaded_at: Utc.with_ymd_and_hms(2025, 6, 29, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_refresh_replaces_wholesale() {
        let mut store = HistoryStore::new();
        let generation = store.begin_refresh();
        let outcome = store.complete_refresh::<String>(generation, Ok(vec![doc("a"), doc("b")]));
        assert_eq!(outcome, RefreshOutcome::Updated(2));

        let generation = store.begin_refresh();
        store.complete_refresh::<String>(generation, Ok(vec![doc("c")]));
        assert_eq!(store.len(), 1);
        assert!(store.find("a").is_none());
        assert_eq!(store.find("c").unwrap().filename, "c.txt");
    }

    #[test]
    fn test_failed_refresh_keeps_previous_list() {
        let mut store = HistoryStore::new();
        let generation = store.begin_refresh();
        store.complete_refresh::<String>(generation, Ok(vec![doc("a")]));

        let generation = store.begin_refresh();
        let outcome = store.complete_refresh(generation, Err("connection refused"));
        assert_eq!(outcome, RefreshOutcome::Failed);
        assert_eq!(store.entries(), &[doc("a")]);
    }

    #[test]
    fn test_stale_refresh_is_discarded() {
        let mut store = HistoryStore::new();
        let slow = store.begin_refresh();
        let fast = store.begin_refresh();

        store.complete_refresh::<String>(fast, Ok(vec![doc("new")]));
        let outcome = store.complete_refresh::<String>(slow, Ok(vec![doc("old")]));

        assert_eq!(outcome, RefreshOutcome::Stale);
        assert_eq!(store.entries(), &[doc("new")]);
    }

    #[test]
    fn test_empty_until_loaded() {
        let store = HistoryStore::new();
        assert!(store.is_empty());
        assert!(!store.is_loaded());
    }
}
