//! Version history
//!
//! Every successful generation appends an entry; every successful
//! refinement rewrites the entry it refined. Reconciliation finds that
//! entry by content equality (markup and styles) against the
//! pre-refinement artifact, scanning from the most recent entry
//! backward so that when duplicates exist the latest one absorbs the
//! change. Entries keep their position, request text, and timestamp for
//! the whole session; nothing is persisted across sessions.

use chrono::{DateTime, Utc};
use tracing::debug;

use vitrine_artifact::UiArtifact;

/// One remembered generation.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// The request that produced the artifact.
    pub request: String,
    /// The artifact as of the latest refinement.
    pub artifact: UiArtifact,
    /// When the entry was recorded.
    pub created_at: DateTime<Utc>,
}

/// Append-ordered, capped history of generated artifacts.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
    max_entries: usize,
}

impl SessionHistory {
    /// Empty history keeping at most `max_entries` entries.
    #[inline]
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    /// Record a fresh generation, evicting the oldest entry once full.
    pub fn record(&mut self, request: impl Into<String>, artifact: UiArtifact) {
        self.entries.push(HistoryEntry {
            request: request.into(),
            artifact,
            created_at: Utc::now(),
        });
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }
    }

    /// Swap the refined artifact into the entry it came from.
    ///
    /// Scans from the most recent entry backward for one content-equal
    /// to `before` and replaces its artifact in place, keeping request,
    /// position, and timestamp. Returns the replaced index, or `None`
    /// when no entry matches (the current artifact was never recorded,
    /// e.g. after repeated refinement of a restored version).
    pub fn reconcile(&mut self, before: &UiArtifact, after: UiArtifact) -> Option<usize> {
        let index = self
            .entries
            .iter()
            .rposition(|entry| entry.artifact.content_eq(before))?;
        self.entries[index].artifact = after;
        debug!(index, "reconciled refined artifact into history");
        Some(index)
    }

    /// All entries, oldest first.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entry at `index`, if recorded.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// The most recent entry.
    #[inline]
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Recorded entry count.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether anything has been recorded.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn artifact(markup: &str) -> UiArtifact {
        UiArtifact::new(markup)
    }

    #[test]
    fn record_appends_in_order() {
        let mut history = SessionHistory::new(10);
        history.record("a button", artifact("<button>1</button>"));
        history.record("a card", artifact("<div>2</div>"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].request, "a button");
        assert_eq!(history.latest().unwrap().request, "a card");
    }

    #[test]
    fn cap_evicts_oldest() {
        let mut history = SessionHistory::new(2);
        history.record("one", artifact("<p>1</p>"));
        history.record("two", artifact("<p>2</p>"));
        history.record("three", artifact("<p>3</p>"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].request, "two");
    }

    #[test]
    fn reconcile_rewrites_matching_entry_in_place() {
        let mut history = SessionHistory::new(10);
        history.record("a button", artifact("<button>old</button>"));
        history.record("a card", artifact("<div>card</div>"));

        let before = artifact("<button>old</button>");
        let index = history.reconcile(&before, artifact("<button>new</button>"));
        assert_eq!(index, Some(0));
        assert_eq!(history.entries()[0].artifact.markup, "<button>new</button>");
        // request text survives the rewrite
        assert_eq!(history.entries()[0].request, "a button");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn reconcile_prefers_most_recent_duplicate() {
        let mut history = SessionHistory::new(10);
        history.record("first try", artifact("<p>same</p>"));
        history.record("second try", artifact("<p>same</p>"));

        let index = history.reconcile(&artifact("<p>same</p>"), artifact("<p>refined</p>"));
        assert_eq!(index, Some(1));
        assert_eq!(history.entries()[0].artifact.markup, "<p>same</p>");
        assert_eq!(history.entries()[1].artifact.markup, "<p>refined</p>");
    }

    #[test]
    fn reconcile_without_match_leaves_history_alone() {
        let mut history = SessionHistory::new(10);
        history.record("a button", artifact("<button>x</button>"));

        let index = history.reconcile(&artifact("<p>never recorded</p>"), artifact("<p>new</p>"));
        assert_eq!(index, None);
        assert_eq!(history.entries()[0].artifact.markup, "<button>x</button>");
    }

    #[test]
    fn content_equality_ignores_script_changes() {
        // matching considers markup and styles, not script
        let mut history = SessionHistory::new(10);
        let mut recorded = artifact("<p>x</p>");
        recorded.script = "a();".to_string();
        history.record("scripted", recorded);

        let mut before = artifact("<p>x</p>");
        before.script = "b();".to_string();
        let index = history.reconcile(&before, artifact("<p>y</p>"));
        assert_eq!(index, Some(0));
    }
}
