//! History domain model.
//!
//! A bounded, deduplicated, most-recent-first record of generated icons.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PictogramError, Result};

/// Maximum number of entries kept.
pub const MAX_HISTORY_ITEMS: usize = 20;

/// A generated icon together with the prompt that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub prompt: String,
    /// Canonical (pretty-printed) markup. Identity for deduplication.
    pub svg: String,
    /// ISO-8601 timestamp with millisecond precision.
    pub date: String,
}

impl HistoryItem {
    pub fn new(prompt: impl Into<String>, svg: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            prompt: prompt.into(),
            svg: svg.into(),
            date: date.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Creates an item stamped with the current time.
    pub fn now(prompt: impl Into<String>, svg: impl Into<String>) -> Self {
        Self::new(prompt, svg, Utc::now())
    }
}

/// The ordered history sequence.
///
/// Invariants hold after every mutation: at most [`MAX_HISTORY_ITEMS`]
/// entries, no two entries with byte-identical `svg`, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    items: Vec<HistoryItem>,
}

impl History {
    /// Builds a history from stored items, re-establishing the invariants.
    pub fn from_items(items: Vec<HistoryItem>) -> Self {
        let mut history = Self::default();
        // Oldest first so the stored order survives re-insertion.
        for item in items.into_iter().rev() {
            history.add(item);
        }
        history
    }

    /// Inserts `item` at the front.
    ///
    /// Any existing entry with the same `svg` is removed first and the
    /// sequence is truncated to [`MAX_HISTORY_ITEMS`].
    pub fn add(&mut self, item: HistoryItem) {
        self.items.retain(|existing| existing.svg != item.svg);
        self.items.insert(0, item);
        self.items.truncate(MAX_HISTORY_ITEMS);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items, most recent first.
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Serializes the sequence as a JSON array.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.items)?)
    }

    /// Parses a stored JSON array.
    ///
    /// Any parse failure is reported as [`PictogramError::StorageCorrupt`].
    pub fn from_json(payload: &str) -> Result<Self> {
        let items: Vec<HistoryItem> = serde_json::from_str(payload)
            .map_err(|e| PictogramError::storage_corrupt(e.to_string()))?;
        Ok(Self::from_items(items))
    }
}
