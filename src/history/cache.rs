use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use anyhow::Result;
use tracing::{debug, warn};

use super::store::KeyValueStore;

/// Storage key the history list lives under
pub const HISTORY_KEY: &str = "translationHistory";

/// Most entries kept; inserting past this drops the oldest
pub const MAX_HISTORY_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub source: String,
    pub target: String,
    /// Epoch millis
    pub timestamp: i64,
}

impl HistoryEntry {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Short age label relative to `now`: "Just now", "5m ago", "3h ago",
    /// or the local date once a day has passed.
    pub fn relative_time(&self, now: DateTime<Utc>) -> String {
        let diff = now.timestamp_millis() - self.timestamp;

        if diff < 60_000 {
            "Just now".to_string()
        } else if diff < 3_600_000 {
            format!("{}m ago", diff / 60_000)
        } else if diff < 86_400_000 {
            format!("{}h ago", diff / 3_600_000)
        } else {
            DateTime::<Utc>::from_timestamp_millis(self.timestamp)
                .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        }
    }
}

/// Newest-first, capped list of past translations.
///
/// Write-through: every mutation persists the whole list before returning, so
/// the store and the in-memory list never diverge. Callers sharing a cache
/// across tasks must serialize mutations (see `AppState`).
pub struct HistoryCache {
    store: Arc<dyn KeyValueStore>,
    entries: Vec<HistoryEntry>,
}

impl HistoryCache {
    /// Read the persisted list once. A missing key is an empty history.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let mut entries = match store.get(HISTORY_KEY)? {
            None => Vec::new(),
            Some(value) => match serde_json::from_value::<Vec<HistoryEntry>>(value) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Discarding unreadable translation history: {}", e);
                    Vec::new()
                }
            },
        };
        entries.truncate(MAX_HISTORY_ENTRIES);

        debug!("Loaded {} history entries", entries.len());
        Ok(Self { store, entries })
    }

    /// Prepend `entry`, evicting the oldest past the cap, then persist
    pub fn add(&mut self, entry: HistoryEntry) -> Result<()> {
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY_ENTRIES);
        self.persist()
    }

    /// Drop every entry and persist the empty list. Confirmation is the
    /// caller's job.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.persist()
    }

    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) -> Result<()> {
        self.store
            .set(HISTORY_KEY, serde_json::to_value(&self.entries)?)
    }
}
