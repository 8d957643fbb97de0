use super::{HISTORY_KEY, KeyValueStore};
use crate::error::HistoryError;
use crate::models::{HistoryEntry, is_reserved_marker};
use tracing::{debug, warn};

/// Maximum number of entries kept
pub const HISTORY_LIMIT: usize = 10;

/// Bounded, most-recent-first record of past results.
///
/// Every insertion reads the stored list, prepends, truncates and writes the
/// whole list back.
#[derive(Debug, Clone)]
pub struct HistoryStore<S> {
    storage: S,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// History persisted in `storage`
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Entries, newest first. Missing or unreadable history is empty and a
    /// record that fails to parse is skipped on its own.
    pub fn load_all(&self) -> Vec<HistoryEntry> {
        let raw = match self.storage.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(error = %err, "history unreadable, treating as empty");
                return Vec::new();
            }
        };
        let records = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "history corrupt, treating as empty");
                return Vec::new();
            }
        };
        records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                serde_json::from_value::<HistoryEntry>(record)
                    .inspect_err(|err| warn!(index, error = %err, "skipping bad history record"))
                    .ok()
            })
            .collect()
    }

    /// Prepend `entry`, keeping at most [`HISTORY_LIMIT`] entries.
    ///
    /// Returns the number of stored entries. Empty or status-marker text is
    /// rejected and nothing is written.
    pub fn append(&self, entry: HistoryEntry) -> Result<usize, HistoryError> {
        if entry.text.trim().is_empty() {
            return Err(HistoryError::EmptyText);
        }
        if is_reserved_marker(&entry.text) {
            return Err(HistoryError::ReservedMarker);
        }

        let mut entries = self.load_all();
        entries.insert(0, entry);
        entries.truncate(HISTORY_LIMIT);
        self.write(&entries)?;
        debug!(count = entries.len(), "history saved");
        Ok(entries.len())
    }

    /// Remove and return the entry at `index` (0 = newest)
    pub fn remove(&self, index: usize) -> Result<HistoryEntry, HistoryError> {
        let mut entries = self.load_all();
        if index >= entries.len() {
            return Err(HistoryError::OutOfRange(index));
        }
        let removed = entries.remove(index);
        self.write(&entries)?;
        Ok(removed)
    }

    /// Drop all entries
    pub fn clear(&self) -> Result<(), HistoryError> {
        self.storage.remove(HISTORY_KEY)?;
        Ok(())
    }

    fn write(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        let raw = serde_json::to_string(entries)?;
        self.storage.set(HISTORY_KEY, &raw)?;
        Ok(())
    }
}
