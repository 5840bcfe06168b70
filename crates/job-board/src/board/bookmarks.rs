use std::collections::BTreeSet;

use serde_json::Value;
use tracing::{debug, warn};

use super::catalog::JobId;
use super::storage::{KeyValueStore, StorageError};

/// Storage key holding the JSON array of bookmarked ids.
pub const BOOKMARKS_KEY: &str = "bookmarks";

/// Bookmarked job ids, written through to a [`KeyValueStore`] on every change.
///
/// The in-memory set is authoritative for the session. Persistence is best
/// effort: a failed write is logged and the set keeps the new value.
#[derive(Debug)]
pub struct BookmarkStore<S> {
    store: S,
    ids: BTreeSet<JobId>,
}

impl<S> BookmarkStore<S>
where
    S: KeyValueStore,
{
    /// Restore bookmarks from `store`. Missing or unreadable state yields an empty set.
    pub fn load(store: S) -> Self {
        let ids = match store.read(BOOKMARKS_KEY) {
            Ok(Some(raw)) => parse_ids(&raw),
            Ok(None) => BTreeSet::new(),
            Err(err) => {
                warn!(error = %err, "bookmark storage unreadable, starting empty");
                BTreeSet::new()
            }
        };
        debug!(count = ids.len(), "bookmarks loaded");
        Self { store, ids }
    }

    /// Flip membership of `job_id` and persist. Returns the new membership.
    pub fn toggle(&mut self, job_id: JobId) -> bool {
        let bookmarked = if self.ids.remove(&job_id) {
            false
        } else {
            self.ids.insert(job_id);
            true
        };

        if let Err(err) = self.persist() {
            warn!(%job_id, error = %err, "bookmark change not persisted");
        }
        bookmarked
    }

    /// Keep only ids accepted by `keep`, persisting when anything was removed.
    /// Returns how many ids were dropped.
    pub fn retain(&mut self, keep: impl Fn(JobId) -> bool) -> usize {
        let before = self.ids.len();
        self.ids.retain(|job_id| keep(*job_id));
        let dropped = before - self.ids.len();

        if dropped > 0 {
            if let Err(err) = self.persist() {
                warn!(dropped, error = %err, "pruned bookmarks not persisted");
            }
        }
        dropped
    }

    pub fn contains(&self, job_id: JobId) -> bool {
        self.ids.contains(&job_id)
    }

    /// Current ids in ascending order.
    pub fn ids(&self) -> Vec<JobId> {
        self.ids.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&self) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&self.ids)?;
        self.store.write(BOOKMARKS_KEY, encoded)
    }
}

// Entries that are not valid ids are skipped; the rest of the array survives.
fn parse_ids(raw: &str) -> BTreeSet<JobId> {
    let entries = match serde_json::from_str::<Vec<Value>>(raw) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(error = %err, "persisted bookmarks malformed, starting empty");
            return BTreeSet::new();
        }
    };

    let valid: Vec<u32> = entries
        .iter()
        .filter_map(Value::as_u64)
        .filter_map(|id| u32::try_from(id).ok())
        .collect();
    if valid.len() < entries.len() {
        warn!(
            skipped = entries.len() - valid.len(),
            "ignored invalid persisted bookmark ids"
        );
    }
    valid.into_iter().map(JobId).collect()
}
