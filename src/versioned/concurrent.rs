//! Shared Versioned Store
//!
//! Concurrency-safe variant of [`VersionedStore`] using per-key lock
//! striping: the outer map is a `DashMap`, so new keys are inserted without
//! a global lock, and each per-key series sits behind its own mutex held
//! for the full duration of any operation that traverses it.
//!
//! Operations on different keys never block each other beyond transient
//! shard access; operations on the same key are mutually exclusive, so
//! racing calls observe a serializable ordering.
//!
//! Lock order is always outer shard, then series mutex. `set` acquires the
//! series lock before releasing the shard guard, and key cleanup re-checks
//! emptiness under both locks via `remove_if`, so a version recorded by a
//! completed `set` cannot be stranded in a detached series.
//!
//! [`VersionedStore`]: crate::versioned::VersionedStore

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::debug;

/// Timestamp-ordered versions for one key, behind that key's lock stripe.
type Series = Arc<Mutex<BTreeMap<i64, String>>>;

// == Shared Versioned Store ==
/// Per-key versioned map safe for concurrent use.
///
/// All methods take `&self`; the store can be shared across threads behind
/// a plain `Arc`. Semantics match [`VersionedStore`] operation for
/// operation.
///
/// [`VersionedStore`]: crate::versioned::VersionedStore
#[derive(Debug, Default)]
pub struct SharedVersionedStore {
    /// Key to lock-striped series
    keys: DashMap<String, Series>,
}

impl SharedVersionedStore {
    // == Constructor ==
    /// Creates a new empty shared store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Records `value` as the state of `key` at `timestamp`, overwriting
    /// any value at that exact timestamp.
    pub fn set(&self, key: &str, value: String, timestamp: i64) {
        let entry = self.keys.entry(key.to_string()).or_default();
        let series = Arc::clone(entry.value());
        let mut guard = series.lock();
        // Series lock is held before the shard guard drops, so concurrent
        // cleanup cannot remove the key between lookup and insert.
        drop(entry);
        guard.insert(timestamp, value);
    }

    // == Get ==
    /// Returns the value at the greatest recorded timestamp <= `timestamp`,
    /// or `None` if the key is unknown or every version is newer.
    pub fn get(&self, key: &str, timestamp: i64) -> Option<String> {
        let series = Arc::clone(self.keys.get(key)?.value());
        let guard = series.lock();
        guard
            .range(..=timestamp)
            .next_back()
            .map(|(_, value)| value.clone())
    }

    // == Delete ==
    /// Removes exactly the version at `timestamp`, if present; removes the
    /// key when its last version is deleted.
    pub fn delete(&self, key: &str, timestamp: i64) {
        let Some(series) = self.lookup(key) else {
            return;
        };
        let emptied = {
            let mut guard = series.lock();
            guard.remove(&timestamp);
            guard.is_empty()
        };
        if emptied {
            self.remove_if_empty(key);
        }
    }

    // == Delete Up To ==
    /// Removes every version of `key` with timestamp <= `timestamp`,
    /// cleaning up the key if no versions remain. Idempotent.
    pub fn delete_up_to(&self, key: &str, timestamp: i64) {
        let Some(series) = self.lookup(key) else {
            return;
        };
        let emptied = {
            let mut guard = series.lock();
            match timestamp.checked_add(1) {
                Some(bound) => {
                    let kept = guard.split_off(&bound);
                    *guard = kept;
                }
                None => guard.clear(),
            }
            guard.is_empty()
        };
        if emptied {
            self.remove_if_empty(key);
        }
    }

    // == Get Range ==
    /// Returns all values for `key` with timestamps in `[start, end]`
    /// inclusive, in ascending timestamp order.
    pub fn get_range(&self, key: &str, start: i64, end: i64) -> Vec<String> {
        if start > end {
            return Vec::new();
        }
        match self.lookup(key) {
            Some(series) => {
                let guard = series.lock();
                guard
                    .range(start..=end)
                    .map(|(_, value)| value.clone())
                    .collect()
            }
            None => Vec::new(),
        }
    }

    // == Prune ==
    /// Removes, across all keys, every version with timestamp strictly less
    /// than `max_age`; keys left empty are removed. Returns the number of
    /// versions removed.
    ///
    /// Keys are snapshotted up front; a key inserted while the prune runs
    /// is not guaranteed to be visited.
    pub fn prune(&self, max_age: i64) -> usize {
        let mut removed = 0;
        let snapshot: Vec<String> = self.keys.iter().map(|entry| entry.key().clone()).collect();
        for key in snapshot {
            let Some(series) = self.lookup(&key) else {
                continue;
            };
            let emptied = {
                let mut guard = series.lock();
                let kept = guard.split_off(&max_age);
                removed += guard.len();
                *guard = kept;
                guard.is_empty()
            };
            if emptied {
                self.remove_if_empty(&key);
            }
        }
        if removed > 0 {
            debug!("Prune removed {} versions older than {}", removed, max_age);
        }
        removed
    }

    // == Contains Key ==
    /// Returns true if `key` has at least one version.
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    // == Version Count ==
    /// Returns the number of versions recorded for `key`.
    pub fn version_count(&self, key: &str) -> usize {
        match self.lookup(key) {
            Some(series) => series.lock().len(),
            None => 0,
        }
    }

    // == Length ==
    /// Returns the number of keys with at least one version.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    // == Internal ==
    /// Clones the series handle for `key`, releasing the shard guard before
    /// the caller takes the series lock.
    fn lookup(&self, key: &str) -> Option<Series> {
        self.keys.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Removes `key` only if its series is still empty, re-checking under
    /// the shard lock so cleanup cannot race a concurrent `set`.
    fn remove_if_empty(&self, key: &str) {
        self.keys.remove_if(key, |_, series| series.lock().is_empty());
    }
}
