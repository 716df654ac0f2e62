//! Versioned Store
//!
//! Maps string keys to a timestamp-ordered series of values. Lookups use
//! floor semantics: the value at the greatest recorded timestamp at or
//! before the query timestamp.
//!
//! Each per-key series is a `BTreeMap` over timestamps, so floor lookups
//! and range scans are O(log n) in the number of versions rather than a
//! linear scan.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

// == Versioned Store ==
/// Single-threaded per-key versioned map.
///
/// Not safe for concurrent mutation; use [`SharedVersionedStore`] when the
/// store is shared across threads.
///
/// A key's series is created lazily on first `set` and removed entirely
/// once its last version is deleted, so the outer map never holds an empty
/// series.
///
/// [`SharedVersionedStore`]: crate::versioned::SharedVersionedStore
#[derive(Debug, Default)]
pub struct VersionedStore {
    /// Key to timestamp-ordered versions
    keys: HashMap<String, BTreeMap<i64, String>>,
}

impl VersionedStore {
    // == Constructor ==
    /// Creates a new empty versioned store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Records `value` as the state of `key` at `timestamp`.
    ///
    /// Overwrites any value previously recorded at that exact timestamp.
    /// Timestamps may arrive in any order across calls.
    pub fn set(&mut self, key: String, value: String, timestamp: i64) {
        self.keys.entry(key).or_default().insert(timestamp, value);
    }

    // == Get ==
    /// Returns the value at the greatest recorded timestamp <= `timestamp`.
    ///
    /// Returns `None` if the key was never set or every recorded timestamp
    /// exceeds the query timestamp. Values are returned by clone, never as
    /// references into the internal ordering.
    pub fn get(&self, key: &str, timestamp: i64) -> Option<String> {
        let series = self.keys.get(key)?;
        series
            .range(..=timestamp)
            .next_back()
            .map(|(_, value)| value.clone())
    }

    // == Delete ==
    /// Removes exactly the version at `timestamp`, if present.
    ///
    /// Removes the key entirely when its last version is deleted.
    pub fn delete(&mut self, key: &str, timestamp: i64) {
        if let Some(series) = self.keys.get_mut(key) {
            series.remove(&timestamp);
            if series.is_empty() {
                self.keys.remove(key);
            }
        }
    }

    // == Delete Up To ==
    /// Removes every version of `key` with timestamp <= `timestamp`.
    ///
    /// Removes the key entirely if no versions remain. Idempotent.
    pub fn delete_up_to(&mut self, key: &str, timestamp: i64) {
        if let Some(series) = self.keys.get_mut(key) {
            match timestamp.checked_add(1) {
                Some(bound) => *series = series.split_off(&bound),
                None => series.clear(),
            }
            if series.is_empty() {
                self.keys.remove(key);
            }
        }
    }

    // == Get Range ==
    /// Returns all values for `key` with timestamps in `[start, end]`,
    /// inclusive on both ends, in ascending timestamp order.
    ///
    /// Returns an empty vector for an unknown key or an empty range.
    pub fn get_range(&self, key: &str, start: i64, end: i64) -> Vec<String> {
        if start > end {
            return Vec::new();
        }
        match self.keys.get(key) {
            Some(series) => series
                .range(start..=end)
                .map(|(_, value)| value.clone())
                .collect(),
            None => Vec::new(),
        }
    }

    // == Prune ==
    /// Removes, across all keys, every version with timestamp strictly less
    /// than `max_age` (an absolute cutoff, not an elapsed duration).
    ///
    /// Keys left without versions are removed. Returns the number of
    /// versions removed.
    pub fn prune(&mut self, max_age: i64) -> usize {
        let mut removed = 0;
        self.keys.retain(|_, series| {
            let kept = series.split_off(&max_age);
            removed += series.len();
            *series = kept;
            !series.is_empty()
        });
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
        self.keys.get(key).map_or(0, BTreeMap::len)
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
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_new() {
        let store = VersionedStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_store_floor_lookup() {
        let mut store = VersionedStore::new();

        store.set("k".to_string(), "v1".to_string(), 1);
        store.set("k".to_string(), "v2".to_string(), 5);

        assert_eq!(store.get("k", 3), Some("v1".to_string()));
        assert_eq!(store.get("k", 5), Some("v2".to_string()));
        assert_eq!(store.get("k", 100), Some("v2".to_string()));
        assert_eq!(store.get("k", 0), None);
    }

    #[test]
    fn test_store_get_unknown_key() {
        let store = VersionedStore::new();
        assert_eq!(store.get("missing", 10), None);
    }

    #[test]
    fn test_store_same_timestamp_overwrites() {
        let mut store = VersionedStore::new();

        store.set("k".to_string(), "old".to_string(), 7);
        store.set("k".to_string(), "new".to_string(), 7);

        assert_eq!(store.get("k", 7), Some("new".to_string()));
        assert_eq!(store.version_count("k"), 1);
    }

    #[test]
    fn test_store_out_of_order_timestamps() {
        let mut store = VersionedStore::new();

        store.set("k".to_string(), "late".to_string(), 10);
        store.set("k".to_string(), "early".to_string(), 2);

        assert_eq!(store.get("k", 5), Some("early".to_string()));
        assert_eq!(store.get("k", 10), Some("late".to_string()));
    }

    #[test]
    fn test_store_delete_version() {
        let mut store = VersionedStore::new();

        store.set("k".to_string(), "v1".to_string(), 1);
        store.set("k".to_string(), "v2".to_string(), 5);
        store.delete("k", 5);

        assert_eq!(store.get("k", 10), Some("v1".to_string()));
        assert_eq!(store.version_count("k"), 1);
    }

    #[test]
    fn test_store_delete_missing_timestamp_is_noop() {
        let mut store = VersionedStore::new();

        store.set("k".to_string(), "v1".to_string(), 1);
        store.delete("k", 99);

        assert_eq!(store.get("k", 1), Some("v1".to_string()));
    }

    #[test]
    fn test_store_delete_last_version_removes_key() {
        let mut store = VersionedStore::new();

        store.set("k".to_string(), "v1".to_string(), 1);
        store.delete("k", 1);

        assert!(!store.contains_key("k"));
        assert_eq!(store.get("k", 10), None);
        assert!(store.get_range("k", 0, 100).is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_delete_up_to() {
        let mut store = VersionedStore::new();

        store.set("k".to_string(), "v1".to_string(), 1);
        store.set("k".to_string(), "v2".to_string(), 5);
        store.set("k".to_string(), "v3".to_string(), 9);

        // Inclusive cutoff: versions at 1 and 5 go, 9 stays
        store.delete_up_to("k", 5);

        assert_eq!(store.get("k", 5), None);
        assert_eq!(store.get("k", 9), Some("v3".to_string()));
        assert_eq!(store.version_count("k"), 1);
    }

    #[test]
    fn test_store_delete_up_to_idempotent() {
        let mut store = VersionedStore::new();

        store.set("k".to_string(), "v1".to_string(), 1);
        store.set("k".to_string(), "v2".to_string(), 5);

        store.delete_up_to("k", 3);
        let after_once = store.get_range("k", i64::MIN, i64::MAX);
        store.delete_up_to("k", 3);
        let after_twice = store.get_range("k", i64::MIN, i64::MAX);

        assert_eq!(after_once, after_twice);
        assert_eq!(after_once, vec!["v2".to_string()]);
    }

    #[test]
    fn test_store_delete_up_to_empties_key() {
        let mut store = VersionedStore::new();

        store.set("k".to_string(), "v1".to_string(), 1);
        store.delete_up_to("k", 1);

        assert!(!store.contains_key("k"));
    }

    #[test]
    fn test_store_delete_up_to_max_timestamp() {
        let mut store = VersionedStore::new();

        store.set("k".to_string(), "v".to_string(), i64::MAX);
        store.delete_up_to("k", i64::MAX);

        assert!(!store.contains_key("k"));
    }

    #[test]
    fn test_store_get_range_boundaries() {
        let mut store = VersionedStore::new();

        store.set("k".to_string(), "a".to_string(), 1);
        store.set("k".to_string(), "b".to_string(), 3);
        store.set("k".to_string(), "c".to_string(), 5);
        store.set("k".to_string(), "d".to_string(), 7);

        // Both endpoints are inclusive
        assert_eq!(store.get_range("k", 3, 5), vec!["b", "c"]);
        assert_eq!(store.get_range("k", 1, 7), vec!["a", "b", "c", "d"]);
        assert_eq!(store.get_range("k", 4, 4), Vec::<String>::new());
    }

    #[test]
    fn test_store_get_range_unknown_key() {
        let store = VersionedStore::new();
        assert!(store.get_range("missing", 0, 100).is_empty());
    }

    #[test]
    fn test_store_get_range_inverted_bounds() {
        let mut store = VersionedStore::new();

        store.set("k".to_string(), "a".to_string(), 1);
        assert!(store.get_range("k", 5, 1).is_empty());
    }

    #[test]
    fn test_store_prune() {
        let mut store = VersionedStore::new();

        store.set("a".to_string(), "a1".to_string(), 1);
        store.set("a".to_string(), "a2".to_string(), 10);
        store.set("b".to_string(), "b1".to_string(), 2);

        // Strict cutoff: versions at 1 and 2 go, 10 stays
        let removed = store.prune(5);

        assert_eq!(removed, 2);
        assert_eq!(store.get("a", 100), Some("a2".to_string()));
        assert!(!store.contains_key("b"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_prune_keeps_versions_at_cutoff() {
        let mut store = VersionedStore::new();

        store.set("k".to_string(), "at".to_string(), 5);
        let removed = store.prune(5);

        assert_eq!(removed, 0);
        assert_eq!(store.get("k", 5), Some("at".to_string()));
    }

    #[test]
    fn test_store_independent_keys() {
        let mut store = VersionedStore::new();

        store.set("x".to_string(), "xv".to_string(), 1);
        store.set("y".to_string(), "yv".to_string(), 1);
        store.delete("x", 1);

        assert_eq!(store.get("y", 1), Some("yv".to_string()));
        assert_eq!(store.len(), 1);
    }
}
