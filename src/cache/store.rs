//! LRU Cache Module
//!
//! Fixed-capacity cache combining a HashMap index with the arena-backed
//! recency list, giving O(1) average get/set and least-recently-used
//! eviction.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::list::{NodeIndex, RecencyList};
use crate::cache::CacheStats;

// == LRU Cache ==
/// Fixed-capacity cache mapping string keys to integer values.
///
/// The index maps each key to its node in the recency list, so both lookup
/// and recency updates are O(1). The two structures stay mutually
/// consistent: every indexed key has exactly one node and vice versa.
///
/// Not safe for concurrent mutation; callers sharing an instance across
/// threads must serialize access externally.
#[derive(Debug)]
pub struct LruCache {
    /// Key to recency-list node index
    index: HashMap<String, NodeIndex>,
    /// Entries ordered from least to most recently used
    order: RecencyList,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl LruCache {
    // == Constructor ==
    /// Creates a new cache holding at most `capacity` entries.
    ///
    /// A capacity of 0 is valid and stores nothing: every `set` is evicted
    /// immediately.
    pub fn new(capacity: usize) -> Self {
        Self {
            index: HashMap::new(),
            order: RecencyList::new(),
            stats: CacheStats::new(),
            capacity,
        }
    }

    /// Creates a cache sized from a [`Config`](crate::Config).
    pub fn with_config(config: &crate::Config) -> Self {
        Self::new(config.cache_capacity)
    }

    // == Set ==
    /// Inserts or updates `key` with `value`.
    ///
    /// Updating an existing key counts as an access: the old node is
    /// unlinked and the entry re-appended at the most-recently-used end.
    /// If the insertion pushes the cache over capacity, the least recently
    /// used entry is evicted exactly once.
    pub fn set(&mut self, key: String, value: i64) {
        if let Some(node) = self.index.remove(&key) {
            self.order.remove(node);
        }

        let node = self.order.push_back(key.clone(), value);
        self.index.insert(key, node);

        if self.index.len() > self.capacity {
            let (evicted, _) = self.order.pop_front();
            self.index.remove(&evicted);
            self.stats.record_eviction();
            debug!("Evicted least recently used key: {}", evicted);
        }

        self.stats.set_total_entries(self.index.len());
    }

    // == Get ==
    /// Returns the value for `key`, marking it most recently used.
    ///
    /// Returns `None` for an unknown key; a miss is a normal outcome, not an
    /// error, and never inserts an entry.
    pub fn get(&mut self, key: &str) -> Option<i64> {
        match self.index.get(key) {
            Some(&node) => {
                self.order.move_to_back(node);
                self.stats.record_hit();
                Some(self.order.value(node))
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek LRU ==
    /// Returns the current eviction candidate without touching recency.
    pub fn peek_lru(&self) -> Option<(&str, i64)> {
        self.order.front()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    // == Capacity ==
    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
