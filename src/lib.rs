//! Timekv - In-memory key-value stores
//!
//! Provides two independent, in-process data structures:
//! - [`LruCache`]: a fixed-capacity cache with O(1) get/set and
//!   least-recently-used eviction.
//! - [`VersionedStore`] / [`SharedVersionedStore`]: a per-key time-indexed
//!   map with floor lookups, range queries, and pruning; the shared variant
//!   is safe for concurrent use via per-key lock striping.

pub mod cache;
pub mod config;
pub mod error;
pub mod versioned;

pub use cache::{CacheStats, LruCache};
pub use config::Config;
pub use error::{Result, TimekvError};
pub use versioned::{SharedVersionedStore, VersionedStore};
