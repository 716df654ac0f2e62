//! Cache Module
//!
//! Provides a fixed-capacity in-memory cache with LRU eviction.

mod list;
mod stats;
mod store;


// Re-export public types
pub use list::{NodeIndex, RecencyList};
pub use stats::CacheStats;
pub use store::LruCache;
