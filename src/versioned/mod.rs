//! Versioned Store Module
//!
//! Provides a per-key time-indexed map: each key holds a series of values
//! ordered by integer timestamp, queried with floor-lookup semantics.

mod concurrent;
mod store;


// Re-export public types
pub use concurrent::SharedVersionedStore;
pub use store::VersionedStore;
