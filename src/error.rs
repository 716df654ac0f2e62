//! Error types for the timekv stores
//!
//! Provides unified error handling using thiserror.
//!
//! Absence is never an error in this crate: cache and store lookups return
//! `Option` because a missing key is a normal outcome. Errors are reserved
//! for genuine failures such as malformed configuration.

use thiserror::Error;

// == Timekv Error Enum ==
/// Unified error type for the timekv crate.
#[derive(Error, Debug)]
pub enum TimekvError {
    /// A configuration value could not be parsed
    #[error("Invalid configuration for {var}: {value:?}")]
    InvalidConfig { var: &'static str, value: String },
}

// == Result Type Alias ==
/// Convenience Result type for the timekv crate.
pub type Result<T> = std::result::Result<T, TimekvError>;
