//! Configuration Module
//!
//! Handles loading store defaults from environment variables, for embedding
//! applications that want to size the cache without hardcoding a capacity.

use std::env;

use crate::error::{Result, TimekvError};

/// Store configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the recency cache can hold
    pub cache_capacity: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Unset variables fall back to defaults; a set-but-unparseable variable
    /// is an error rather than a silent default.
    ///
    /// # Environment Variables
    /// - `TIMEKV_CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            cache_capacity: parse_var("TIMEKV_CACHE_CAPACITY", 1000)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 1000,
        }
    }
}

/// Parses an environment variable, falling back to `default` when unset.
fn parse_var(var: &'static str, default: usize) -> Result<usize> {
    match env::var(var) {
        Ok(value) => value
            .parse()
            .map_err(|_| TimekvError::InvalidConfig { var, value }),
        Err(_) => Ok(default),
    }
}
