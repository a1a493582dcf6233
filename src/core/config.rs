use serde::{Deserialize, Serialize};
use crate::core::error::{Error, Result};

/// Settings for an [`IndexedStore`](crate::store::registry::IndexedStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Shortest name substring that gets an index entry
    pub min_substring_len: usize,
    /// Cached name queries; 0 disables the cache
    pub name_cache_capacity: usize,
    /// Records to reserve room for up front
    pub initial_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            min_substring_len: 3,       // substrings of length > 2
            name_cache_capacity: 128,
            initial_capacity: 0,
        }
    }
}

impl StoreConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: StoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_substring_len == 0 {
            return Err(Error::invalid_argument("min_substring_len must be at least 1"));
        }
        Ok(())
    }
}

/// Settings for a [`PriorityQueue`](crate::queue::heap::PriorityQueue)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    pub initial_capacity: usize,
    /// Break priority ties by enqueue order
    pub stable_ties: bool,
}

impl QueueConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
