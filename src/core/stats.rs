use serde::{Deserialize, Serialize};

/// Index statistics for a record store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub record_count: usize,
    pub unique_keys: usize,

    // Substring index
    pub name_keys: usize,
    pub name_postings: u64,

    // Categorical indexes
    pub attribute_fields: usize,
    pub attribute_keys: usize,

    pub cache_stats: CacheStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hit_count: usize,
    pub miss_count: usize,
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }
}

impl StoreStats {
    /// Average number of records per substring key
    pub fn avg_postings_per_name_key(&self) -> f64 {
        if self.name_keys == 0 {
            0.0
        } else {
            self.name_postings as f64 / self.name_keys as f64
        }
    }
}
