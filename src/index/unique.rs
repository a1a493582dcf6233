use std::collections::HashMap;
use crate::index::posting::Ordinal;

/// One-to-one map from a uniqueness-constrained key to its record.
///
/// Keys are compared exactly; no case folding.
#[derive(Debug, Clone, Default)]
pub struct UniqueIndex {
    keys: HashMap<String, Ordinal>,
}

impl UniqueIndex {
    pub fn new() -> Self {
        UniqueIndex {
            keys: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        UniqueIndex {
            keys: HashMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, key: &str) -> Option<Ordinal> {
        self.keys.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// True when `key` is free or already held by `ordinal`
    pub fn is_available_for(&self, key: &str, ordinal: Ordinal) -> bool {
        match self.keys.get(key) {
            Some(owner) => *owner == ordinal,
            None => true,
        }
    }

    /// Caller checks availability first; an existing owner is replaced.
    pub fn insert(&mut self, key: String, ordinal: Ordinal) {
        self.keys.insert(key, ordinal);
    }

    /// Removes `key` only if `ordinal` owns it
    pub fn remove(&mut self, key: &str, ordinal: Ordinal) -> bool {
        if self.keys.get(key) == Some(&ordinal) {
            self.keys.remove(key);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}
