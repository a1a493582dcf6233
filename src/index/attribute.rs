use std::collections::HashMap;
use roaring::RoaringBitmap;
use crate::index::posting::{Ordinal, PostingMap};

/// Categorical indexes: field → value → ordinals
#[derive(Debug, Clone, Default)]
pub struct AttributeIndex {
    fields: HashMap<&'static str, PostingMap<String>>,
}

impl AttributeIndex {
    pub fn new() -> Self {
        AttributeIndex {
            fields: HashMap::new(),
        }
    }

    pub fn add(&mut self, field: &'static str, value: String, ordinal: Ordinal) -> bool {
        self.fields
            .entry(field)
            .or_default()
            .add(value, ordinal)
    }

    pub fn remove(&mut self, field: &str, value: &str, ordinal: Ordinal) -> bool {
        let Some(values) = self.fields.get_mut(field) else {
            return false;
        };
        let removed = values.remove(value, ordinal);
        if values.is_empty() {
            self.fields.remove(field);
        }
        removed
    }

    pub fn get(&self, field: &str, value: &str) -> Option<&RoaringBitmap> {
        self.fields.get(field).and_then(|values| values.get(value))
    }

    /// Distinct values currently held under `field`, sorted
    pub fn values(&self, field: &str) -> Vec<String> {
        let mut values: Vec<String> = self
            .fields
            .get(field)
            .map(|values| values.keys().cloned().collect())
            .unwrap_or_default();
        values.sort();
        values
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Number of (field, value) keys
    pub fn key_count(&self) -> usize {
        self.fields.values().map(|values| values.key_count()).sum()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }
}
