use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use roaring::RoaringBitmap;
use serde::{Deserialize, Serialize};

/// Insertion sequence number of a live record inside one store.
///
/// Every index stores ordinals rather than record ids, so iterating a
/// posting set in ascending order visits records in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ordinal(pub u32);

impl Ordinal {
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Ordinal {
    fn from(ordinal: u32) -> Self {
        Ordinal(ordinal)
    }
}

/// Key → set of ordinals, with no empty sets kept around
#[derive(Debug, Clone)]
pub struct PostingMap<K> {
    postings: HashMap<K, RoaringBitmap>,
}

impl<K: Eq + Hash> PostingMap<K> {
    pub fn new() -> Self {
        PostingMap {
            postings: HashMap::new(),
        }
    }

    /// Returns true if the ordinal was not yet under this key
    pub fn add(&mut self, key: K, ordinal: Ordinal) -> bool {
        self.postings
            .entry(key)
            .or_insert_with(RoaringBitmap::new)
            .insert(ordinal.0)
    }

    /// Removes the ordinal and drops the key once its set is empty
    pub fn remove<Q>(&mut self, key: &Q, ordinal: Ordinal) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let Some(set) = self.postings.get_mut(key) else {
            return false;
        };
        let removed = set.remove(ordinal.0);
        if set.is_empty() {
            self.postings.remove(key);
        }
        removed
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&RoaringBitmap>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.postings.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &RoaringBitmap)> {
        self.postings.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.postings.keys()
    }

    pub fn key_count(&self) -> usize {
        self.postings.len()
    }

    /// Total ordinals across all keys
    pub fn posting_count(&self) -> u64 {
        self.postings.values().map(|set| set.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn clear(&mut self) {
        self.postings.clear();
    }
}

impl<K: Eq + Hash> Default for PostingMap<K> {
    fn default() -> Self {
        PostingMap::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emptied_keys_are_dropped() {
        let mut map: PostingMap<String> = PostingMap::new();
        assert!(map.add("at-large".to_string(), Ordinal(1)));
        assert!(map.add("at-large".to_string(), Ordinal(2)));
        assert!(!map.add("at-large".to_string(), Ordinal(2)));
        assert_eq!(map.posting_count(), 2);

        assert!(map.remove("at-large", Ordinal(1)));
        assert_eq!(map.key_count(), 1);
        assert!(map.remove("at-large", Ordinal(2)));
        assert!(map.is_empty());
        assert!(map.get("at-large").is_none());
    }

    #[test]
    fn removing_unknown_entries_is_a_no_op() {
        let mut map: PostingMap<String> = PostingMap::new();
        map.add("low".to_string(), Ordinal(7));
        assert!(!map.remove("high", Ordinal(7)));
        assert!(!map.remove("low", Ordinal(8)));
        assert_eq!(map.key_count(), 1);
    }

    #[test]
    fn sets_iterate_in_ordinal_order() {
        let mut map: PostingMap<&'static str> = PostingMap::new();
        for ordinal in [9, 2, 5] {
            map.add("k", Ordinal(ordinal));
        }
        let order: Vec<u32> = map.get("k").unwrap().iter().collect();
        assert_eq!(order, vec![2, 5, 9]);
    }
}
