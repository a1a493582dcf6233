use std::collections::BTreeSet;
use roaring::RoaringBitmap;
use crate::analysis::analyzer::Analyzer;
use crate::index::posting::{Ordinal, PostingMap};

/// Substring index over record names.
///
/// Every lower-cased substring of at least `min_len` chars maps to the
/// ordinals of the records whose name contains it. A name of `L` chars
/// costs O(L²) entries, which is fine for hundreds to low thousands of
/// records but not for bulk datasets.
pub struct SubstringIndex {
    analyzer: Analyzer,
    query_analyzer: Analyzer,
    postings: PostingMap<String>,
    min_len: usize,
}

impl SubstringIndex {
    pub fn new(min_len: usize) -> Self {
        SubstringIndex {
            analyzer: Analyzer::name_substrings(min_len),
            query_analyzer: Analyzer::query(),
            postings: PostingMap::new(),
            min_len,
        }
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Distinct index keys derived from `name`
    pub fn keys_for(&self, name: &str) -> BTreeSet<String> {
        self.analyzer.terms(name)
    }

    /// Returns the number of keys the ordinal was added under
    pub fn index(&mut self, ordinal: Ordinal, name: &str) -> usize {
        let keys = self.keys_for(name);
        let count = keys.len();
        for key in keys {
            self.postings.add(key, ordinal);
        }
        count
    }

    /// Returns the number of keys the ordinal was removed from
    pub fn unindex(&mut self, ordinal: Ordinal, name: &str) -> usize {
        let mut removed = 0;
        for key in self.keys_for(name) {
            if self.postings.remove(key.as_str(), ordinal) {
                removed += 1;
            }
        }
        removed
    }

    /// Moves an ordinal from the keys of `old_name` to those of `new_name`,
    /// touching only the keys that differ.
    pub fn reindex(&mut self, ordinal: Ordinal, old_name: &str, new_name: &str) -> (usize, usize) {
        let old_keys = self.keys_for(old_name);
        let new_keys = self.keys_for(new_name);

        let mut removed = 0;
        for key in old_keys.difference(&new_keys) {
            if self.postings.remove(key.as_str(), ordinal) {
                removed += 1;
            }
        }

        let mut added = 0;
        for key in new_keys.difference(&old_keys) {
            if self.postings.add(key.clone(), ordinal) {
                added += 1;
            }
        }

        (removed, added)
    }

    /// Lower-cased form of a search query
    pub fn normalize_query(&self, query: &str) -> String {
        self.query_analyzer
            .analyze(query)
            .into_iter()
            .next()
            .map(|token| token.text)
            .unwrap_or_default()
    }

    /// Ordinals of every record with an index key containing `normalized`.
    ///
    /// Scans all keys: the query may be shorter than `min_len` or not be a
    /// key itself.
    pub fn search(&self, normalized: &str) -> RoaringBitmap {
        let mut matched = RoaringBitmap::new();
        for (key, ordinals) in self.postings.iter() {
            if key.contains(normalized) {
                matched |= ordinals;
            }
        }
        matched
    }

    pub fn key_count(&self) -> usize {
        self.postings.key_count()
    }

    pub fn posting_count(&self) -> u64 {
        self.postings.posting_count()
    }

    pub fn clear(&mut self) {
        self.postings.clear();
    }
}

impl std::fmt::Debug for SubstringIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubstringIndex")
            .field("min_len", &self.min_len)
            .field("keys", &self.postings.key_count())
            .finish()
    }
}
