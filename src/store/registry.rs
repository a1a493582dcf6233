use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use roaring::RoaringBitmap;
use tracing::debug;
use crate::core::config::StoreConfig;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::stats::StoreStats;
use crate::index::attribute::AttributeIndex;
use crate::index::name_cache::NameQueryCache;
use crate::index::posting::Ordinal;
use crate::index::substring::SubstringIndex;
use crate::index::unique::UniqueIndex;
use crate::store::record::Record;

/// Keyed record collection with unique-key, substring-name and
/// categorical indexes.
///
/// Every index refers to records by [`Ordinal`]; ordinals are handed out in
/// insertion order and never reused, so all query results come back in
/// insertion order.
///
/// Single-owner structure: wrap it in a mutex to share it across threads.
pub struct IndexedStore<R: Record> {
    config: StoreConfig,

    records: HashMap<Ordinal, R>,
    ids: HashMap<R::Id, Ordinal>,
    live: RoaringBitmap,
    next_ordinal: u32,

    unique: UniqueIndex,
    names: SubstringIndex,
    attributes: AttributeIndex,
    name_cache: NameQueryCache,
}

impl<R: Record> IndexedStore<R> {
    pub fn new() -> Self {
        IndexedStore::with_config(StoreConfig::default())
    }

    /// An invalid `min_substring_len` of 0 is raised to 1, and `config()`
    /// reports the raised value.
    pub fn with_config(mut config: StoreConfig) -> Self {
        config.min_substring_len = config.min_substring_len.max(1);
        let min_len = config.min_substring_len;
        IndexedStore {
            records: HashMap::with_capacity(config.initial_capacity),
            ids: HashMap::with_capacity(config.initial_capacity),
            live: RoaringBitmap::new(),
            next_ordinal: 0,
            unique: UniqueIndex::with_capacity(config.initial_capacity),
            names: SubstringIndex::new(min_len),
            attributes: AttributeIndex::new(),
            name_cache: NameQueryCache::new(config.name_cache_capacity),
            config,
        }
    }

    /// Builds a store from seed data, returning the records that were rejected
    pub fn from_records<I>(config: StoreConfig, records: I) -> (Self, Vec<R>)
    where
        I: IntoIterator<Item = R>,
    {
        let mut store = IndexedStore::with_config(config);
        let rejected = store.extend_records(records);
        (store, rejected)
    }

    /// Adds every record it can; the rest are handed back
    pub fn extend_records<I>(&mut self, records: I) -> Vec<R>
    where
        I: IntoIterator<Item = R>,
    {
        let mut rejected = Vec::new();
        for record in records {
            if let Err((record, err)) = self.insert_or_return(record) {
                debug!(id = ?record.id(), error = %err, "seed record rejected");
                rejected.push(record);
            }
        }
        rejected
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Inserts a record whose id and unique key are both unused.
    ///
    /// On error the store is unchanged.
    pub fn insert(&mut self, record: R) -> Result<()> {
        self.insert_or_return(record).map_err(|(_, err)| err)
    }

    /// Returns false, leaving the store untouched, if the id or unique key is taken
    pub fn add(&mut self, record: R) -> bool {
        match self.insert(record) {
            Ok(()) => true,
            Err(err) => {
                debug!(error = %err, "add rejected");
                false
            }
        }
    }

    /// Merges `patch` into the record and re-indexes whatever changed
    pub fn try_update<Q>(&mut self, id: &Q, patch: R::Patch) -> Result<()>
    where
        R::Id: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.update_with(id, |record| record.apply(patch))
    }

    pub fn update<Q>(&mut self, id: &Q, patch: R::Patch) -> bool
    where
        R::Id: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        match self.try_update(id, patch) {
            Ok(()) => true,
            Err(err) => {
                debug!(error = %err, "update rejected");
                false
            }
        }
    }

    /// Applies `edit` to a copy of the record, validates it, then swaps it in.
    ///
    /// Fails with `NotFound` for an unknown id, `InvalidArgument` if the
    /// edit changes the id, and `Conflict` if the new unique key belongs to
    /// another record. Nothing is modified on failure.
    pub fn update_with<Q, F>(&mut self, id: &Q, edit: F) -> Result<()>
    where
        R::Id: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
        F: FnOnce(&mut R),
    {
        let ordinal = *self
            .ids
            .get(id)
            .ok_or_else(|| Error::not_found("no record with that id"))?;
        let current = self.record_at(ordinal)?;

        let mut updated = current.clone();
        edit(&mut updated);

        if updated.id() != current.id() {
            return Err(Error::invalid_argument(format!(
                "record id {:?} cannot be changed to {:?}",
                current.id(),
                updated.id()
            )));
        }
        if !self.unique.is_available_for(updated.unique_key(), ordinal) {
            return Err(Error::conflict(format!(
                "unique key '{}' already belongs to another record",
                updated.unique_key()
            )));
        }

        let Some(previous) = self.records.insert(ordinal, updated) else {
            return Err(invariant_broken(ordinal));
        };
        let current = &self.records[&ordinal];

        if previous.unique_key() != current.unique_key() {
            self.unique.remove(previous.unique_key(), ordinal);
            self.unique.insert(current.unique_key().to_string(), ordinal);
        }

        let (name_keys_removed, name_keys_added) = if previous.name() != current.name() {
            self.names.reindex(ordinal, previous.name(), current.name())
        } else {
            (0, 0)
        };

        let old_attributes = previous.attributes();
        let new_attributes = current.attributes();
        for stale in old_attributes.iter().filter(|a| !new_attributes.contains(a)) {
            self.attributes.remove(stale.field, &stale.value, ordinal);
        }
        for fresh in new_attributes.into_iter().filter(|a| !old_attributes.contains(a)) {
            self.attributes.add(fresh.field, fresh.value, ordinal);
        }

        debug!(
            id = ?current.id(),
            ordinal = ordinal.value(),
            name_keys_removed,
            name_keys_added,
            "record updated"
        );
        self.name_cache.clear();
        Ok(())
    }

    /// Removes the record and every index entry pointing at it
    pub fn try_remove<Q>(&mut self, id: &Q) -> Result<R>
    where
        R::Id: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let ordinal = *self
            .ids
            .get(id)
            .ok_or_else(|| Error::not_found("no record with that id"))?;
        let record = self
            .records
            .remove(&ordinal)
            .ok_or_else(|| invariant_broken(ordinal))?;
        self.ids.remove(id);

        self.unique.remove(record.unique_key(), ordinal);
        let name_keys = self.names.unindex(ordinal, record.name());
        for attribute in record.attributes() {
            self.attributes.remove(attribute.field, &attribute.value, ordinal);
        }
        self.live.remove(ordinal.value());
        self.name_cache.clear();

        debug!(id = ?record.id(), ordinal = ordinal.value(), name_keys, "record removed");
        Ok(record)
    }

    pub fn remove<Q>(&mut self, id: &Q) -> bool
    where
        R::Id: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        match self.try_remove(id) {
            Ok(_) => true,
            Err(err) => {
                debug!(error = %err, "remove rejected");
                false
            }
        }
    }

    pub fn get_by_id<Q>(&self, id: &Q) -> Option<&R>
    where
        R::Id: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.ids.get(id).and_then(|ordinal| self.records.get(ordinal))
    }

    pub fn contains<Q>(&self, id: &Q) -> bool
    where
        R::Id: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.ids.contains_key(id)
    }

    pub fn get_by_unique_key(&self, key: &str) -> Option<&R> {
        self.unique.get(key).and_then(|ordinal| self.records.get(&ordinal))
    }

    /// Case-insensitive substring search over names.
    ///
    /// A record matches when some indexed substring of its name contains
    /// the query, so 1–2 char queries still match longer names while names
    /// shorter than `min_substring_len` are never found. The empty query
    /// matches every indexed name.
    pub fn find_by_name(&self, query: &str) -> Vec<&R> {
        let normalized = self.names.normalize_query(query);
        let ordinals = match self.name_cache.get(&normalized) {
            Some(cached) => cached,
            None => {
                let found = self.names.search(&normalized);
                self.name_cache.put(normalized, found.clone());
                found
            }
        };
        self.resolve(&ordinals)
    }

    /// Records currently tagged with `value` under `field`
    pub fn find_by_attribute(&self, field: &str, value: &str) -> Vec<&R> {
        self.attributes
            .get(field, value)
            .map(|ordinals| self.resolve(ordinals))
            .unwrap_or_default()
    }

    /// Distinct values indexed under `field`, sorted
    pub fn attribute_values(&self, field: &str) -> Vec<String> {
        self.attributes.values(field)
    }

    /// All records in insertion order
    pub fn get_all(&self) -> Vec<&R> {
        self.resolve(&self.live)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.ids.clear();
        self.live.clear();
        self.unique.clear();
        self.names.clear();
        self.attributes.clear();
        self.name_cache.clear();
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            record_count: self.records.len(),
            unique_keys: self.unique.len(),
            name_keys: self.names.key_count(),
            name_postings: self.names.posting_count(),
            attribute_fields: self.attributes.field_count(),
            attribute_keys: self.attributes.key_count(),
            cache_stats: self.name_cache.stats(),
        }
    }

    /// Like `insert`, but hands the record back on failure
    fn insert_or_return(&mut self, record: R) -> std::result::Result<(), (R, Error)> {
        if let Err(err) = self.check_insertable(&record) {
            return Err((record, err));
        }
        let ordinal = match self.allocate_ordinal() {
            Ok(ordinal) => ordinal,
            Err(err) => return Err((record, err)),
        };

        self.unique.insert(record.unique_key().to_string(), ordinal);
        let name_keys = self.names.index(ordinal, record.name());
        for attribute in record.attributes() {
            self.attributes.add(attribute.field, attribute.value, ordinal);
        }

        debug!(id = ?record.id(), ordinal = ordinal.value(), name_keys, "record added");

        self.ids.insert(record.id().clone(), ordinal);
        self.live.insert(ordinal.value());
        self.records.insert(ordinal, record);
        self.name_cache.clear();
        Ok(())
    }

    fn check_insertable(&self, record: &R) -> Result<()> {
        if self.unique.contains(record.unique_key()) {
            return Err(Error::conflict(format!(
                "unique key '{}' already registered",
                record.unique_key()
            )));
        }
        if self.ids.contains_key(record.id()) {
            return Err(Error::conflict(format!("id {:?} already registered", record.id())));
        }
        Ok(())
    }

    fn allocate_ordinal(&mut self) -> Result<Ordinal> {
        if self.next_ordinal == u32::MAX {
            return Err(Error::new(
                ErrorKind::CapacityExceeded,
                "record ordinals exhausted".to_string(),
            ));
        }
        let ordinal = Ordinal(self.next_ordinal);
        self.next_ordinal += 1;
        Ok(ordinal)
    }

    fn record_at(&self, ordinal: Ordinal) -> Result<&R> {
        self.records.get(&ordinal).ok_or_else(|| invariant_broken(ordinal))
    }

    fn resolve(&self, ordinals: &RoaringBitmap) -> Vec<&R> {
        ordinals
            .iter()
            .filter_map(|ordinal| self.records.get(&Ordinal(ordinal)))
            .collect()
    }
}

impl<R: Record> Default for IndexedStore<R> {
    fn default() -> Self {
        IndexedStore::new()
    }
}

fn invariant_broken(ordinal: Ordinal) -> Error {
    Error::new(
        ErrorKind::InvalidState,
        format!("id index points at missing ordinal {}", ordinal.value()),
    )
}
