use std::fmt;
use std::hash::Hash;

/// A categorical value a record is indexed under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub field: &'static str,
    pub value: String,
}

impl Attribute {
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        Attribute {
            field,
            value: value.into(),
        }
    }
}

/// What an [`IndexedStore`](crate::store::registry::IndexedStore) needs to
/// know about the records it holds.
pub trait Record: Clone {
    /// Stable identifier, never changed by an update
    type Id: Clone + Eq + Hash + fmt::Debug;

    /// Partial update; present fields overwrite the record's
    type Patch;

    fn id(&self) -> &Self::Id;

    /// Field that must be unique across the store.
    ///
    /// Keys are compared exactly. Callers that want case-insensitive
    /// uniqueness (emails, say) normalize the field before `add`/`update`.
    fn unique_key(&self) -> &str;

    /// Display name, indexed for substring search
    fn name(&self) -> &str;

    /// Categorical values to index; none by default
    fn attributes(&self) -> Vec<Attribute> {
        Vec::new()
    }

    /// Shallow merge of `patch` into `self`
    fn apply(&mut self, patch: Self::Patch);
}
