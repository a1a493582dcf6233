use chrono::{DateTime, NaiveDate, Utc};
use crate::core::types::Citizen;
use crate::store::record::Record;
use crate::store::registry::IndexedStore;

/// Citizens keyed by id, unique by email, searchable by name
pub type CitizenRegistry = IndexedStore<Citizen>;

/// Partial citizen update; `Some` fields overwrite
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CitizenPatch {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CitizenPatch {
    pub fn name(name: impl Into<String>) -> Self {
        CitizenPatch {
            name: Some(name.into()),
            ..CitizenPatch::default()
        }
    }

    pub fn email(email: impl Into<String>) -> Self {
        CitizenPatch {
            email: Some(email.into()),
            ..CitizenPatch::default()
        }
    }

    /// Stamps `updated_at` with the current time
    pub fn touched(mut self) -> Self {
        self.updated_at = Some(Utc::now());
        self
    }

    pub(crate) fn merge_into(self, citizen: &mut Citizen) {
        if let Some(name) = self.name {
            citizen.name = name;
        }
        if let Some(age) = self.age {
            citizen.age = age;
        }
        if let Some(nationality) = self.nationality {
            citizen.nationality = nationality;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            citizen.date_of_birth = date_of_birth;
        }
        if let Some(address) = self.address {
            citizen.address = address;
        }
        if let Some(email) = self.email {
            citizen.email = email;
        }
        if let Some(phone) = self.phone {
            citizen.phone = phone;
        }
        if let Some(updated_at) = self.updated_at {
            citizen.updated_at = updated_at;
        }
    }
}

impl Record for Citizen {
    type Id = String;
    type Patch = CitizenPatch;

    fn id(&self) -> &String {
        &self.id
    }

    /// Email as stored; lower-case it before adding for case-insensitive checks
    fn unique_key(&self) -> &str {
        &self.email
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&mut self, patch: CitizenPatch) {
        patch.merge_into(self);
    }
}
