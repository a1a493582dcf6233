use chrono::NaiveDate;
use crate::core::types::{Crime, Criminal, CriminalStatus, ThreatLevel};
use crate::store::citizen::CitizenPatch;
use crate::store::record::{Attribute, Record};
use crate::store::registry::IndexedStore;

pub const STATUS: &str = "status";
pub const THREAT_LEVEL: &str = "threat_level";

/// Criminal records, additionally indexed by status and threat level
pub type CriminalDatabase = IndexedStore<Criminal>;

/// Partial criminal update; `Some` fields overwrite
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CriminalPatch {
    pub profile: CitizenPatch,
    pub crime_history: Option<Vec<Crime>>,
    pub threat_level: Option<ThreatLevel>,
    pub status: Option<CriminalStatus>,
    pub last_seen: Option<NaiveDate>,
    pub associates: Option<Vec<String>>,
}

impl CriminalPatch {
    pub fn status(status: CriminalStatus) -> Self {
        CriminalPatch {
            status: Some(status),
            ..CriminalPatch::default()
        }
    }

    pub fn threat_level(threat_level: ThreatLevel) -> Self {
        CriminalPatch {
            threat_level: Some(threat_level),
            ..CriminalPatch::default()
        }
    }
}

impl Record for Criminal {
    type Id = String;
    type Patch = CriminalPatch;

    fn id(&self) -> &String {
        &self.profile.id
    }

    fn unique_key(&self) -> &str {
        &self.profile.email
    }

    fn name(&self) -> &str {
        &self.profile.name
    }

    fn attributes(&self) -> Vec<Attribute> {
        vec![
            Attribute::new(STATUS, self.status.as_str()),
            Attribute::new(THREAT_LEVEL, self.threat_level.as_str()),
        ]
    }

    fn apply(&mut self, patch: CriminalPatch) {
        patch.profile.merge_into(&mut self.profile);
        if let Some(crime_history) = patch.crime_history {
            self.crime_history = crime_history;
        }
        if let Some(threat_level) = patch.threat_level {
            self.threat_level = threat_level;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(last_seen) = patch.last_seen {
            self.last_seen = Some(last_seen);
        }
        if let Some(associates) = patch.associates {
            self.associates = Some(associates);
        }
    }
}

impl IndexedStore<Criminal> {
    pub fn find_by_status(&self, status: CriminalStatus) -> Vec<&Criminal> {
        self.find_by_attribute(STATUS, status.as_str())
    }

    pub fn find_by_threat_level(&self, threat_level: ThreatLevel) -> Vec<&Criminal> {
        self.find_by_attribute(THREAT_LEVEL, threat_level.as_str())
    }
}
