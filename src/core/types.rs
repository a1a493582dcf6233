use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::error::{Error, Result};

/// Fresh record identifier for records created at runtime
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citizen {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub nationality: String,
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Citizen {
    /// Minimal citizen with a generated id; remaining fields can be filled in afterwards.
    pub fn new(name: impl Into<String>, email: impl Into<String>, date_of_birth: NaiveDate) -> Self {
        let now = Utc::now();
        Citizen {
            id: new_record_id(),
            name: name.into(),
            age: 0,
            nationality: String::new(),
            date_of_birth,
            address: String::new(),
            email: email.into(),
            phone: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrimeStatus {
    Open,
    Closed,
    UnderInvestigation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crime {
    pub id: String,
    #[serde(rename = "type")]
    pub crime_type: String,
    pub description: String,
    pub date: NaiveDate,
    pub location: String,
    pub status: CrimeStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl ThreatLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Low => "low",
            ThreatLevel::Medium => "medium",
            ThreatLevel::High => "high",
            ThreatLevel::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CriminalStatus {
    AtLarge,
    InCustody,
    Released,
}

impl CriminalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CriminalStatus::AtLarge => "at-large",
            CriminalStatus::InCustody => "in-custody",
            CriminalStatus::Released => "released",
        }
    }
}

/// A citizen profile plus criminal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criminal {
    #[serde(flatten)]
    pub profile: Citizen,
    #[serde(default)]
    pub crime_history: Vec<Crime>,
    pub threat_level: ThreatLevel,
    pub status: CriminalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<NaiveDate>,
    /// Ids of associated criminals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associates: Option<Vec<String>>,
}

impl Criminal {
    pub fn new(profile: Citizen, threat_level: ThreatLevel, status: CriminalStatus) -> Self {
        Criminal {
            profile,
            crime_history: Vec::new(),
            threat_level,
            status,
            last_seen: None,
            associates: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmergencyType {
    Cyber,
    Physical,
    Infrastructure,
    Medical,
    Fire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmergencyStatus {
    Pending,
    InProgress,
    Resolved,
}

/// Emergency urgency, 1 (most urgent) through 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct EmergencyPriority(u8);

impl EmergencyPriority {
    pub const MOST_URGENT: EmergencyPriority = EmergencyPriority(1);
    pub const LEAST_URGENT: EmergencyPriority = EmergencyPriority(5);

    pub fn new(value: u8) -> Result<Self> {
        if (Self::MOST_URGENT.0..=Self::LEAST_URGENT.0).contains(&value) {
            Ok(EmergencyPriority(value))
        } else {
            Err(Error::invalid_argument(format!(
                "emergency priority must be within 1..=5, got {}",
                value
            )))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// One step more urgent, stopping at 1
    pub fn escalate(self) -> Self {
        EmergencyPriority(self.0.saturating_sub(1).max(Self::MOST_URGENT.0))
    }

    /// One step less urgent, stopping at 5
    pub fn deescalate(self) -> Self {
        EmergencyPriority((self.0 + 1).min(Self::LEAST_URGENT.0))
    }
}

impl TryFrom<u8> for EmergencyPriority {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        EmergencyPriority::new(value)
    }
}

impl From<EmergencyPriority> for u8 {
    fn from(priority: EmergencyPriority) -> u8 {
        priority.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyRequest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: Location,
    #[serde(rename = "type")]
    pub emergency_type: EmergencyType,
    pub priority: EmergencyPriority,
    pub status: EmergencyStatus,
    pub reported_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_citizens: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_crime_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateType {
    Info,
    Warning,
    Error,
    Success,
}

/// System status update; lower priority number is more urgent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    #[serde(rename = "type")]
    pub update_type: UpdateType,
    pub priority: u32,
    /// System component that produced the update
    pub source: String,
    pub acknowledged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentStatus {
    Available,
    Busy,
    OffDuty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub badge: String,
    pub status: AgentStatus,
    pub specialization: Vec<String>,
    pub assigned_request_ids: Vec<String>,
    pub last_active: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    #[test]
    fn emergency_priority_range() {
        assert!(EmergencyPriority::new(1).is_ok());
        assert!(EmergencyPriority::new(5).is_ok());
        assert_eq!(EmergencyPriority::new(0).unwrap_err().kind, ErrorKind::InvalidArgument);
        assert_eq!(EmergencyPriority::new(6).unwrap_err().kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn escalation_saturates() {
        let p = EmergencyPriority::new(2).unwrap();
        assert_eq!(p.escalate().value(), 1);
        assert_eq!(p.escalate().escalate().value(), 1);
        assert_eq!(EmergencyPriority::LEAST_URGENT.deescalate().value(), 5);
        assert_eq!(p.deescalate().value(), 3);
    }

    #[test]
    fn criminal_reads_dashboard_json() {
        let json = r#"{
            "id": "cr1",
            "name": "Alexei Volkov",
            "age": 35,
            "nationality": "Russian Federation",
            "dateOfBirth": "1988-03-12",
            "address": "Unknown",
            "email": "unknown@secure-mail.com",
            "phone": "Unknown",
            "crimeHistory": [{
                "id": "crh1",
                "type": "Cyber Crime",
                "description": "Banking system breach",
                "date": "2023-01-15",
                "location": "Financial District",
                "status": "open"
            }],
            "threatLevel": "high",
            "status": "at-large",
            "lastSeen": "2023-06-10",
            "createdAt": "2023-01-20T10:30:00Z",
            "updatedAt": "2023-06-15T14:20:00Z"
        }"#;

        let criminal: Criminal = serde_json::from_str(json).unwrap();
        assert_eq!(criminal.profile.id, "cr1");
        assert_eq!(criminal.threat_level, ThreatLevel::High);
        assert_eq!(criminal.status, CriminalStatus::AtLarge);
        assert_eq!(criminal.crime_history[0].status, CrimeStatus::Open);
        assert!(criminal.associates.is_none());
    }

    #[test]
    fn out_of_range_priority_fails_to_deserialize() {
        let json = r#"{
            "id": "e1",
            "title": "Cyber Attack on Traffic Control",
            "description": "Traffic control system compromised",
            "location": {"address": "Main St", "coordinates": {"lat": 40.7, "lng": -74.0}},
            "type": "cyber",
            "priority": 9,
            "status": "in-progress",
            "reportedTime": "2024-01-01T00:00:00Z"
        }"#;
        assert!(serde_json::from_str::<EmergencyRequest>(json).is_err());
        let fixed = json.replace("\"priority\": 9", "\"priority\": 1");
        let request: EmergencyRequest = serde_json::from_str(&fixed).unwrap();
        assert_eq!(request.priority, EmergencyPriority::MOST_URGENT);
        assert_eq!(request.status, EmergencyStatus::InProgress);
    }

    #[test]
    fn labels_match_dashboard() {
        assert_eq!(CriminalStatus::InCustody.as_str(), "in-custody");
        assert_eq!(ThreatLevel::Critical.as_str(), "critical");
        assert_eq!(serde_json::to_string(&AgentStatus::OffDuty).unwrap(), "\"off-duty\"");
        assert!(!new_record_id().is_empty());
    }
}
