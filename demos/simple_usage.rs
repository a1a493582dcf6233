/// Incidex API Demo
///
/// Seeds the dashboard stores from JSON, then walks through:
/// - Name search and categorical filters
/// - Updates with uniqueness checks
/// - Emergency queue escalation and resolution
/// - Status feed ordering and store statistics

use chrono::Utc;
use incidex::core::types::{Criminal, CriminalStatus, EmergencyRequest, StatusUpdate, ThreatLevel};
use incidex::{CriminalDatabase, CriminalPatch, EmergencyQueue, StoreConfig, status_feed};

const CRIMINALS: &str = r#"[
  {"id": "cr1", "name": "Alexei Volkov", "age": 35, "nationality": "Russian Federation",
   "dateOfBirth": "1988-03-12", "address": "Unknown", "email": "unknown@secure-mail.com",
   "phone": "Unknown", "crimeHistory": [], "threatLevel": "high", "status": "at-large",
   "createdAt": "2023-01-20T10:30:00Z", "updatedAt": "2023-06-15T14:20:00Z"},
  {"id": "cr2", "name": "Maria Rodriguez", "age": 29, "nationality": "Mexico",
   "dateOfBirth": "1994-07-22", "address": "456 Park Ave", "email": "m.rodriguez@mail.com",
   "phone": "555-0142", "crimeHistory": [], "threatLevel": "medium", "status": "in-custody",
   "createdAt": "2023-02-11T09:00:00Z", "updatedAt": "2023-05-01T16:45:00Z"},
  {"id": "cr3", "name": "Viktor Volkov", "age": 41, "nationality": "Russian Federation",
   "dateOfBirth": "1982-11-02", "address": "Unknown", "email": "unknown@secure-mail.com",
   "phone": "Unknown", "crimeHistory": [], "threatLevel": "critical", "status": "at-large",
   "createdAt": "2023-03-02T08:15:00Z", "updatedAt": "2023-03-02T08:15:00Z"}
]"#;

const REQUESTS: &str = r#"[
  {"id": "e1", "title": "Traffic Control Breach", "description": "Signals compromised",
   "location": {"address": "Main St & 5th Ave", "coordinates": {"lat": 40.7128, "lng": -74.006}},
   "type": "cyber", "priority": 2, "status": "pending", "reportedTime": "2024-03-01T12:00:00Z"},
  {"id": "e2", "title": "Power Outage", "description": "Grid sector 7 offline",
   "location": {"address": "Sector 7", "coordinates": {"lat": 40.73, "lng": -73.99}},
   "type": "infrastructure", "priority": 3, "status": "pending", "reportedTime": "2024-03-01T12:05:00Z"},
  {"id": "e3", "title": "Warehouse Fire", "description": "Smoke reported",
   "location": {"address": "Dock 4", "coordinates": {"lat": 40.70, "lng": -74.01}},
   "type": "fire", "priority": 3, "status": "pending", "reportedTime": "2024-03-01T12:07:00Z"}
]"#;

const UPDATES: &str = r#"[
  {"id": "u1", "timestamp": "2024-03-01T12:00:00Z", "message": "Firewall rules updated",
   "type": "info", "priority": 3, "source": "Security", "acknowledged": false},
  {"id": "u2", "timestamp": "2024-03-01T12:10:00Z", "message": "Intrusion attempt blocked",
   "type": "warning", "priority": 1, "source": "Security", "acknowledged": false},
  {"id": "u3", "timestamp": "2024-03-01T12:20:00Z", "message": "Backup completed",
   "type": "success", "priority": 3, "source": "Storage", "acknowledged": true}
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n╔═══════════════════════════════════════════════╗");
    println!("║        Incidex Dashboard Core - API Demo      ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    // Step 1: Seed the criminal database
    println!("Seeding criminal database...");
    let criminals: Vec<Criminal> = serde_json::from_str(CRIMINALS)?;
    let (mut db, rejected) = CriminalDatabase::from_records(StoreConfig::default(), criminals);
    println!("Loaded {} records, rejected {}", db.len(), rejected.len());
    for criminal in &rejected {
        println!("  rejected {} ({}): email already registered", criminal.profile.id, criminal.profile.name);
    }
    println!();

    // Step 2: Search
    println!("Searching by name...");
    for query in ["volk", "ro", "zz"] {
        let names: Vec<&str> = db.find_by_name(query).iter().map(|c| c.profile.name.as_str()).collect();
        println!("  '{}' -> {:?}", query, names);
    }
    println!("  at large: {}", db.find_by_status(CriminalStatus::AtLarge).len());
    println!("  threat levels on file: {:?}\n", db.attribute_values("threat_level"));

    // Step 3: Update
    println!("Updating records...");
    db.try_update("cr1", CriminalPatch::status(CriminalStatus::InCustody))?;
    db.try_update("cr2", CriminalPatch::threat_level(ThreatLevel::Low))?;
    println!("  in custody: {}", db.find_by_status(CriminalStatus::InCustody).len());
    println!("  low threat: {}\n", db.find_by_threat_level(ThreatLevel::Low).len());

    // Step 4: Emergency queue
    println!("Working the emergency queue...");
    let requests: Vec<EmergencyRequest> = serde_json::from_str(REQUESTS)?;
    let mut queue = EmergencyQueue::from_requests(requests);
    queue.escalate("e3");
    queue.escalate("e3");
    if let Some(resolved) = queue.resolve("e2", Utc::now()) {
        println!("  resolved {} ({:?})", resolved.id, resolved.status);
    }
    while let Some((request, priority)) = queue.dequeue_with_priority() {
        println!("  [P{}] {} - {}", priority, request.id, request.title);
    }
    println!();

    // Step 5: Status feed
    println!("Status feed...");
    let updates: Vec<StatusUpdate> = serde_json::from_str(UPDATES)?;
    for update in status_feed(updates) {
        println!("  [P{}] {} ({})", update.priority, update.message, update.source);
    }
    println!();

    // Step 6: Statistics
    let stats = db.stats();
    println!("Statistics:");
    println!("  Records: {}", stats.record_count);
    println!("  Name keys: {}", stats.name_keys);
    println!("  Avg postings per key: {:.2}", stats.avg_postings_per_name_key());
    println!("  Cache hit rate: {:.1}%", stats.cache_stats.hit_rate() * 100.0);

    Ok(())
}
