use serde::{Deserialize, Serialize};

/// One event as extracted from a listings page.
///
/// Every field is always populated; the extractor substitutes defaults
/// instead of leaving anything out.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EventRecord {
    pub id: u32, // position in this extraction, not stable across calls
    pub name: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EventsResponse {
    pub events: Vec<EventRecord>,
    pub count: usize,
    pub category: String,
    pub date: String,
}

impl EventsResponse {
    pub fn new(events: Vec<EventRecord>, category: String, date: String) -> Self {
        Self {
            count: events.len(),
            events,
            category,
            date,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Detail lookup is not backed by scraped data yet.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EventDetail {
    pub id: u32,
    pub name: String,
    pub date: String,
    pub location: String,
}

impl EventDetail {
    pub fn placeholder(id: u32) -> Self {
        Self {
            id,
            name: format!("Event {id}"),
            date: "2026-03-15".to_string(),
            location: "Sample Location".to_string(),
        }
    }
}
