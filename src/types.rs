use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Someone on the guest list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub slug: String,
    pub first: String,
    pub last: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Slugs of the other guests in this guest's party.
    #[serde(default)]
    pub party: Vec<String>,
    /// Slugs of the events this guest is invited to.
    #[serde(default)]
    pub events: Vec<String>,
}

impl Guest {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first, self.last)
    }
}

/// A scheduled event. Times are venue-local.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub slug: String,
    pub name: String,
    pub start_time: NaiveDateTime,
    pub location: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attire: Option<String>,
    #[serde(default)]
    pub rsvpable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RsvpResponse {
    Yes,
    No,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpEvent {
    pub event_slug: String,
    pub response: RsvpResponse,
}

/// A guest's answers for the events they were invited to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rsvp {
    /// Guest slug.
    pub guest: String,
    pub events: Vec<RsvpEvent>,
    #[serde(default)]
    pub diet: String,
}
