use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored event. `start_time` and `end_time` hold RFC 3339 UTC text.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    #[serde(skip_serializing, default)]
    pub schedule_id: i64,
    pub content: String,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Normalized values written to the `events` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFields {
    pub content: String,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEventRequest {
    pub content: String,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Full replacement of an event; omitted times are cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub content: String,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    pub date: String,
    pub page: Option<u32>,
}

/// Timed event with start/end rendered for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedEvent {
    pub id: i64,
    pub content: String,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelessPage {
    pub events_without_time: Vec<Event>,
    pub events_without_time_total_pages: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedPage {
    pub parsed_events_with_time: Vec<TimedEvent>,
    pub events_with_time_total_pages: u64,
}
