use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CalendarEventType {
    Meeting,
    Call,
    Demo,
    Internal,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    /// Local date-time, `YYYY-MM-DDTHH:MM:SS`
    pub starts_at: String,
    pub duration: String,
    pub event_type: CalendarEventType,
}

#[derive(Debug, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ListEventsRequest {
    /// `YYYY-MM-DD`
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EventsResponse {
    pub events: Vec<CalendarEvent>,
}
