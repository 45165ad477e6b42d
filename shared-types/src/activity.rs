use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Kind of interaction logged against a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ActivityAction {
    Email,
    Call,
    Meeting,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Email => "Email",
            ActivityAction::Call => "Call",
            ActivityAction::Meeting => "Meeting",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Email" => Some(ActivityAction::Email),
            "Call" => Some(ActivityAction::Call),
            "Meeting" => Some(ActivityAction::Meeting),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerActivity {
    pub id: String,
    pub customer_id: String,
    pub action: ActivityAction,
    pub description: String,
    pub created_at: i64,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateActivityRequest {
    pub action: ActivityAction,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ActivitiesResponse {
    pub activities: Vec<CustomerActivity>,
}
