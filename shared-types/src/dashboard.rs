use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::task::Task;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Trend {
    pub value: u32,
    pub is_positive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub description: Option<String>,
    pub trend: Option<Trend>,
}

/// One labelled point of a single-series chart
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChartPoint {
    pub name: String,
    pub value: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TeamMember {
    pub name: String,
    pub initials: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TeamActivity {
    pub id: String,
    pub user: TeamMember,
    pub action: String,
    pub target: String,
    pub date: String,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardResponse {
    pub stats: Vec<StatCard>,
    pub customer_growth: Vec<ChartPoint>,
    pub recent_activities: Vec<TeamActivity>,
    pub upcoming_tasks: Vec<Task>,
    pub insights: Vec<String>,
}
