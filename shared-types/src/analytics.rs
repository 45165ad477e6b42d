use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::dashboard::ChartPoint;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeadSource {
    pub name: String,
    pub value: u32,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeeklyActivity {
    pub name: String,
    pub meetings: u32,
    pub calls: u32,
    pub emails: u32,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalyticsResponse {
    pub monthly_sales: Vec<ChartPoint>,
    pub lead_sources: Vec<LeadSource>,
    pub weekly_activity: Vec<WeeklyActivity>,
}
