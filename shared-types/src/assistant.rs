use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Replies the simulated assistant picks from
pub const CANNED_RESPONSES: [&str; 5] = [
    "I can help you analyze your customer data and identify patterns to improve your sales strategy.",
    "Based on your customer interactions, I recommend focusing on the tech industry segment, which has shown a 15% higher conversion rate.",
    "I've analyzed your calendar and found that you have 3 overlapping meetings tomorrow. Would you like me to suggest a rescheduling plan?",
    "Your customer satisfaction score has increased by 12% this month. The main factors appear to be faster response times and personalized follow-ups.",
    "I've noticed that leads from the recent marketing campaign have a 30% higher probability of converting. Would you like me to schedule follow-up calls for the top 10 prospects?",
];

pub const WELCOME_CAPABILITIES: [&str; 5] = [
    "Customer insights and analysis",
    "Finding and organizing customer information",
    "Scheduling and managing appointments",
    "Identifying sales opportunities",
    "Creating reports and summaries",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: i64,
    #[serde(default)]
    pub is_loading: bool,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateChatSessionResponse {
    pub session_id: String,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PostChatMessageRequest {
    pub content: String,
}

/// Messages appended by one submission: the user's and the placeholder
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PostChatMessageResponse {
    pub user_message: ChatMessage,
    pub placeholder: ChatMessage,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatMessagesResponse {
    pub messages: Vec<ChatMessage>,
    pub is_loading: bool,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssistantWelcomeResponse {
    pub greeting: String,
    pub capabilities: Vec<String>,
}
