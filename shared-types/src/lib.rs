use serde::{Deserialize, Serialize};

pub mod activity;
pub mod analytics;
pub mod assistant;
pub mod customer;
pub mod dashboard;
pub mod email;
pub mod event;
pub mod insight;
pub mod note;
pub mod search;
pub mod settings;
pub mod task;
pub mod validation;

pub use activity::{ActivitiesResponse, ActivityAction, CreateActivityRequest, CustomerActivity};
pub use analytics::{AnalyticsResponse, LeadSource, WeeklyActivity};
pub use assistant::{
    AssistantWelcomeResponse, ChatMessage, ChatMessagesResponse, ChatRole,
    CreateChatSessionResponse, PostChatMessageRequest, PostChatMessageResponse,
    CANNED_RESPONSES,
};
pub use customer::{
    initials_from_name, CreateCustomerRequest, Customer, CustomerStatus, CustomersResponse,
    ListCustomersRequest,
};
pub use dashboard::{ChartPoint, DashboardResponse, StatCard, TeamActivity, TeamMember, Trend};
pub use email::{
    EmailDetailResponse, EmailDirection, EmailFunctionRequest, EmailHistoryResponse,
    EmailRecord, EmailStatus, InboundEmailRequest, InboundTag, InboundWebhookRequest,
    IncomingEmail, ProviderAccepted, ProviderError, ProviderResponse, SendEmailRequest,
};
pub use event::{CalendarEvent, CalendarEventType, EventsResponse, ListEventsRequest};
pub use insight::{Insight, InsightsResponse};
pub use note::{CreateNoteRequest, CustomerNote, NotesResponse};
pub use settings::{
    AccountSettings, AssistantSettings, DisplaySettings, NotificationSettings, Preferences,
    SettingsResponse,
};
pub use task::{Task, TaskPriority, TaskStatus};
pub use validation::ValidationError;

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body returned by the email functions when a message was recorded
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordedResponse {
    pub success: bool,
    pub message: String,
}

/// Body returned by the webhook when the sender matched no customer
#[derive(Debug, Serialize, Deserialize)]
pub struct UnmatchedSenderResponse {
    pub status: String,
    pub customer: String,
}
