use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for API types
    let mut types = Vec::new();

    // Customer types
    types.push(clean_type(Customer::export_to_string()?));
    types.push(clean_type(CustomerStatus::export_to_string()?));
    types.push(clean_type(CreateCustomerRequest::export_to_string()?));
    types.push(clean_type(ListCustomersRequest::export_to_string()?));
    types.push(clean_type(CustomersResponse::export_to_string()?));

    // Note and activity types
    types.push(clean_type(CustomerNote::export_to_string()?));
    types.push(clean_type(CreateNoteRequest::export_to_string()?));
    types.push(clean_type(NotesResponse::export_to_string()?));
    types.push(clean_type(CustomerActivity::export_to_string()?));
    types.push(clean_type(ActivityAction::export_to_string()?));
    types.push(clean_type(CreateActivityRequest::export_to_string()?));
    types.push(clean_type(ActivitiesResponse::export_to_string()?));

    // Email types
    types.push(clean_type(EmailRecord::export_to_string()?));
    types.push(clean_type(EmailDirection::export_to_string()?));
    types.push(clean_type(EmailStatus::export_to_string()?));
    types.push(clean_type(SendEmailRequest::export_to_string()?));
    types.push(clean_type(InboundTag::export_to_string()?));
    types.push(clean_type(InboundEmailRequest::export_to_string()?));
    types.push(clean_type(EmailFunctionRequest::export_to_string()?));
    types.push(clean_type(IncomingEmail::export_to_string()?));
    types.push(clean_type(InboundWebhookRequest::export_to_string()?));
    types.push(clean_type(ProviderAccepted::export_to_string()?));
    types.push(clean_type(ProviderError::export_to_string()?));
    types.push(clean_type(ProviderResponse::export_to_string()?));
    types.push(clean_type(EmailHistoryResponse::export_to_string()?));
    types.push(clean_type(EmailDetailResponse::export_to_string()?));

    // Assistant and insight types
    types.push(clean_type(ChatRole::export_to_string()?));
    types.push(clean_type(ChatMessage::export_to_string()?));
    types.push(clean_type(CreateChatSessionResponse::export_to_string()?));
    types.push(clean_type(PostChatMessageRequest::export_to_string()?));
    types.push(clean_type(PostChatMessageResponse::export_to_string()?));
    types.push(clean_type(ChatMessagesResponse::export_to_string()?));
    types.push(clean_type(AssistantWelcomeResponse::export_to_string()?));
    types.push(clean_type(Insight::export_to_string()?));
    types.push(clean_type(InsightsResponse::export_to_string()?));

    // Page data types
    types.push(clean_type(Trend::export_to_string()?));
    types.push(clean_type(StatCard::export_to_string()?));
    types.push(clean_type(ChartPoint::export_to_string()?));
    types.push(clean_type(TeamMember::export_to_string()?));
    types.push(clean_type(TeamActivity::export_to_string()?));
    types.push(clean_type(Task::export_to_string()?));
    types.push(clean_type(TaskStatus::export_to_string()?));
    types.push(clean_type(TaskPriority::export_to_string()?));
    types.push(clean_type(DashboardResponse::export_to_string()?));
    types.push(clean_type(LeadSource::export_to_string()?));
    types.push(clean_type(WeeklyActivity::export_to_string()?));
    types.push(clean_type(AnalyticsResponse::export_to_string()?));
    types.push(clean_type(CalendarEvent::export_to_string()?));
    types.push(clean_type(CalendarEventType::export_to_string()?));
    types.push(clean_type(ListEventsRequest::export_to_string()?));
    types.push(clean_type(EventsResponse::export_to_string()?));

    // Settings types
    types.push(clean_type(AccountSettings::export_to_string()?));
    types.push(clean_type(DisplaySettings::export_to_string()?));
    types.push(clean_type(NotificationSettings::export_to_string()?));
    types.push(clean_type(AssistantSettings::export_to_string()?));
    types.push(clean_type(Preferences::export_to_string()?));
    types.push(clean_type(SettingsResponse::export_to_string()?));

    let output_dir = Path::new("../gui/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

/// Drop the per-type import lines ts-rs emits; everything ends up in one file.
fn clean_type(ts: String) -> String {
    ts.lines()
        .map(str::trim_end)
        .filter(|line| {
            !line.starts_with("import type")
                && !line.starts_with("// This file was generated")
                && !line.starts_with("/* This file was generated")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
