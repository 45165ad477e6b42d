use shared_types::validation::validate_email_compose;
use shared_types::{ActivityAction, Customer, ProviderAccepted, ProviderResponse, SendEmailRequest};

use crate::client::CrmClient;
use crate::error::{ClientError, Result};

/// What the user typed into the compose dialog
#[derive(Debug, Clone, Default)]
pub struct EmailDraft {
    pub subject: String,
    pub message: String,
    pub reply_to: Option<String>,
}

/// Send `draft` to `customer` through the send-email function, then log a
/// `Sent email: <subject>` activity.
///
/// A blank subject or message is rejected before anything is sent; otherwise
/// both go out exactly as typed.
pub async fn send_email(client: &CrmClient, customer: &Customer, draft: &EmailDraft) -> Result<ProviderAccepted> {
    let subject = draft.subject.as_str();
    let message = draft.message.as_str();
    validate_email_compose(subject, message)?;

    let request = SendEmailRequest {
        to: customer.email.clone(),
        subject: subject.to_string(),
        message: message.to_string(),
        customer_name: customer.name.clone(),
        customer_id: Some(customer.id.clone()),
        reply_to: draft
            .reply_to
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string),
    };

    let response: ProviderResponse = client.post("/functions/v1/send-email", &request).await?;
    let accepted = match (response.data, response.error) {
        (_, Some(error)) => {
            tracing::warn!("Email to {} was not sent: {}", customer.email, error.message);
            return Err(ClientError::Provider(error.message));
        }
        (Some(accepted), None) => accepted,
        (None, None) => return Err(ClientError::Provider("Empty provider response".to_string())),
    };

    client
        .log_activity(&customer.id, ActivityAction::Email, &format!("Sent email: {}", subject))
        .await?;

    Ok(accepted)
}
