//! `send-email` and `receive-email`, the two endpoints that talk to the email
//! provider or are called by it.

use actix_web::{web, HttpResponse};
use shared_types::email::render_email_html;
use shared_types::{
    ActivityAction, EmailDirection, EmailFunctionRequest, EmailStatus, InboundEmailRequest,
    InboundWebhookRequest, RecordedResponse, SendEmailRequest, UnmatchedSenderResponse,
};
use std::sync::Arc;

use crate::database::email_history::{self as email_db, NewEmailRecord};
use crate::database::{activities as activities_db, customers as customers_db, Database};
use crate::error::ApiError;
use crate::integrations::email_provider::{EmailProvider, OutboundEmail};

#[derive(Clone)]
pub struct EmailAppState {
    pub provider: Arc<dyn EmailProvider>,
    pub from_address: String,
}

fn recorded() -> HttpResponse {
    HttpResponse::Ok().json(RecordedResponse {
        success: true,
        message: "Incoming email recorded".to_string(),
    })
}

fn received_subject(subject: &str) -> String {
    format!("Received email: {}", subject)
}

/// CORS preflight; the scope adds the `Access-Control-*` headers
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

pub async fn send_email(
    db: web::Data<Arc<Database>>,
    email: web::Data<EmailAppState>,
    request: web::Json<EmailFunctionRequest>,
) -> Result<HttpResponse, ApiError> {
    match request.into_inner() {
        EmailFunctionRequest::Inbound(inbound) => record_inbound(&db, inbound).await,
        EmailFunctionRequest::Outbound(outbound) => send_outbound(&db, &email, outbound).await,
    }
}

async fn send_outbound(
    db: &Database,
    state: &EmailAppState,
    request: SendEmailRequest,
) -> Result<HttpResponse, ApiError> {
    if request.to.is_empty() || request.subject.is_empty() || request.message.is_empty() {
        return Err(ApiError::BadRequest("Missing required fields".to_string()));
    }

    tracing::info!("Sending email to {} with subject: {}", request.to, request.subject);

    let outbound = OutboundEmail {
        from: state.from_address.clone(),
        to: vec![request.to.clone()],
        subject: request.subject.clone(),
        html: render_email_html(&request.customer_name, &request.message),
        reply_to: request.reply_to.clone().filter(|r| !r.is_empty()),
    };

    let response = state.provider.send(&outbound).await;
    match (&response.data, &response.error) {
        (Some(accepted), _) => tracing::info!("Email accepted by provider: {}", accepted.id),
        (_, Some(error)) => tracing::warn!("Email to {} failed: {}", request.to, error.message),
        _ => {}
    }

    let customer_id = known_customer_id(db, request.customer_id.as_deref()).await;
    let record = NewEmailRecord {
        customer_id,
        subject: &request.subject,
        message: &request.message,
        direction: EmailDirection::Sent,
        status: response.status(),
        reply_to: outbound.reply_to.as_deref(),
    };
    if let Err(e) = email_db::insert_email_record(db.async_connection.clone(), record).await {
        tracing::error!("Error recording email in database: {}", e);
    }

    Ok(HttpResponse::Ok().json(response))
}

/// The requested customer id when it names a stored customer; unknown ids are
/// recorded unassigned so the history row is still written.
async fn known_customer_id<'a>(db: &Database, customer_id: Option<&'a str>) -> Option<&'a str> {
    let id = customer_id.filter(|id| !id.is_empty())?;

    match customers_db::get_customer(db.async_connection.clone(), id).await {
        Ok(Some(_)) => Some(id),
        Ok(None) => {
            tracing::warn!("Customer {} not found; recording email unassigned", id);
            None
        }
        Err(e) => {
            tracing::error!("Error looking up customer {}: {}", id, e);
            None
        }
    }
}

async fn record_inbound(db: &Database, request: InboundEmailRequest) -> Result<HttpResponse, ApiError> {
    tracing::info!("Recording inbound email for customer {}", request.customer_id);

    email_db::insert_email_record(
        db.async_connection.clone(),
        NewEmailRecord {
            customer_id: Some(&request.customer_id),
            subject: &request.subject,
            message: &request.message,
            direction: EmailDirection::Received,
            status: EmailStatus::Delivered,
            reply_to: Some(&request.from),
        },
    )
    .await?;

    activities_db::insert_activity(
        db.async_connection.clone(),
        &request.customer_id,
        ActivityAction::Email,
        &received_subject(&request.subject),
    )
    .await?;

    Ok(recorded())
}

/// Webhook called by the provider for every message delivered to the inbox
pub async fn receive_email(
    db: web::Data<Arc<Database>>,
    request: web::Json<InboundWebhookRequest>,
) -> Result<HttpResponse, ApiError> {
    let InboundWebhookRequest { email } = request.into_inner();
    tracing::info!("Received email webhook: {}", email.subject);

    let matches = customers_db::find_customer_ids_by_email(db.async_connection.clone(), &email.from).await?;
    let customer_id = match matches.as_slice() {
        [id] => Some(id.clone()),
        [] => None,
        _ => {
            tracing::warn!("{} customers share the address {}; not assigning", matches.len(), email.from);
            None
        }
    };

    let record = NewEmailRecord {
        customer_id: customer_id.as_deref(),
        subject: &email.subject,
        message: email.body(),
        direction: EmailDirection::Received,
        status: EmailStatus::Delivered,
        reply_to: Some(&email.from),
    };

    let Some(customer_id) = customer_id.as_deref() else {
        tracing::warn!("Customer not found for email: {}", email.from);
        if let Err(e) = email_db::insert_email_record(db.async_connection.clone(), record).await {
            tracing::error!("Error recording unassigned email: {}", e);
        }
        return Ok(HttpResponse::Ok().json(UnmatchedSenderResponse {
            status: "processed".to_string(),
            customer: "unknown".to_string(),
        }));
    };

    email_db::insert_email_record(db.async_connection.clone(), record).await?;

    if let Err(e) = activities_db::insert_activity(
        db.async_connection.clone(),
        customer_id,
        ActivityAction::Email,
        &received_subject(&email.subject),
    )
    .await
    {
        tracing::error!("Error recording activity for {}: {}", customer_id, e);
    }

    Ok(recorded())
}
