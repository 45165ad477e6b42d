use actix_web::{web, HttpResponse};
use shared_types::{EmailDetailResponse, EmailHistoryResponse};
use std::sync::Arc;

use crate::database::email_history as email_db;
use crate::database::Database;
use crate::error::ApiError;
use crate::handlers::customers::require_customer;

pub async fn list_customer_emails(
    db: web::Data<Arc<Database>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let customer = require_customer(&db, &path.into_inner()).await?;
    let emails = email_db::list_customer_emails(db.async_connection.clone(), &customer.id).await?;

    Ok(HttpResponse::Ok().json(EmailHistoryResponse { emails }))
}

/// Received mail whose sender matched no customer
pub async fn list_unassigned_emails(db: web::Data<Arc<Database>>) -> Result<HttpResponse, ApiError> {
    let emails = email_db::list_unassigned_emails(db.async_connection.clone()).await?;
    Ok(HttpResponse::Ok().json(EmailHistoryResponse { emails }))
}

pub async fn get_email(
    db: web::Data<Arc<Database>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let email_id = path.into_inner();

    let email = email_db::get_email_record(db.async_connection.clone(), &email_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Email", &email_id))?;

    Ok(HttpResponse::Ok().json(EmailDetailResponse::from(email)))
}
