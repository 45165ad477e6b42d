use actix_web::{web, HttpResponse};
use shared_types::search::{filter_by_status, filter_customers, parse_status_filter};
use shared_types::validation::validate_customer_form;
use shared_types::{CreateCustomerRequest, Customer, CustomersResponse, ListCustomersRequest};
use std::sync::Arc;

use crate::database::customers as customers_db;
use crate::database::Database;
use crate::error::ApiError;

/// Load a customer or fail with 404
pub(crate) async fn require_customer(db: &Database, id: &str) -> Result<Customer, ApiError> {
    customers_db::get_customer(db.async_connection.clone(), id)
        .await?
        .ok_or_else(|| ApiError::not_found("Customer", id))
}

pub async fn list_customers(
    db: web::Data<Arc<Database>>,
    query: web::Query<ListCustomersRequest>,
) -> Result<HttpResponse, ApiError> {
    let ListCustomersRequest { search, status } = query.into_inner();
    let status = parse_status_filter(status.as_deref()).map_err(ApiError::BadRequest)?;

    let customers = customers_db::list_customers(db.async_connection.clone()).await?;
    let customers = filter_customers(&customers, search.as_deref().unwrap_or_default());
    let customers = filter_by_status(customers, status);

    Ok(HttpResponse::Ok().json(CustomersResponse { customers }))
}

pub async fn get_customer(
    db: web::Data<Arc<Database>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let customer = require_customer(&db, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(customer))
}

pub async fn create_customer(
    db: web::Data<Arc<Database>>,
    request: web::Json<CreateCustomerRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    validate_customer_form(&request)?;

    let customer = customers_db::insert_customer(db.async_connection.clone(), &request).await?;
    tracing::info!("Added customer {} ({})", customer.id, customer.email);

    Ok(HttpResponse::Created().json(customer))
}
