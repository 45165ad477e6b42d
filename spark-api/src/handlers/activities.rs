use actix_web::{web, HttpResponse};
use shared_types::{ActivitiesResponse, CreateActivityRequest};
use std::sync::Arc;

use crate::database::activities as activities_db;
use crate::database::Database;
use crate::error::ApiError;
use crate::handlers::customers::require_customer;

pub async fn list_activities(
    db: web::Data<Arc<Database>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let customer = require_customer(&db, &path.into_inner()).await?;
    let activities = activities_db::list_activities(db.async_connection.clone(), &customer.id).await?;

    Ok(HttpResponse::Ok().json(ActivitiesResponse { activities }))
}

pub async fn create_activity(
    db: web::Data<Arc<Database>>,
    path: web::Path<String>,
    request: web::Json<CreateActivityRequest>,
) -> Result<HttpResponse, ApiError> {
    let CreateActivityRequest { action, description } = request.into_inner();
    if description.trim().is_empty() {
        return Err(ApiError::BadRequest("Activity description cannot be empty".to_string()));
    }

    let customer = require_customer(&db, &path.into_inner()).await?;
    let activity =
        activities_db::insert_activity(db.async_connection.clone(), &customer.id, action, &description).await?;

    Ok(HttpResponse::Created().json(activity))
}
