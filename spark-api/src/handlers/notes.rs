use actix_web::{web, HttpResponse};
use shared_types::validation::validate_note;
use shared_types::{CreateNoteRequest, NotesResponse};
use std::sync::Arc;

use crate::database::notes as notes_db;
use crate::database::Database;
use crate::error::ApiError;
use crate::handlers::customers::require_customer;

pub async fn list_notes(
    db: web::Data<Arc<Database>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let customer = require_customer(&db, &path.into_inner()).await?;
    let notes = notes_db::list_notes(db.async_connection.clone(), &customer.id).await?;

    Ok(HttpResponse::Ok().json(NotesResponse { notes }))
}

pub async fn create_note(
    db: web::Data<Arc<Database>>,
    path: web::Path<String>,
    request: web::Json<CreateNoteRequest>,
) -> Result<HttpResponse, ApiError> {
    let CreateNoteRequest { content } = request.into_inner();
    validate_note(&content)?;

    let customer = require_customer(&db, &path.into_inner()).await?;
    let note = notes_db::insert_note(db.async_connection.clone(), &customer.id, content.trim()).await?;

    Ok(HttpResponse::Created().json(note))
}
