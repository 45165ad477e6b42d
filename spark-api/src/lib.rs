pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod helpers;
pub mod integrations;

#[cfg(test)]
pub(crate) mod test_support;

pub use database::Database;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{header, Method, StatusCode};
use actix_web::{get, middleware, web, App, HttpResponse, Responder};
use shared_types::ErrorResponse;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::config::{ApiConfig, CorsConfig};
use crate::handlers::functions::EmailAppState;
use crate::handlers::settings::SettingsAppState;
use crate::helpers::assistant::AssistantStore;
use crate::integrations::email_provider::{EmailProvider, ResendProvider};

/// Everything the workers share
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub assistant: AssistantStore,
    pub email: EmailAppState,
    pub settings: SettingsAppState,
    pub cors: Option<CorsConfig>,
}

impl AppState {
    pub fn new(db: Arc<Database>, config: ApiConfig, config_path: PathBuf) -> Self {
        let provider = Arc::new(ResendProvider::new(&config.email));
        Self::with_provider(db, config, config_path, provider)
    }

    pub fn with_provider(
        db: Arc<Database>,
        config: ApiConfig,
        config_path: PathBuf,
        provider: Arc<dyn EmailProvider>,
    ) -> Self {
        AppState {
            db,
            assistant: AssistantStore::new(
                Duration::from_millis(config.assistant.reply_delay_ms),
                Duration::from_secs(config.assistant.session_idle_secs),
            ),
            email: EmailAppState {
                provider: provider.clone(),
                from_address: config.email.from_address.clone(),
            },
            cors: config.cors.clone(),
            settings: SettingsAppState {
                config: Arc::new(RwLock::new(config)),
                config_path,
                provider,
            },
        }
    }
}

#[get("/health")]
async fn health(db: web::Data<Arc<Database>>) -> impl Responder {
    match db.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "database": "connected"
        })),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "status": "unhealthy",
                "database": "disconnected"
            }))
        }
    }
}

fn api_cors(cors_config: Option<&CorsConfig>) -> Cors {
    let cors = if let Some(cors_config) = cors_config {
        let mut cors_builder = Cors::default();
        for origin in &cors_config.allowed_origins {
            cors_builder = cors_builder.allowed_origin(origin);
        }
        cors_builder
    } else {
        Cors::default().allow_any_origin()
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec!["Authorization", "Accept", "Content-Type"])
        .max_age(3600)
}

/// Functions are called from browsers and from the provider's webhook, so every
/// response carries the permissive headers, whether or not an `Origin` was sent.
fn functions_cors_headers() -> middleware::DefaultHeaders {
    middleware::DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .add((
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            "authorization, x-client-info, apikey, content-type",
        ))
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"))
}

fn json_config(status: StatusCode) -> web::JsonConfig {
    web::JsonConfig::default().error_handler(move |err, _req| {
        let response = HttpResponse::build(status).json(ErrorResponse {
            error: err.to_string(),
        });
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse {
            error: err.to_string(),
        });
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

pub fn api_routes(cfg: &mut web::ServiceConfig) {
    use crate::handlers::*;

    cfg.route("/customers", web::get().to(customers::list_customers))
        .route("/customers", web::post().to(customers::create_customer))
        .route("/customers/{id}", web::get().to(customers::get_customer))
        .route("/customers/{id}/notes", web::get().to(notes::list_notes))
        .route("/customers/{id}/notes", web::post().to(notes::create_note))
        .route("/customers/{id}/activities", web::get().to(activities::list_activities))
        .route("/customers/{id}/activities", web::post().to(activities::create_activity))
        .route("/customers/{id}/emails", web::get().to(emails::list_customer_emails))
        .route("/customers/{id}/insights", web::post().to(insights::generate_insights))
        .route("/emails/unassigned", web::get().to(emails::list_unassigned_emails))
        .route("/emails/{id}", web::get().to(emails::get_email))
        .route("/assistant/welcome", web::get().to(assistant::welcome))
        .route("/assistant/sessions", web::post().to(assistant::create_session))
        .route("/assistant/sessions/{id}", web::delete().to(assistant::delete_session))
        .route("/assistant/sessions/{id}/messages", web::get().to(assistant::list_messages))
        .route("/assistant/sessions/{id}/messages", web::post().to(assistant::post_message))
        .route("/dashboard", web::get().to(pages::dashboard))
        .route("/analytics", web::get().to(pages::analytics))
        .route("/calendar/events", web::get().to(pages::list_events))
        .route("/settings", web::get().to(settings::get_settings))
        .route("/settings", web::put().to(settings::update_settings));
}

pub fn function_routes(cfg: &mut web::ServiceConfig) {
    use crate::handlers::functions;

    cfg.route("/send-email", web::post().to(functions::send_email))
        .route("/send-email", web::method(Method::OPTIONS).to(functions::preflight))
        .route("/receive-email", web::post().to(functions::receive_email))
        .route("/receive-email", web::method(Method::OPTIONS).to(functions::preflight));
}

/// The full application: `/health`, the `/api` scope and the `/functions/v1` scope.
pub fn build_app(
    state: &AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state.db.clone()))
        .app_data(web::Data::new(state.assistant.clone()))
        .app_data(web::Data::new(state.email.clone()))
        .app_data(web::Data::new(state.settings.clone()))
        .service(health)
        .service(
            web::scope("/api")
                .app_data(json_config(StatusCode::BAD_REQUEST))
                .app_data(query_config())
                .configure(api_routes)
                .wrap(api_cors(state.cors.as_ref())),
        )
        .service(
            web::scope("/functions/v1")
                .app_data(json_config(StatusCode::INTERNAL_SERVER_ERROR).content_type_required(false))
                .configure(function_routes)
                .wrap(functions_cors_headers()),
        )
}
