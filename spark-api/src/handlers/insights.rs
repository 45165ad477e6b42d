use actix_web::{web, HttpResponse};
use shared_types::insight::canned_insights;
use shared_types::InsightsResponse;
use std::sync::Arc;
use std::time::Duration;

use crate::database::Database;
use crate::error::ApiError;
use crate::handlers::customers::require_customer;
use crate::handlers::settings::SettingsAppState;

/// Canned insights for one customer, returned after the configured "thinking" delay
pub async fn generate_insights(
    db: web::Data<Arc<Database>>,
    settings: web::Data<SettingsAppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let customer = require_customer(&db, &path.into_inner()).await?;

    let delay_ms = settings
        .config
        .read()
        .map_err(|e| ApiError::Internal(format!("Failed to acquire config read lock: {}", e)))?
        .assistant
        .insights_delay_ms;
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;

    Ok(HttpResponse::Ok().json(InsightsResponse {
        insights: canned_insights(&customer.id, &customer.name),
        customer_id: customer.id,
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_support::TestApp;
    use actix_web::{http::StatusCode, test};
    use shared_types::InsightsResponse;

    #[actix_web::test]
    async fn test_insights_keyed_by_customer() {
        let harness = TestApp::seeded().await;
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::post().uri("/api/customers/1/insights").to_request();
        let body: InsightsResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.customer_id, "1");
        assert_eq!(body.insights.len(), 3);

        let req = test::TestRequest::post().uri("/api/customers/7/insights").to_request();
        let body: InsightsResponse = test::call_and_read_body_json(&app, req).await;
        assert!(body.insights.iter().any(|i| i.text.contains("Cameron Williamson")));
    }

    #[actix_web::test]
    async fn test_insights_for_missing_customer() {
        let harness = TestApp::empty().await;
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::post().uri("/api/customers/1/insights").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
