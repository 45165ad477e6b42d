use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::integrations::email_provider::EmailProvider;
use actix_web::{web, HttpResponse};
use shared_types::{Preferences, SettingsResponse};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tracing::info;

#[derive(Clone)]
pub struct SettingsAppState {
    pub config: Arc<RwLock<ApiConfig>>,
    pub config_path: PathBuf,
    pub provider: Arc<dyn EmailProvider>,
}

impl SettingsAppState {
    fn response(&self, config: &ApiConfig) -> SettingsResponse {
        SettingsResponse {
            config_file_path: self.config_path.to_string_lossy().to_string(),
            email_provider_configured: self.provider.is_configured(),
            preferences: config.preferences.clone(),
        }
    }
}

pub async fn get_settings(data: web::Data<SettingsAppState>) -> Result<HttpResponse, ApiError> {
    let config = data.config.read().map_err(|e| {
        ApiError::Internal(format!("Failed to acquire config read lock: {}", e))
    })?;

    Ok(HttpResponse::Ok().json(data.response(&config)))
}

pub async fn update_settings(
    data: web::Data<SettingsAppState>,
    request: web::Json<Preferences>,
) -> Result<HttpResponse, ApiError> {
    let preferences = request.into_inner();

    let mut config = data.config.write().map_err(|e| {
        ApiError::Internal(format!("Failed to acquire config write lock: {}", e))
    })?;

    let mut updated = config.clone();
    updated.preferences = preferences;
    updated
        .save(&data.config_path)
        .map_err(|e| ApiError::Internal(format!("Failed to save config: {}", e)))?;
    *config = updated;

    info!("Preferences saved to {:?}", data.config_path);

    Ok(HttpResponse::Ok().json(data.response(&config)))
}

#[cfg(test)]
mod tests {
    use crate::config::ApiConfig;
    use crate::test_support::TestApp;
    use actix_web::{http::StatusCode, test};
    use serde_json::json;
    use crate::config::EmailConfig;
    use crate::integrations::email_provider::ResendProvider;
    use shared_types::{AccountSettings, SettingsResponse};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_preferences_persist_to_config_file() {
        let harness = TestApp::empty().await;
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::get().uri("/api/settings").to_request();
        let mut settings: SettingsResponse = test::call_and_read_body_json(&app, req).await;
        assert!(settings.email_provider_configured);

        settings.preferences.display.theme = "dark".to_string();
        settings.preferences.assistant.model = "advanced".to_string();

        let req = test::TestRequest::put()
            .uri("/api/settings")
            .set_json(&settings.preferences)
            .to_request();
        let updated: SettingsResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated.preferences.display.theme, "dark");

        let (reloaded, _) = ApiConfig::load(Some(&harness.config_path())).unwrap();
        assert_eq!(reloaded.preferences.display.theme, "dark");
        assert_eq!(reloaded.preferences.assistant.model, "advanced");
    }

    #[actix_web::test]
    async fn test_blank_provider_key_is_not_configured() {
        let provider = Arc::new(ResendProvider::new(&EmailConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        }));
        let harness = TestApp::seeded_with_provider(provider).await;
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::get().uri("/api/settings").to_request();
        let settings: SettingsResponse = test::call_and_read_body_json(&app, req).await;
        assert!(!settings.email_provider_configured);
    }

    #[actix_web::test]
    async fn test_failed_save_keeps_previous_preferences() {
        let mut harness = TestApp::empty().await;
        // A directory cannot be written as a file
        let unwritable = harness.config_path().parent().unwrap().to_path_buf();
        harness.state.settings.config_path = unwritable;
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::put()
            .uri("/api/settings")
            .set_json(json!({
                "display": {"theme": "dark", "density": "compact", "language": "fr", "timezone": "utc"}
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let req = test::TestRequest::get().uri("/api/settings").to_request();
        let settings: SettingsResponse = test::call_and_read_body_json(&app, req).await;
        assert_ne!(settings.preferences.display.theme, "dark");
        assert_ne!(settings.preferences.display.language, "fr");
    }

    #[actix_web::test]
    async fn test_partial_preferences_fill_defaults() {
        let harness = TestApp::empty().await;
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::put()
            .uri("/api/settings")
            .set_json(json!({
                "display": {"theme": "light", "density": "compact", "language": "fr", "timezone": "utc"}
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let updated: SettingsResponse = test::read_body_json(resp).await;
        assert_eq!(updated.preferences.display.language, "fr");
        assert_eq!(updated.preferences.account, AccountSettings::default());
    }
}
