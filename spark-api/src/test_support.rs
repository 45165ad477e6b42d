use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::App;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ApiConfig;
use crate::helpers::sample_data;
use crate::integrations::email_provider::testing::RecordingProvider;
use crate::integrations::email_provider::EmailProvider;
use crate::{build_app, AppState, Database};

/// Application state over a temporary database and config file, with short
/// assistant delays and an in-process email provider.
pub struct TestApp {
    pub db: Arc<Database>,
    pub state: AppState,
    _dir: tempfile::TempDir,
}

impl TestApp {
    pub async fn empty() -> Self {
        Self::build(false, Arc::new(RecordingProvider::accepting())).await
    }

    pub async fn seeded() -> Self {
        Self::build(true, Arc::new(RecordingProvider::accepting())).await
    }

    pub async fn seeded_with_provider(provider: Arc<dyn EmailProvider>) -> Self {
        Self::build(true, provider).await
    }

    async fn build(seed: bool, provider: Arc<dyn EmailProvider>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db = Arc::new(Database::new(&dir.path().join("crm.sqlite")).unwrap());
        if seed {
            sample_data::seed_sample_data(db.async_connection.clone()).await.unwrap();
        }

        let mut config = ApiConfig::default();
        config.assistant.reply_delay_ms = 20;
        config.assistant.insights_delay_ms = 10;
        let config_path = dir.path().join("api.toml");
        config.save(&config_path).unwrap();

        let state = AppState::with_provider(db.clone(), config, config_path, provider);
        TestApp {
            db,
            state,
            _dir: dir,
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.state.settings.config_path.clone()
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        build_app(&self.state)
    }
}
