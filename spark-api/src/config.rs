use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use shared_types::Preferences;
use std::path::{Path, PathBuf};

pub const RESEND_API_KEY_ENV: &str = "RESEND_API_KEY";
pub const DB_PATH_ENV: &str = "SPARK_DB_PATH";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub cors: Option<CorsConfig>,
    pub server: Option<ServerConfig>,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub preferences: Preferences,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors: Some(CorsConfig {
                allowed_origins: vec!["http://localhost:8081".to_string()],
            }),
            server: Some(ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            }),
            database: DatabaseConfig::default(),
            email: EmailConfig::default(),
            assistant: AssistantConfig::default(),
            preferences: Preferences::default(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// Overrides the platform data directory location
    pub path: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub seed_sample_data: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            seed_sample_data: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmailConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_from_address")]
    pub from_address: String,
    #[serde(default = "default_provider_url")]
    pub api_base_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            from_address: default_from_address(),
            api_base_url: default_provider_url(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AssistantConfig {
    #[serde(default = "default_reply_delay")]
    pub reply_delay_ms: u64,
    #[serde(default = "default_insights_delay")]
    pub insights_delay_ms: u64,
    #[serde(default = "default_session_idle")]
    pub session_idle_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay(),
            insights_delay_ms: default_insights_delay(),
            session_idle_secs: default_session_idle(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_from_address() -> String {
    "CRM <onboarding@resend.dev>".to_string()
}

fn default_provider_url() -> String {
    "https://api.resend.com".to_string()
}

fn default_reply_delay() -> u64 {
    1500
}

fn default_insights_delay() -> u64 {
    2000
}

fn default_session_idle() -> u64 {
    3600
}

const DEFAULT_CONFIG: &str = r#"
[cors]
allowed_origins = ["http://localhost:8081"]

[server]
host = "127.0.0.1"
port = 8080

[database]
# path = "/var/lib/spark-crm/db.sqlite"
seed_sample_data = true

[email]
# Transactional email provider key; RESEND_API_KEY takes precedence
# api_key = "re_..."
from_address = "CRM <onboarding@resend.dev>"
api_base_url = "https://api.resend.com"

[assistant]
reply_delay_ms = 1500
insights_delay_ms = 2000
# Chat sessions idle this long are dropped
session_idle_secs = 3600
"#;

impl ApiConfig {
    /// Load the config file, writing the default one first if it is missing.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .build()?;

        let mut config: ApiConfig = builder.try_deserialize()?;
        config.apply_env_overrides();

        Ok((config, config_path))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(RESEND_API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.email.api_key = Some(key);
            }
        }
        if let Ok(path) = std::env::var(DB_PATH_ENV) {
            if !path.trim().is_empty() {
                self.database.path = Some(PathBuf::from(path));
            }
        }
    }

    /// Host and port, falling back to 127.0.0.1:8080
    pub fn bind_address(&self) -> (String, u16) {
        if let Some(server_config) = &self.server {
            (server_config.host.clone(), server_config.port)
        } else {
            ("127.0.0.1".to_string(), 8080)
        }
    }

    /// Write the config back, leaving out secrets that came from the environment.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let mut on_disk = self.clone();
        if std::env::var(RESEND_API_KEY_ENV).is_ok() {
            on_disk.email.api_key = None;
        }
        let toml_string = toml::to_string(&on_disk)?;
        std::fs::write(path, toml_string)?;
        Ok(())
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("spark-crm").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}
