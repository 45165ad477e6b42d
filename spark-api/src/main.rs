use actix_web::HttpServer;
use clap::Parser;
use spark_api::config::ApiConfig;
use spark_api::integrations::email_provider::EmailProvider;
use spark_api::{build_app, helpers, AppState};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,

    /// Config file to use instead of the platform default
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing(log_file_path: Option<&str>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("spark-api.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    tracing::error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file_path.as_deref());

    // Load config
    let (config, config_path) = ApiConfig::load(args.config.as_deref())
        .map_err(|e| startup_error("Failed to load config", e))?;
    tracing::info!("Using config file {:?}", config_path);

    // Initialize database
    let (db, db_path) = helpers::database::initialize_database(&config.database)
        .await
        .map_err(|e| startup_error("Failed to initialize database", e))?;
    tracing::info!("Database initialized at: {:?}", db_path);

    let (host, port) = config.bind_address();
    let state = AppState::new(db, config, config_path);

    if !state.email.provider.is_configured() {
        tracing::warn!("No email provider key configured; outbound email will be recorded as failed");
    }

    tracing::info!("Starting server on {}:{}", host, port);

    let server = HttpServer::new(move || build_app(&state))
        .bind((host.as_str(), port))?
        .run();

    let handle = server.handle();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }

        tracing::info!("Ctrl+C received, shutting down...");
        handle.stop(true).await;
    });

    server.await
}
