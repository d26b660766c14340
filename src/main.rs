//! Tracker server: permission-scoped search, auditing, and bulk mail.
//!
//! Main entry point that loads configuration, initializes logging,
//! connects to the database, and starts the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use tracker_core::config::AppConfig;
use tracker_core::error::AppError;
use tracker_database::connection::DatabasePool;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the `TRACKER_ENV` overlay, and `TRACKER__*`
/// environment variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("TRACKER_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Connect, migrate, and serve.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting tracker v{}", env!("CARGO_PKG_VERSION"));

    let database = DatabasePool::connect(&config.database).await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations...");
        database.migrate().await?;
    }

    tracker_api::run_server(config, database).await
}
