//! Notez Server: multi-tenant notes with invitations and shared access.
//!
//! Main entry point that loads configuration, connects to PostgreSQL,
//! applies migrations, and starts the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use notez_core::config::{AppConfig, LogFormat};
use notez_core::error::AppError;
use notez_database::DatabasePool;

#[tokio::main]
async fn main() {
    let env = std::env::var("NOTEZ_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Notez v{}", env!("CARGO_PKG_VERSION"));

    let db_pool = DatabasePool::connect(&config.database).await?;
    notez_database::migration::run_migrations(db_pool.pool()).await?;

    notez_api::run_server(config, db_pool).await
}
