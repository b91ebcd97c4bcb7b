//! CLI command definitions and dispatch.

pub mod migrate;
pub mod serve;
pub mod session;
pub mod user;

use clap::{Parser, Subcommand};

use notez_core::config::AppConfig;
use notez_core::error::AppError;
use notez_database::DatabasePool;

use crate::output::OutputFormat;

/// Notez: shared notes with invitations
#[derive(Debug, Parser)]
#[command(name = "notez", version, about, long_about = None)]
pub struct Cli {
    /// Configuration overlay (`config/{env}.toml`); defaults to `NOTEZ_ENV`
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the Notez server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Session maintenance
    Session(session::SessionArgs),
    /// User management
    User(user::UserArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let env = self
            .env
            .clone()
            .or_else(|| std::env::var("NOTEZ_ENV").ok())
            .unwrap_or_else(|| "development".to_string());
        let config = AppConfig::load(&env)?;

        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Session(args) => session::execute(args, &config).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
        }
    }
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}
