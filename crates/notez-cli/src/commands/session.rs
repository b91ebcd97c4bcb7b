//! Session maintenance commands.

use std::sync::Arc;

use chrono::Utc;
use clap::{Args, Subcommand};

use notez_auth::session::SessionManager;
use notez_core::config::AppConfig;
use notez_core::error::AppError;
use notez_database::repositories::SessionRepository;

use crate::output;

/// Arguments for session commands
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Session subcommands
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Delete every session whose expiry has passed
    Purge,
}

/// Execute session commands
pub async fn execute(args: &SessionArgs, config: &AppConfig) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;
    let sessions = SessionManager::new(
        Arc::new(SessionRepository::new(pool.pool().clone())),
        config.session.clone(),
    );

    match &args.command {
        SessionCommand::Purge => {
            let purged = sessions.purge_expired(Utc::now()).await?;
            output::print_done(&format!("Purged {purged} expired session(s)."));
        }
    }

    pool.close().await;
    Ok(())
}
