//! User management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use notez_api::AppState;
use notez_core::config::AppConfig;
use notez_core::error::AppError;
use notez_database::Repositories;
use notez_entity::user::{User, UserRole};

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create an account without going through registration
    Create {
        /// Email address
        #[arg(long)]
        email: String,
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Tag the account as admin
        #[arg(long)]
        admin: bool,
        /// Password; prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
}

/// User display row
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Email
    email: String,
    /// Name
    name: String,
    /// Role
    role: String,
}

impl From<User> for UserRow {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            name: user.name.unwrap_or_default(),
            role: user.role.to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        UserCommand::Create {
            email,
            name,
            admin,
            password,
        } => {
            let password = match password {
                Some(password) => password.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match.")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            let pool = super::create_db_pool(config).await?;
            let repos = Repositories::postgres(pool.pool().clone());
            let state = AppState::new(config.clone(), repos, Some(pool.clone()))?;

            let role = if *admin { UserRole::Admin } else { UserRole::User };
            let user = state
                .auth_service
                .provision(email, &password, name.clone(), role)
                .await?;
            pool.close().await;

            output::print_done("User created.");
            output::print_rows(&[UserRow::from(user)], format);
        }
    }

    Ok(())
}
