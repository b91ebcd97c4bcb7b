//! Server start command.

use clap::Args;

use notez_core::config::AppConfig;
use notez_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override bind port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Skip running migrations at startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let pool = super::create_db_pool(&config).await?;
    if !args.no_migrate {
        notez_database::migration::run_migrations(pool.pool()).await?;
    }

    notez_api::run_server(config, pool).await
}
