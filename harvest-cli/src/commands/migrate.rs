//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use harvest_server::db::migrations;
use harvest_server::{ConnectionManager, ServerConfig};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (default: DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Create or update the database schema
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let config = ServerConfig {
        database_url: args.database_url,
        ..ServerConfig::from_env().context("Invalid server configuration")?
    };

    let manager = ConnectionManager::new(config.connector());
    let pool = manager
        .handle()
        .await
        .context("Failed to open database pool")?;

    migrations::run(pool)
        .await
        .context("Failed to run migrations")?;

    println!("Migrations complete");
    Ok(())
}
