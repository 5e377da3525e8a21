//! HTTP server command
//!
//! Starts the API without connecting to the database; the pool opens on the
//! first request that needs it (or at startup with `--migrate`).

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use harvest_server::db::migrations;
use harvest_server::{run_server, AppState, ConnectionManager, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: HARVEST_BIND or 127.0.0.1:3000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (default: DATABASE_URL, read on first query)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Maximum number of pooled database connections
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_connections: Option<u32>,

    /// Header carrying the authenticated caller's email
    #[arg(long)]
    pub session_header: Option<String>,

    /// Run migrations before serving (opens the pool at startup)
    #[arg(long)]
    pub migrate: bool,
}

impl ServeArgs {
    /// Layer command-line flags over environment configuration
    fn apply(self, config: &mut ServerConfig) {
        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if self.cors_permissive {
            config.cors_permissive = true;
        }
        if self.database_url.is_some() {
            config.database_url = self.database_url;
        }
        if let Some(max) = self.max_connections {
            config.pool.max_connections = max;
        }
        if let Some(header) = self.session_header {
            config.session_header = header;
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let migrate = args.migrate;
    let mut config = ServerConfig::from_env().context("Invalid server configuration")?;
    args.apply(&mut config);

    let sessions = config
        .session_resolver()
        .context("Invalid session header")?;
    let manager = Arc::new(ConnectionManager::new(config.connector()));

    if migrate {
        let pool = manager
            .handle()
            .await
            .context("Failed to open database pool")?;
        migrations::run(pool)
            .await
            .context("Failed to run migrations")?;
    }

    tracing::info!(
        bind = %config.bind_addr,
        session_header = %config.session_header,
        "Starting harvest server"
    );

    let state = AppState::postgres(manager, Arc::new(sessions));

    // Run server (blocks until shutdown)
    run_server(state, &config).await.context("Server error")?;

    Ok(())
}
