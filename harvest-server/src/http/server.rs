//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::auth::{authorize, AuthError, Caller, Role, SessionResolver};
use crate::config::ServerConfig;
use crate::db::{ConnectionManager, PgStore, Store};

/// Shared application state, built once at startup and passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub sessions: Arc<dyn SessionResolver>,
    /// Present when backed by PostgreSQL; reported by `/health`
    pub database: Option<Arc<ConnectionManager>>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, sessions: Arc<dyn SessionResolver>) -> Self {
        Self {
            store,
            sessions,
            database: None,
        }
    }

    /// State backed by PostgreSQL through the shared connection manager
    pub fn postgres(manager: Arc<ConnectionManager>, sessions: Arc<dyn SessionResolver>) -> Self {
        Self {
            store: Arc::new(PgStore::new(manager.clone())),
            sessions,
            database: Some(manager),
        }
    }

    /// Resolve the request's session and run the authorization gate.
    pub async fn authorize(
        &self,
        headers: &axum::http::HeaderMap,
        required: Role,
    ) -> Result<Caller, AuthError> {
        let session = self.sessions.resolve(headers);
        authorize(session.as_ref(), required, &*self.store).await
    }
}

/// Build the application router with all routes
pub fn build_router(state: AppState, cors_permissive: bool) -> Router {
    let state = Arc::new(state);

    let cors = if cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        // Localhost only
        CorsLayer::new()
            .allow_origin([
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("http://127.0.0.1:3000"),
            ])
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(routes::health::router())
        .merge(routes::settings::router())
        .merge(routes::referral::router())
        .merge(routes::admin::router(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server.
///
/// The database is not touched here; the pool opens on the first query.
///
/// # Example
///
/// ```ignore
/// let config = ServerConfig::from_env()?;
/// let manager = Arc::new(ConnectionManager::new(config.connector()));
/// let state = AppState::postgres(manager, Arc::new(config.session_resolver()?));
/// run_server(state, &config).await?;
/// ```
pub async fn run_server(state: AppState, config: &ServerConfig) -> Result<(), ServerError> {
    let app = build_router(state, config.cors_permissive);

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
