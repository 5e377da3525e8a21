//! Health check endpoint
//!
//! Reports pool state without touching the database: a process that only
//! serves `/health` never opens a connection.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// `connected`, `idle` (pool not opened yet) or `memory`
    pub database: &'static str,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = match &state.database {
        Some(manager) if manager.is_initialized() => "connected",
        Some(_) => "idle",
        None => "memory",
    };

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ProxyHeaderSessions;
    use crate::db::{ConnectionManager, MemoryStore, PgConnector, PoolSettings, UrlSource};

    #[tokio::test]
    async fn health_returns_ok() {
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            Arc::new(ProxyHeaderSessions::default()),
        );
        let Json(body) = health(State(Arc::new(state))).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.database, "memory");
    }

    #[tokio::test]
    async fn health_does_not_open_pool() {
        let connector = PgConnector::new(
            UrlSource::Env("HARVEST_TEST_UNSET_HEALTH_URL".into()),
            PoolSettings::default(),
        );
        let manager = Arc::new(ConnectionManager::new(connector));
        let state = AppState::postgres(manager.clone(), Arc::new(ProxyHeaderSessions::default()));

        let Json(body) = health(State(Arc::new(state))).await;
        assert_eq!(body.database, "idle");
        assert!(!manager.is_initialized());
    }
}
