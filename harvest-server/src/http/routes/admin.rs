//! Admin endpoints - every route requires the ADMIN role
//!
//! POST /admin/reset-farms - backdate gain dates of all active investments
//! PUT  /admin/settings    - upsert settings, returns the merged view

use std::sync::Arc;

use axum::{
    extract::State,
    middleware,
    routing::{post, put},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;

use crate::farms;
use crate::http::error::ApiError;
use crate::http::extractors::{RequireAdmin, ValidJson};
use crate::http::middleware::require_session;
use crate::http::server::AppState;
use crate::settings::{self, Settings};

/// Reset farms response
#[derive(Debug, Serialize)]
pub struct ResetFarmsResponse {
    pub success: bool,
    pub message: String,
    pub count: u64,
}

/// POST /admin/reset-farms
async fn reset_farms(
    State(state): State<Arc<AppState>>,
    RequireAdmin(caller): RequireAdmin,
) -> Result<Json<ResetFarmsResponse>, ApiError> {
    let reset = farms::reset_farms(&*state.store, Utc::now()).await?;

    tracing::info!(
        admin = %caller.email,
        count = reset.count,
        reset_to = %reset.reset_to,
        "Reset active farms"
    );

    Ok(Json(ResetFarmsResponse {
        success: true,
        message: format!("Reset {} active farms", reset.count),
        count: reset.count,
    }))
}

/// PUT /admin/settings
async fn update_settings(
    State(state): State<Arc<AppState>>,
    RequireAdmin(caller): RequireAdmin,
    ValidJson(req): ValidJson<Settings>,
) -> Result<Json<Settings>, ApiError> {
    let entries = settings::validate_update(req)?;
    let merged = settings::update_settings(&*state.store, &entries).await?;

    tracing::info!(admin = %caller.email, keys = entries.len(), "Updated settings");
    Ok(Json(merged))
}

/// Admin routes, guarded by [`require_session`]
pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/reset-farms", post(reset_farms))
        .route("/admin/settings", put(update_settings))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}
