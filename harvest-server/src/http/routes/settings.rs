//! Public settings endpoint
//!
//! GET /settings - flat JSON object of string values, always 200

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::http::server::AppState;
use crate::settings::{load_settings, Settings};

/// GET /settings
async fn get_settings(State(state): State<Arc<AppState>>) -> Json<Settings> {
    Json(load_settings(&*state.store).await)
}

/// Settings routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/settings", get(get_settings))
}
