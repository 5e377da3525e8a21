//! Route-protecting middleware

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::error::ApiError;
use super::server::AppState;

/// Reject requests that carry no session at all before they reach a handler.
///
/// Role checks stay with the handlers; this only keeps anonymous traffic off
/// protected routes.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if state.sessions.resolve(request.headers()).is_none() {
        tracing::debug!(path = %request.uri().path(), "Rejected request without session");
        return ApiError::Unauthenticated.into_response();
    }

    next.run(request).await
}
