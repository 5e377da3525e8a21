//! Referral links
//!
//! GET /ref/{code} - redirect to registration with the referral code attached

use std::sync::Arc;

use axum::{response::Redirect, routing::get, Router};

use crate::http::extractors::MaybeReferral;
use crate::http::server::AppState;

/// Registration page the redirect lands on
const REGISTER_PATH: &str = "/register";

/// GET /ref/{code}
async fn referral_redirect(MaybeReferral(code): MaybeReferral) -> Redirect {
    match code {
        Some(code) => {
            tracing::debug!(code = code.as_str(), "Referral link followed");
            Redirect::temporary(&format!("{}?ref={}", REGISTER_PATH, code.as_str()))
        }
        None => Redirect::temporary(REGISTER_PATH),
    }
}

/// Referral routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/ref/{code}", get(referral_redirect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReferralCode;
    use axum::http::{header::LOCATION, StatusCode};
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn valid_code_is_forwarded() {
        let code = ReferralCode::new("farm42").ok();
        let response = referral_redirect(MaybeReferral(code)).await.into_response();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[LOCATION], "/register?ref=FARM42");
    }

    #[tokio::test]
    async fn missing_code_drops_parameter() {
        let response = referral_redirect(MaybeReferral(None)).await.into_response();
        assert_eq!(response.headers()[LOCATION], "/register");
    }
}
