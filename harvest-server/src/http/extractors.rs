//! Custom Axum extractors

use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::server::AppState;
use crate::auth::{Caller, Role};
use crate::models::{ReferralCode, ValidationError};

/// Caller that passed the authorization gate with the ADMIN role
pub struct RequireAdmin(pub Caller);

impl FromRequestParts<Arc<AppState>> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let caller = state.authorize(&parts.headers, Role::Admin).await?;
        Ok(Self(caller))
    }
}

/// Referral code from the path; `None` when malformed
pub struct MaybeReferral(pub Option<ReferralCode>);

impl<S> FromRequestParts<S> for MaybeReferral
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let code = match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(raw)) => ReferralCode::new(&raw).ok(),
            Err(_) => None,
        };
        Ok(Self(code))
    }
}

/// JSON body; any rejection becomes a 400 validation error
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ValidationError::MalformedBody {
                detail: rejection.body_text(),
            }
            .into()),
        }
    }
}
