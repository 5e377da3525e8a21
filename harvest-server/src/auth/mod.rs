//! Authorization gate for privileged operations
//!
//! A caller is authorized when the request carries a session with an email
//! and the user stored under that email has exactly the required role.
//! The gate performs one storage read and has no side effects.

pub mod session;

use std::fmt;
use std::str::FromStr;

use crate::db::{DbError, UserDirectory};
use crate::models::ValidationError;

pub use session::{ProxyHeaderSessions, Session, SessionResolver};

/// Permission level of a user record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            _ => Err(ValidationError::InvalidVariant {
                field: "role",
                value: s.to_owned(),
            }),
        }
    }
}

/// Identity of an authorized caller, valid for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub email: String,
    pub role: Role,
}

/// Authorization failure
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No session, or no email in it (401)
    #[error("authentication required")]
    Unauthenticated,

    /// Valid session without the required role (403)
    #[error("{required} role required")]
    Forbidden { required: Role },

    /// Role lookup failed (500)
    #[error(transparent)]
    Storage(#[from] DbError),
}

/// Decide whether the session's user holds `required`.
///
/// Unknown users and unrecognized stored roles are denied, never passed through.
pub async fn authorize<U>(
    session: Option<&Session>,
    required: Role,
    users: &U,
) -> Result<Caller, AuthError>
where
    U: UserDirectory + ?Sized,
{
    let email = session
        .and_then(Session::email)
        .ok_or(AuthError::Unauthenticated)?;

    let stored = users.find_role(email).await?;

    let role = match stored.as_deref().map(Role::from_str) {
        Some(Ok(role)) => Some(role),
        Some(Err(_)) => {
            tracing::warn!(%email, stored_role = ?stored, "Unrecognized stored role, denying");
            None
        }
        None => None,
    };

    match role {
        Some(role) if role == required => Ok(Caller {
            email: email.to_owned(),
            role,
        }),
        Some(role) => {
            tracing::debug!(%email, %role, %required, "Role mismatch");
            Err(AuthError::Forbidden { required })
        }
        None => {
            tracing::debug!(%email, %required, "No role on record");
            Err(AuthError::Forbidden { required })
        }
    }
}
