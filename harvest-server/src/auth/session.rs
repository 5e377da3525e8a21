//! Session resolution from request headers
//!
//! Identity is asserted upstream (an authenticating reverse proxy) and passed
//! in a single header carrying the caller's email.

use axum::http::{HeaderMap, HeaderName};

use crate::models::ValidationError;

/// Identity assertion attached to a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    email: Option<String>,
}

impl Session {
    /// Blank emails are treated as missing.
    pub fn new(email: Option<&str>) -> Self {
        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_owned);
        Self { email }
    }

    pub fn with_email(email: &str) -> Self {
        Self::new(Some(email))
    }

    /// Session present but carrying no identifying field
    pub fn anonymous() -> Self {
        Self { email: None }
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

/// Resolves the session for an inbound request
pub trait SessionResolver: Send + Sync {
    fn resolve(&self, headers: &HeaderMap) -> Option<Session>;
}

/// Reads the email asserted by the proxy from one header
#[derive(Debug, Clone)]
pub struct ProxyHeaderSessions {
    header: HeaderName,
}

impl ProxyHeaderSessions {
    pub const DEFAULT_HEADER: &'static str = "x-forwarded-email";

    pub fn new(header: HeaderName) -> Self {
        Self { header }
    }

    /// Parse a header name, e.g. from configuration.
    pub fn from_name(name: &str) -> Result<Self, ValidationError> {
        let header = HeaderName::try_from(name).map_err(|_| ValidationError::InvalidFormat {
            field: "session header",
            reason: "not a valid HTTP header name",
        })?;
        Ok(Self::new(header))
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }
}

impl Default for ProxyHeaderSessions {
    fn default() -> Self {
        Self::new(HeaderName::from_static(Self::DEFAULT_HEADER))
    }
}

impl SessionResolver for ProxyHeaderSessions {
    fn resolve(&self, headers: &HeaderMap) -> Option<Session> {
        let value = headers.get(&self.header)?;
        // non-UTF-8 header still counts as a session, just without an email
        Some(Session::new(value.to_str().ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn missing_header_means_no_session() {
        let sessions = ProxyHeaderSessions::default();
        assert_eq!(sessions.resolve(&HeaderMap::new()), None);
    }

    #[test]
    fn header_value_becomes_email() {
        let sessions = ProxyHeaderSessions::default();
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-email", HeaderValue::from_static(" admin@example.com "));

        let session = sessions.resolve(&headers).unwrap();
        assert_eq!(session.email(), Some("admin@example.com"));
    }

    #[test]
    fn blank_header_is_session_without_email() {
        let sessions = ProxyHeaderSessions::default();
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-email", HeaderValue::from_static("   "));

        assert_eq!(sessions.resolve(&headers), Some(Session::anonymous()));
    }

    #[test]
    fn custom_header_name() {
        let sessions = ProxyHeaderSessions::from_name("X-Auth-Request-Email").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("x-auth-request-email", HeaderValue::from_static("u@example.com"));

        assert_eq!(
            sessions.resolve(&headers).and_then(|s| s.email().map(str::to_owned)),
            Some("u@example.com".to_string())
        );
        assert!(ProxyHeaderSessions::from_name("bad header").is_err());
    }
}
