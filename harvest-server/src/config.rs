//! Server configuration - environment loading
//!
//! Configuration is loaded from environment variables:
//! - `HARVEST_BIND`: listen address (default: 127.0.0.1:3000)
//! - `HARVEST_SESSION_HEADER`: identity header set by the auth proxy
//! - `HARVEST_MAX_CONNECTIONS`: database pool size (default: 5)
//! - `HARVEST_CORS_PERMISSIVE`: `true` to allow any origin
//!
//! `DATABASE_URL` is not read here; the connection manager reads
//! it on first use.

use std::net::SocketAddr;

use crate::auth::ProxyHeaderSessions;
use crate::db::{PgConnector, PoolSettings, UrlSource};

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3000)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    pub cors_permissive: bool,

    /// Header carrying the caller's email
    pub session_header: String,

    /// Explicit connection string; `None` reads `DATABASE_URL` lazily
    pub database_url: Option<String>,

    pub pool: PoolSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_permissive: false,
            session_header: ProxyHeaderSessions::DEFAULT_HEADER.to_string(),
            database_url: None,
            pool: PoolSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Create config from an arbitrary variable lookup (for testing)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(bind) = lookup("HARVEST_BIND") {
            config.bind_addr = bind.parse().map_err(|e| ConfigError::Invalid {
                var: "HARVEST_BIND",
                reason: format!("{}", e),
            })?;
        }

        if let Some(header) = lookup("HARVEST_SESSION_HEADER") {
            config.session_header = header;
        }

        if let Some(max) = lookup("HARVEST_MAX_CONNECTIONS") {
            config.pool.max_connections = match max.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "HARVEST_MAX_CONNECTIONS",
                        reason: format!("expected a positive integer, got '{}'", max),
                    })
                }
            };
        }

        if let Some(flag) = lookup("HARVEST_CORS_PERMISSIVE") {
            config.cors_permissive = matches!(flag.trim(), "1" | "true" | "TRUE" | "yes");
        }

        Ok(config)
    }

    /// Session resolver for the configured header
    pub fn session_resolver(&self) -> Result<ProxyHeaderSessions, ConfigError> {
        ProxyHeaderSessions::from_name(&self.session_header).map_err(|e| ConfigError::Invalid {
            var: "HARVEST_SESSION_HEADER",
            reason: e.to_string(),
        })
    }

    /// Database connector; does not read or validate the URL yet
    pub fn connector(&self) -> PgConnector {
        let source = match &self.database_url {
            Some(url) => UrlSource::Explicit(url.clone()),
            None => UrlSource::from_env(),
        };
        PgConnector::new(source, self.pool.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 3000);
        assert!(!config.cors_permissive);
        assert_eq!(config.session_header, "x-forwarded-email");
        assert_eq!(config.pool.max_connections, 5);
    }

    #[test]
    fn env_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HARVEST_BIND", "0.0.0.0:8080"),
            ("HARVEST_MAX_CONNECTIONS", "12"),
            ("HARVEST_CORS_PERMISSIVE", "true"),
            ("HARVEST_SESSION_HEADER", "x-auth-request-email"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.pool.max_connections, 12);
        assert!(config.cors_permissive);
        assert_eq!(config.session_resolver().unwrap().header(), "x-auth-request-email");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[("HARVEST_BIND", "nowhere")])).unwrap_err();
        assert!(err.to_string().contains("HARVEST_BIND"));

        assert!(ServerConfig::from_lookup(lookup(&[("HARVEST_MAX_CONNECTIONS", "0")])).is_err());
    }

    #[test]
    fn connector_prefers_explicit_url() {
        let config = ServerConfig {
            database_url: Some("postgres://localhost/harvest".into()),
            ..ServerConfig::default()
        };
        assert_eq!(
            config.connector().source(),
            &UrlSource::Explicit("postgres://localhost/harvest".into())
        );
        assert_eq!(
            ServerConfig::default().connector().source(),
            &UrlSource::Env("DATABASE_URL".into())
        );
    }
}
