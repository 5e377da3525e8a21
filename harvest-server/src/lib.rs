//! harvest-server: HTTP backend for the harvest farm platform
//!
//! Public settings, referral links and admin farm maintenance on top of two
//! shared pieces: a lazily opened PostgreSQL pool owned by
//! [`db::ConnectionManager`], and the role check in [`auth::authorize`].

pub mod auth;
pub mod config;
pub mod db;
pub mod farms;
pub mod http;
pub mod models;
pub mod settings;

pub use auth::{authorize, AuthError, Caller, Role, Session};
pub use config::{ConfigError, ServerConfig};
pub use db::{ConnectionManager, DbError, MemoryStore, PgStore};
pub use http::{build_router, run_server, AppState};
