//! Database layer - connection manager, repositories and storage traits
//!
//! # Design Principles
//!
//! - One pool per process, built on first use by [`ConnectionManager`]
//! - Handlers talk to the [`Store`] trait, never to a pool directly
//! - Rely on DB constraints and `ON CONFLICT` - no check-then-insert
//! - Transactions for multi-row writes

pub mod manager;
pub mod memory;
pub mod migrations;
pub mod repos;
pub mod store;

pub use manager::{ConnectionManager, Connector, PgConnector, PoolSettings, UrlSource};
pub use memory::MemoryStore;
pub use store::{InvestmentStore, PgStore, SettingsStore, Store, UserDirectory};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Connection string missing or malformed
    #[error("database configuration error: {0}")]
    Configuration(String),

    /// Query or connection failure
    #[error("database error: {0}")]
    Storage(#[from] sqlx::Error),
}
