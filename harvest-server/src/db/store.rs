//! Storage traits used by handlers, and the PostgreSQL-backed implementation

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::manager::ConnectionManager;
use super::repos::{InvestmentRepo, SettingsRepo, UserRepo};
use super::DbError;

/// Role lookup for the authorization gate
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Raw stored role of the user with this email, `None` when no user matches.
    async fn find_role(&self, email: &str) -> Result<Option<String>, DbError>;
}

/// Key/value settings storage
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load_settings(&self) -> Result<Vec<(String, String)>, DbError>;

    /// Insert or overwrite every entry atomically.
    async fn upsert_settings(&self, entries: &[(String, String)]) -> Result<(), DbError>;
}

#[async_trait]
pub trait InvestmentStore: Send + Sync {
    /// Set `last_gain_date` on every ACTIVE investment, returning the number updated.
    async fn reset_active_gain_dates(&self, reset_to: DateTime<Utc>) -> Result<u64, DbError>;
}

/// Everything the HTTP layer needs from storage
pub trait Store: UserDirectory + SettingsStore + InvestmentStore {}

impl<T> Store for T where T: UserDirectory + SettingsStore + InvestmentStore + ?Sized {}

/// PostgreSQL store. Every call borrows the pool from the connection manager,
/// so the pool is only opened when a query actually runs.
#[derive(Clone)]
pub struct PgStore {
    manager: Arc<ConnectionManager>,
}

impl PgStore {
    pub fn new(manager: Arc<ConnectionManager>) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &Arc<ConnectionManager> {
        &self.manager
    }
}

#[async_trait]
impl UserDirectory for PgStore {
    async fn find_role(&self, email: &str) -> Result<Option<String>, DbError> {
        let pool = self.manager.handle().await?;
        UserRepo::new(pool).find_role(email).await
    }
}

#[async_trait]
impl SettingsStore for PgStore {
    async fn load_settings(&self) -> Result<Vec<(String, String)>, DbError> {
        let pool = self.manager.handle().await?;
        SettingsRepo::new(pool).list().await
    }

    async fn upsert_settings(&self, entries: &[(String, String)]) -> Result<(), DbError> {
        let pool = self.manager.handle().await?;
        SettingsRepo::new(pool).upsert_many(entries).await
    }
}

#[async_trait]
impl InvestmentStore for PgStore {
    async fn reset_active_gain_dates(&self, reset_to: DateTime<Utc>) -> Result<u64, DbError> {
        let pool = self.manager.handle().await?;
        InvestmentRepo::new(pool).reset_active_gain_dates(reset_to).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::manager::{PgConnector, PoolSettings, UrlSource};

    #[tokio::test]
    async fn configuration_error_surfaces_through_store() {
        let connector = PgConnector::new(
            UrlSource::Env("HARVEST_TEST_UNSET_STORE_URL".into()),
            PoolSettings::default(),
        );
        let store = PgStore::new(Arc::new(ConnectionManager::new(connector)));

        let err = store.find_role("admin@example.com").await.unwrap_err();
        assert!(matches!(err, DbError::Configuration(_)));
        assert!(!store.manager().is_initialized());
    }
}
