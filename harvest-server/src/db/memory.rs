//! In-process store for tests and local demos
//!
//! Mirrors the PostgreSQL semantics: emails match case-insensitively,
//! settings upserts are all-or-nothing, and only ACTIVE investments are reset.
//! [`MemoryStore::set_unavailable`] makes every call fail like a dropped pool.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::store::{InvestmentStore, SettingsStore, UserDirectory};
use super::DbError;
use crate::models::Investment;

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, String>>,
    settings: RwLock<BTreeMap<String, String>>,
    investments: RwLock<Vec<Investment>>,
    unavailable: AtomicBool,
    role_lookups: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_user(&self, email: &str, role: &str) {
        self.users
            .write()
            .await
            .insert(email.to_lowercase(), role.to_owned());
    }

    pub async fn insert_setting(&self, key: &str, value: &str) {
        self.settings
            .write()
            .await
            .insert(key.to_owned(), value.to_owned());
    }

    pub async fn insert_investment(&self, investment: Investment) {
        self.investments.write().await.push(investment);
    }

    /// Snapshot of all investments in insertion order
    pub async fn investments(&self) -> Vec<Investment> {
        self.investments.read().await.clone()
    }

    /// Make every subsequent call fail with a storage error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of role lookups served so far
    pub fn role_lookups(&self) -> usize {
        self.role_lookups.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), DbError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DbError::Storage(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn find_role(&self, email: &str) -> Result<Option<String>, DbError> {
        self.role_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.users.read().await.get(&email.to_lowercase()).cloned())
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn load_settings(&self) -> Result<Vec<(String, String)>, DbError> {
        self.check_available()?;
        Ok(self
            .settings
            .read()
            .await
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    async fn upsert_settings(&self, entries: &[(String, String)]) -> Result<(), DbError> {
        self.check_available()?;
        let mut settings = self.settings.write().await;
        for (key, value) in entries {
            settings.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl InvestmentStore for MemoryStore {
    async fn reset_active_gain_dates(&self, reset_to: DateTime<Utc>) -> Result<u64, DbError> {
        self.check_available()?;
        let mut count = 0;
        for investment in self.investments.write().await.iter_mut() {
            if investment.is_active() {
                investment.last_gain_date = reset_to;
                count += 1;
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InvestmentStatus;

    #[tokio::test]
    async fn role_lookup_ignores_email_case() {
        let store = MemoryStore::new();
        store.insert_user("Boss@Example.com", "ADMIN").await;

        let role = store.find_role("boss@example.COM").await.unwrap();
        assert_eq!(role.as_deref(), Some("ADMIN"));
        assert_eq!(store.role_lookups(), 1);
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = MemoryStore::new();
        store.set_unavailable(true);

        assert!(store.find_role("a@b.c").await.is_err());
        assert!(store.load_settings().await.is_err());
        assert!(store.reset_active_gain_dates(Utc::now()).await.is_err());

        store.set_unavailable(false);
        assert!(store.load_settings().await.is_ok());
    }

    #[tokio::test]
    async fn reset_skips_inactive() {
        let store = MemoryStore::new();
        let then = Utc::now();
        store
            .insert_investment(Investment::new("a@b.c", InvestmentStatus::Active, then))
            .await;
        store
            .insert_investment(Investment::new("a@b.c", InvestmentStatus::Cancelled, then))
            .await;

        let reset_to = then - chrono::Duration::hours(1);
        assert_eq!(store.reset_active_gain_dates(reset_to).await.unwrap(), 1);

        let investments = store.investments().await;
        assert_eq!(investments[0].last_gain_date, reset_to);
        assert_eq!(investments[1].last_gain_date, then);
    }
}
