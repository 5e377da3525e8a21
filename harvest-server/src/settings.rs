//! Public application settings
//!
//! Stored values are layered over a compiled-in default table. Reads never
//! fail: when storage is unreachable callers get the defaults.

use std::collections::BTreeMap;

use crate::db::{DbError, SettingsStore};
use crate::models::setting::validate_value;
use crate::models::{SettingKey, ValidationError};

/// Flat key/value view returned to clients
pub type Settings = BTreeMap<String, String>;

/// Defaults for every setting the frontend reads
pub const DEFAULT_SETTINGS: &[(&str, &str)] = &[
    ("USDT_RATE", "600"),
    ("MIN_DEPOSIT", "3000"),
    ("MIN_WITHDRAWAL", "2000"),
    ("WITHDRAWAL_FEE_PERCENT", "10"),
    ("REFERRAL_BONUS_PERCENT", "5"),
    ("MAINTENANCE_MODE", "false"),
];

pub fn default_settings() -> Settings {
    DEFAULT_SETTINGS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Layer stored pairs over the defaults; stored values win.
pub fn merge_over_defaults<I>(stored: I) -> Settings
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut settings = default_settings();
    settings.extend(stored);
    settings
}

/// Merged settings, or the defaults if storage fails.
pub async fn load_settings<S>(store: &S) -> Settings
where
    S: SettingsStore + ?Sized,
{
    match store.load_settings().await {
        Ok(stored) => merge_over_defaults(stored),
        Err(e) => {
            tracing::warn!(error = %e, "Settings unavailable, serving defaults");
            default_settings()
        }
    }
}

/// Check keys and values of an update request.
pub fn validate_update(entries: Settings) -> Result<Vec<(String, String)>, ValidationError> {
    if entries.is_empty() {
        return Err(ValidationError::Empty { field: "settings" });
    }

    entries
        .into_iter()
        .map(|(key, value)| -> Result<(String, String), ValidationError> {
            let key = SettingKey::new(&key)?;
            validate_value(&value)?;
            Ok((key.into_string(), value))
        })
        .collect()
}

/// Persist validated entries and return the merged view.
///
/// Unlike [`load_settings`] the write is a privileged mutation, so storage
/// failures propagate.
pub async fn update_settings<S>(store: &S, entries: &[(String, String)]) -> Result<Settings, DbError>
where
    S: SettingsStore + ?Sized,
{
    store.upsert_settings(entries).await?;
    let stored = store.load_settings().await?;
    Ok(merge_over_defaults(stored))
}
