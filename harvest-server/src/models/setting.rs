//! Setting key/value validation
//!
//! Key format: upper snake case, e.g. `USDT_RATE`

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum length for setting keys
const MAX_KEY_LEN: usize = 64;

/// Maximum length for setting values
pub const MAX_VALUE_LEN: usize = 1024;

static KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9_]{0,63}$").expect("invalid setting key regex"));

/// Validated setting key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SettingKey(String);

impl SettingKey {
    /// Create a setting key, validating its format.
    ///
    /// # Rules
    /// - Max 64 characters
    /// - Uppercase letters, digits and underscores
    /// - Must start with a letter
    ///
    /// # Example
    /// ```
    /// use harvest_server::models::SettingKey;
    ///
    /// assert!(SettingKey::new("USDT_RATE").is_ok());
    /// assert!(SettingKey::new("usdt_rate").is_err());
    /// assert!(SettingKey::new("_RATE").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "setting key" });
        }

        if s.len() > MAX_KEY_LEN {
            return Err(ValidationError::TooLong {
                field: "setting key",
                max: MAX_KEY_LEN,
            });
        }

        if !KEY_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "setting key",
                reason: "must be uppercase letters, digits and underscores, starting with a letter",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for SettingKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Check a setting value against the storage limits.
pub fn validate_value(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > MAX_VALUE_LEN {
        return Err(ValidationError::TooLong {
            field: "setting value",
            max: MAX_VALUE_LEN,
        });
    }
    Ok(())
}
