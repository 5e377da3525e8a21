//! Referral codes carried by `/ref/{code}` links

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{4,32}$").expect("invalid referral code regex"));

/// Validated referral code, normalized to uppercase
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferralCode(String);

impl ReferralCode {
    /// Parse a referral code: 4 to 32 ASCII letters or digits.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "referral code" });
        }

        if !CODE_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "referral code",
                reason: "must be 4-32 letters or digits",
            });
        }

        Ok(Self(s.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
