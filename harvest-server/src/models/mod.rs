//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod investment;
pub mod referral;
pub mod setting;
pub mod validation;

pub use investment::{Investment, InvestmentStatus};
pub use referral::ReferralCode;
pub use setting::SettingKey;
pub use validation::ValidationError;
