//! Repository implementations for PostgreSQL access
//!
//! Each repository borrows a pool and follows these patterns:
//! - One statement per operation where possible
//! - Handles conflicts via ON CONFLICT (no check-then-insert)
//! - Uses transactions for multi-row writes

pub mod investments;
pub mod settings;
pub mod users;

pub use investments::InvestmentRepo;
pub use settings::SettingsRepo;
pub use users::UserRepo;
