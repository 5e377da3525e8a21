//! Farm maintenance
//!
//! Resetting farms backdates the gain timestamp of every active investment so
//! the next accrual run treats them as due.

use chrono::{DateTime, Duration, Utc};

use crate::db::{DbError, InvestmentStore};

/// How far `last_gain_date` is moved behind the reset time
pub const GAIN_RESET_OFFSET_HOURS: i64 = 25;

/// Outcome of a reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FarmReset {
    pub count: u64,
    pub reset_to: DateTime<Utc>,
}

pub fn gain_reset_target(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::hours(GAIN_RESET_OFFSET_HOURS)
}

/// Set `last_gain_date = now - 25h` on all active investments.
pub async fn reset_farms<S>(store: &S, now: DateTime<Utc>) -> Result<FarmReset, DbError>
where
    S: InvestmentStore + ?Sized,
{
    let reset_to = gain_reset_target(now);
    let count = store.reset_active_gain_dates(reset_to).await?;

    Ok(FarmReset { count, reset_to })
}
