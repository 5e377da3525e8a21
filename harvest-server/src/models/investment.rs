//! Farm investments

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValidationError;

/// Lifecycle status of an investment, stored as uppercase text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InvestmentStatus {
    Active,
    Completed,
    Cancelled,
}

impl InvestmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for InvestmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(ValidationError::InvalidVariant {
                field: "investment status",
                value: other.to_owned(),
            }),
        }
    }
}

/// A farm investment and the last time it accrued gains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investment {
    pub id: Uuid,
    pub user_email: String,
    pub status: InvestmentStatus,
    pub last_gain_date: DateTime<Utc>,
}

impl Investment {
    pub fn new(
        user_email: impl Into<String>,
        status: InvestmentStatus,
        last_gain_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_email: user_email.into(),
            status,
            last_gain_date,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == InvestmentStatus::Active
    }
}
