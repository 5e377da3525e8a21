//! Investment repository - bulk maintenance of farm gain dates

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::db::DbError;
use crate::models::{Investment, InvestmentStatus};

pub struct InvestmentRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> InvestmentRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Single UPDATE over all active investments.
    pub async fn reset_active_gain_dates(&self, reset_to: DateTime<Utc>) -> Result<u64, DbError> {
        let result = sqlx::query("UPDATE investments SET last_gain_date = $1 WHERE status = $2")
            .bind(reset_to)
            .bind(InvestmentStatus::Active.as_str())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn insert(&self, investment: &Investment) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO investments (id, user_email, status, last_gain_date)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(investment.id)
        .bind(&investment.user_email)
        .bind(investment.status.as_str())
        .bind(investment.last_gain_date)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{migrations, ConnectionManager, PgConnector};
    use chrono::Duration;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn reset_touches_only_active_rows() {
        let manager = ConnectionManager::new(PgConnector::from_env());
        let pool = manager.handle().await.expect("pool");
        migrations::run(pool).await.expect("migrations");

        let repo = InvestmentRepo::new(pool);
        let now = Utc::now();
        let completed = Investment::new("farmer@example.com", InvestmentStatus::Completed, now);
        repo.insert(&completed).await.unwrap();
        repo.insert(&Investment::new("farmer@example.com", InvestmentStatus::Active, now))
            .await
            .unwrap();

        let reset_to = now - Duration::hours(25);
        let count = repo.reset_active_gain_dates(reset_to).await.unwrap();
        assert!(count >= 1);

        let (untouched,): (DateTime<Utc>,) =
            sqlx::query_as("SELECT last_gain_date FROM investments WHERE id = $1")
                .bind(completed.id)
                .fetch_one(pool)
                .await
                .unwrap();
        assert_ne!(untouched, reset_to);
    }
}
