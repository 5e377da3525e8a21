//! Settings repository - flat key/value table

use sqlx::PgPool;

use crate::db::DbError;

pub struct SettingsRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All stored settings, ordered by key.
    pub async fn list(&self) -> Result<Vec<(String, String)>, DbError> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT key, value FROM settings ORDER BY key",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Upsert entries in a single transaction.
    pub async fn upsert_many(&self, entries: &[(String, String)]) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        for (key, value) in entries {
            sqlx::query(
                r#"
                INSERT INTO settings (key, value) VALUES ($1, $2)
                ON CONFLICT (key) DO UPDATE
                SET value = EXCLUDED.value, updated_at = NOW()
                "#,
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
