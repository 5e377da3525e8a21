//! User repository - role lookup for the authorization gate

use sqlx::PgPool;

use crate::db::DbError;

pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Stored role for a user, matching email case-insensitively.
    pub async fn find_role(&self, email: &str) -> Result<Option<String>, DbError> {
        let role = sqlx::query_scalar::<_, String>(
            "SELECT role FROM users WHERE lower(email) = lower($1)",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(role)
    }

    /// Create or update a user's role.
    pub async fn upsert(&self, email: &str, role: &str) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO users (email, role) VALUES (lower($1), $2)
            ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
            "#,
        )
        .bind(email)
        .bind(role)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{migrations, ConnectionManager, PgConnector};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p harvest-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn find_role_ignores_email_case() {
        let manager = ConnectionManager::new(PgConnector::from_env());
        let pool = manager.handle().await.expect("pool");
        migrations::run(pool).await.expect("migrations");

        let repo = UserRepo::new(pool);
        repo.upsert("Case.Test@Example.com", "ADMIN").await.unwrap();

        let role = repo.find_role("case.test@example.COM").await.unwrap();
        assert_eq!(role.as_deref(), Some("ADMIN"));
        assert_eq!(repo.find_role("nobody@example.com").await.unwrap(), None);
    }
}
