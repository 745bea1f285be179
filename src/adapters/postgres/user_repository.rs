//! PostgreSQL adapter for UserStore.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::user::User;
use crate::ports::{StoreError, UserStore};

/// PostgreSQL implementation of UserStore.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn user_from_row(row: &sqlx::postgres::PgRow) -> User {
        User {
            id: row.get("id"),
            email: row.get("email"),
            points: row.get("points"),
            level: row.get("level"),
            is_premium: row.get("is_premium"),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn upsert_by_email(&self, email: &str) -> Result<User, StoreError> {
        // The conflict arm re-writes email to itself so the statement
        // returns the existing row instead of affecting zero rows.
        let row = sqlx::query(
            r#"
            INSERT INTO users (email)
            VALUES ($1)
            ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
            RETURNING id, email, points, level, is_premium, created_at
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::new("users.upsert_by_email", e.to_string()))?;

        Ok(Self::user_from_row(&row))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, points, level, is_premium, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::new("users.find_by_id", e.to_string()))?;

        Ok(row.as_ref().map(Self::user_from_row))
    }

    async fn set_premium(&self, id: Uuid) -> Result<(), StoreError> {
        // Setting true on an already-premium user affects the row but
        // changes nothing; missing ids are tolerated so a stale
        // metadata tag cannot fail the webhook apply path.
        sqlx::query("UPDATE users SET is_premium = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::new("users.set_premium", e.to_string()))?;

        Ok(())
    }
}
