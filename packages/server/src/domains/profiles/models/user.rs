use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::auth::Role;
use crate::common::UserId;

/// User - an authenticated account. The marketplace role lives on the
/// associated profile row, not here.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub password_salt: String,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl User {
    /// Find user by ID
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(username: &str, pool: &PgPool) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Check whether a user with this ID exists
    pub async fn exists(id: UserId, pool: &PgPool) -> Result<bool> {
        let found: Option<(UserId,)> = sqlx::query_as("SELECT id FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(found.is_some())
    }

    /// Check whether a username is already taken
    pub async fn username_taken(username: &str, pool: &PgPool) -> Result<bool> {
        let found: Option<(UserId,)> = sqlx::query_as("SELECT id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?;
        Ok(found.is_some())
    }

    /// Register a new user together with their role profile.
    ///
    /// User and profile rows commit atomically; a failure on either side
    /// leaves no account behind.
    pub async fn register(
        username: String,
        email: String,
        password_hash: String,
        password_salt: String,
        role: Role,
        pool: &PgPool,
    ) -> Result<Self> {
        let mut tx = pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password_hash, password_salt)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(UserId::new())
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(password_salt)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, user_type)
            VALUES ($1, $2)
            "#,
        )
        .bind(user.id)
        .bind(role.to_string())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(user)
    }

    /// Update a user's email address
    pub async fn update_email(id: UserId, email: &str, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE users SET email = $1 WHERE id = $2")
            .bind(email)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
