use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::str::FromStr;

use crate::common::auth::Role;
use crate::common::UserId;

use super::super::data::ProfilePatch;

/// Profile - role and public contact data attached to a user.
///
/// The `user_type` column is the source of truth for a principal's role.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub user_id: UserId,
    pub user_type: String, // 'business', 'customer'
    pub first_name: String,
    pub last_name: String,
    pub file: Option<String>,
    pub location: String,
    pub tel: String,
    pub description: String,
    pub working_hours: String,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn role(&self) -> Option<Role> {
        Role::from_str(&self.user_type).ok()
    }
}

/// Profile row joined with its user's account fields, for list and
/// detail responses.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProfileRecord {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub user_type: String,
    pub first_name: String,
    pub last_name: String,
    pub file: Option<String>,
    pub location: String,
    pub tel: String,
    pub description: String,
    pub working_hours: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Profile {
    /// Find profile by user ID
    pub async fn find_by_user_id(user_id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(profile)
    }

    /// Resolve the role of a user, if they have a profile
    pub async fn role_of(user_id: UserId, pool: &PgPool) -> Result<Option<Role>> {
        let profile = Self::find_by_user_id(user_id, pool).await?;
        Ok(profile.and_then(|p| p.role()))
    }

    /// Apply an allow-listed patch to a profile (unspecified fields keep
    /// their current values)
    pub async fn update(user_id: UserId, patch: &ProfilePatch, pool: &PgPool) -> Result<Self> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET first_name = COALESCE($1, first_name),
                last_name = COALESCE($2, last_name),
                file = COALESCE($3, file),
                location = COALESCE($4, location),
                tel = COALESCE($5, tel),
                description = COALESCE($6, description),
                working_hours = COALESCE($7, working_hours)
            WHERE user_id = $8
            RETURNING *
            "#,
        )
        .bind(patch.first_name.as_deref())
        .bind(patch.last_name.as_deref())
        .bind(patch.file.as_deref())
        .bind(patch.location.as_deref())
        .bind(patch.tel.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.working_hours.as_deref())
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(profile)
    }
}

impl ProfileRecord {
    /// Find a profile with its account fields by user ID
    pub async fn find_by_user_id(user_id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        let record = sqlx::query_as::<_, ProfileRecord>(
            r#"
            SELECT p.user_id, u.username, u.email, p.user_type, p.first_name,
                   p.last_name, p.file, p.location, p.tel, p.description,
                   p.working_hours, p.created_at
            FROM profiles p
            JOIN users u ON u.id = p.user_id
            WHERE p.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(record)
    }

    /// List profiles of a given type
    pub async fn list_by_type(user_type: &str, pool: &PgPool) -> Result<Vec<Self>> {
        let records = sqlx::query_as::<_, ProfileRecord>(
            r#"
            SELECT p.user_id, u.username, u.email, p.user_type, p.first_name,
                   p.last_name, p.file, p.location, p.tel, p.description,
                   p.working_hours, p.created_at
            FROM profiles p
            JOIN users u ON u.id = p.user_id
            WHERE p.user_type = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(user_type)
        .fetch_all(pool)
        .await?;
        Ok(records)
    }
}
