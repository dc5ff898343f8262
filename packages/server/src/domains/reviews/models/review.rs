use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ReviewId, UserId};

use super::super::data::types::{ReviewFilter, ReviewPatch};

/// Review - a customer's rating of a business user, unique per
/// (reviewer, business) pair.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: ReviewId,
    pub business_user_id: UserId,
    pub reviewer_id: UserId,
    pub rating: Decimal,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Review {
    /// Find review by ID
    pub async fn find_by_id(id: ReviewId, pool: &PgPool) -> Result<Option<Self>> {
        let review = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(review)
    }

    /// Whether the reviewer has already reviewed this business user
    pub async fn exists_for_pair(
        reviewer_id: UserId,
        business_user_id: UserId,
        pool: &PgPool,
    ) -> Result<bool> {
        let found: Option<(ReviewId,)> = sqlx::query_as(
            "SELECT id FROM reviews WHERE reviewer_id = $1 AND business_user_id = $2",
        )
        .bind(reviewer_id)
        .bind(business_user_id)
        .fetch_optional(pool)
        .await?;
        Ok(found.is_some())
    }

    /// List reviews with optional party filters and ordering.
    ///
    /// The ordering key is matched against a fixed whitelist; anything
    /// else falls back to newest-first.
    pub async fn list(filter: &ReviewFilter, pool: &PgPool) -> Result<Vec<Self>> {
        let order_clause = match filter.ordering.as_deref() {
            Some("rating") => "rating ASC",
            Some("-rating") => "rating DESC",
            Some("created_at") => "created_at ASC",
            Some("updated_at") => "updated_at ASC",
            Some("-updated_at") => "updated_at DESC",
            _ => "created_at DESC",
        };

        let query = format!(
            r#"
            SELECT * FROM reviews
            WHERE ($1::uuid IS NULL OR business_user_id = $1)
              AND ($2::uuid IS NULL OR reviewer_id = $2)
            ORDER BY {}
            "#,
            order_clause
        );

        let reviews = sqlx::query_as::<_, Review>(&query)
            .bind(filter.business_user_id)
            .bind(filter.reviewer_id)
            .fetch_all(pool)
            .await?;
        Ok(reviews)
    }

    /// Create a review
    pub async fn create(
        business_user_id: UserId,
        reviewer_id: UserId,
        rating: Decimal,
        description: String,
        pool: &PgPool,
    ) -> Result<Self> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (id, business_user_id, reviewer_id, rating, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(ReviewId::new())
        .bind(business_user_id)
        .bind(reviewer_id)
        .bind(rating)
        .bind(description)
        .fetch_one(pool)
        .await?;
        Ok(review)
    }

    /// Apply an allow-listed patch (rating and/or description)
    pub async fn update(id: ReviewId, patch: &ReviewPatch, pool: &PgPool) -> Result<Self> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews
            SET rating = COALESCE($1, rating),
                description = COALESCE($2, description),
                updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(patch.rating)
        .bind(patch.description.as_deref())
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(review)
    }

    /// Delete a review
    pub async fn delete(id: ReviewId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
