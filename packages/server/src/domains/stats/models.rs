use anyhow::Result;
use serde::Serialize;
use sqlx::PgPool;

use crate::common::types::round_to_one_decimal;

/// Public landing-page statistics.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub review_count: i64,
    pub average_rating: f64,
    pub business_profile_count: i64,
    pub offer_count: i64,
}

impl DashboardStats {
    /// Compute current counts. The average rating is rounded to one
    /// decimal place and reads 0.0 when there are no reviews.
    pub async fn load(pool: &PgPool) -> Result<Self> {
        let (review_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reviews")
            .fetch_one(pool)
            .await?;

        let (average_rating,): (Option<f64>,) =
            sqlx::query_as("SELECT AVG(rating)::float8 FROM reviews")
                .fetch_one(pool)
                .await?;

        let (business_profile_count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM profiles WHERE user_type = 'business'")
                .fetch_one(pool)
                .await?;

        let (offer_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM offers")
            .fetch_one(pool)
            .await?;

        Ok(DashboardStats {
            review_count,
            average_rating: round_to_one_decimal(average_rating.unwrap_or(0.0)),
            business_profile_count,
            offer_count,
        })
    }
}
