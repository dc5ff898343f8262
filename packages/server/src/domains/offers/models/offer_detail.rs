use anyhow::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::common::{OfferDetailId, OfferId};

/// OfferDetail - one pricing tier (basic/standard/premium) of an offer.
///
/// Owned exclusively by its parent offer; the (offer_id, offer_type)
/// pair is unique.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OfferDetail {
    pub id: OfferDetailId,
    pub offer_id: OfferId,
    pub title: String,
    pub offer_type: String, // 'basic', 'standard', 'premium'
    pub price: Decimal,
    pub delivery_time_in_days: i32,
    pub revisions: i32, // -1 means unlimited
    pub features: Json<Vec<String>>,
}

/// Pricing tier enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OfferType {
    Basic,
    Standard,
    Premium,
}

impl OfferType {
    /// All tiers an offer must carry, in presentation order.
    pub const ALL: [OfferType; 3] = [OfferType::Basic, OfferType::Standard, OfferType::Premium];
}

impl std::fmt::Display for OfferType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OfferType::Basic => write!(f, "basic"),
            OfferType::Standard => write!(f, "standard"),
            OfferType::Premium => write!(f, "premium"),
        }
    }
}

impl std::str::FromStr for OfferType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "basic" => Ok(OfferType::Basic),
            "standard" => Ok(OfferType::Standard),
            "premium" => Ok(OfferType::Premium),
            _ => Err(anyhow::anyhow!("Invalid offer type: {}", s)),
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl OfferDetail {
    /// Find detail by ID
    pub async fn find_by_id(id: OfferDetailId, pool: &PgPool) -> Result<Option<Self>> {
        let detail = sqlx::query_as::<_, OfferDetail>("SELECT * FROM offer_details WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(detail)
    }

    /// Find all details of an offer, basic tier first
    pub async fn find_by_offer_id(offer_id: OfferId, pool: &PgPool) -> Result<Vec<Self>> {
        let details = sqlx::query_as::<_, OfferDetail>(
            r#"
            SELECT * FROM offer_details
            WHERE offer_id = $1
            ORDER BY CASE offer_type
                WHEN 'basic' THEN 0
                WHEN 'standard' THEN 1
                ELSE 2
            END
            "#,
        )
        .bind(offer_id)
        .fetch_all(pool)
        .await?;
        Ok(details)
    }

    /// Find details for a set of offers (collection hydration)
    pub async fn find_by_offer_ids(offer_ids: &[OfferId], pool: &PgPool) -> Result<Vec<Self>> {
        let details = sqlx::query_as::<_, OfferDetail>(
            "SELECT * FROM offer_details WHERE offer_id = ANY($1) ORDER BY id",
        )
        .bind(offer_ids)
        .fetch_all(pool)
        .await?;
        Ok(details)
    }

    /// List all details
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>> {
        let details = sqlx::query_as::<_, OfferDetail>("SELECT * FROM offer_details ORDER BY id")
            .fetch_all(pool)
            .await?;
        Ok(details)
    }
}
