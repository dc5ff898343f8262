use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::common::auth::Principal;
use crate::common::pagination::PageParams;
use crate::common::{ApiError, ApiResult, OfferDetailId, OfferId, UserId};

use super::super::data::types::{CreateOfferCommand, OfferPatchCommand, DEFAULT_DETAIL_TITLE};
use super::offer_detail::OfferDetail;

/// Offer - a business user's service listing with exactly three pricing
/// tiers after creation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Offer {
    pub id: OfferId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An offer hydrated with its details.
///
/// `min_price` and `min_delivery_time` are computed per request from the
/// current details, never cached.
#[derive(Debug, Clone)]
pub struct OfferAggregate {
    pub offer: Offer,
    pub details: Vec<OfferDetail>,
}

impl OfferAggregate {
    pub fn min_price(&self) -> Decimal {
        self.details
            .iter()
            .map(|d| d.price)
            .min()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn min_delivery_time(&self) -> i32 {
        self.details
            .iter()
            .map(|d| d.delivery_time_in_days)
            .min()
            .unwrap_or(0)
    }
}

/// Which offers a principal may see in list responses.
enum ListScope {
    All,
    Owner(UserId),
    Nothing,
}

fn list_scope(viewer: &Principal) -> ListScope {
    if viewer.is_staff {
        return ListScope::All;
    }
    if viewer.is_business() {
        return ListScope::Owner(viewer.user_id);
    }
    if viewer.is_customer() {
        return ListScope::All;
    }
    ListScope::Nothing
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Offer {
    /// Find offer by ID
    pub async fn find_by_id(id: OfferId, pool: &PgPool) -> Result<Option<Self>> {
        let offer = sqlx::query_as::<_, Offer>("SELECT * FROM offers WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(offer)
    }

    /// Hydrate an offer with its details
    pub async fn load_aggregate(id: OfferId, pool: &PgPool) -> Result<Option<OfferAggregate>> {
        let Some(offer) = Self::find_by_id(id, pool).await? else {
            return Ok(None);
        };
        let details = OfferDetail::find_by_offer_id(id, pool).await?;
        Ok(Some(OfferAggregate { offer, details }))
    }

    /// List offers visible to the viewer, newest first, with total count.
    ///
    /// Business principals see their own listings, customers see all,
    /// staff sees all; a principal with no role sees nothing.
    pub async fn list_visible(
        viewer: &Principal,
        params: &PageParams,
        pool: &PgPool,
    ) -> Result<(i64, Vec<Self>)> {
        match list_scope(viewer) {
            ListScope::Nothing => Ok((0, Vec::new())),
            ListScope::All => {
                let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM offers")
                    .fetch_one(pool)
                    .await?;
                let offers = sqlx::query_as::<_, Offer>(
                    "SELECT * FROM offers ORDER BY updated_at DESC LIMIT $1 OFFSET $2",
                )
                .bind(params.limit())
                .bind(params.offset())
                .fetch_all(pool)
                .await?;
                Ok((count, offers))
            }
            ListScope::Owner(owner_id) => {
                let (count,): (i64,) =
                    sqlx::query_as("SELECT COUNT(*) FROM offers WHERE owner_id = $1")
                        .bind(owner_id)
                        .fetch_one(pool)
                        .await?;
                let offers = sqlx::query_as::<_, Offer>(
                    r#"
                    SELECT * FROM offers
                    WHERE owner_id = $1
                    ORDER BY updated_at DESC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(owner_id)
                .bind(params.limit())
                .bind(params.offset())
                .fetch_all(pool)
                .await?;
                Ok((count, offers))
            }
        }
    }

    /// Create an offer with its three details atomically.
    ///
    /// The command has already been validated (exactly three details with
    /// distinct tiers); either all rows commit or none do.
    pub async fn create_aggregate(
        owner_id: UserId,
        command: CreateOfferCommand,
        pool: &PgPool,
    ) -> Result<OfferAggregate> {
        let mut tx = pool.begin().await?;

        let offer = sqlx::query_as::<_, Offer>(
            r#"
            INSERT INTO offers (id, owner_id, title, description, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(OfferId::new())
        .bind(owner_id)
        .bind(&command.title)
        .bind(&command.description)
        .bind(command.image.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        let mut details = Vec::with_capacity(command.details.len());
        for spec in &command.details {
            let detail = sqlx::query_as::<_, OfferDetail>(
                r#"
                INSERT INTO offer_details
                    (id, offer_id, title, offer_type, price, delivery_time_in_days, revisions, features)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING *
                "#,
            )
            .bind(OfferDetailId::new())
            .bind(offer.id)
            .bind(&spec.title)
            .bind(spec.offer_type.to_string())
            .bind(spec.price)
            .bind(spec.delivery_time_in_days)
            .bind(spec.revisions)
            .bind(Json(&spec.features))
            .fetch_one(&mut *tx)
            .await?;
            details.push(detail);
        }

        tx.commit().await?;
        Ok(OfferAggregate { offer, details })
    }

    /// Apply a validated patch to an offer and its details atomically.
    ///
    /// Detail entries are matched on `offer_type`: a match is partially
    /// overwritten in place, a miss creates a new detail under this offer.
    /// Details not mentioned in the patch are never touched or deleted.
    pub async fn apply_patch(
        id: OfferId,
        command: OfferPatchCommand,
        pool: &PgPool,
    ) -> ApiResult<OfferAggregate> {
        let mut tx = pool.begin().await?;

        let offer = sqlx::query_as::<_, Offer>(
            r#"
            UPDATE offers
            SET title = COALESCE($1, title),
                description = COALESCE($2, description),
                image = COALESCE($3, image),
                updated_at = NOW()
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(command.title.as_deref())
        .bind(command.description.as_deref())
        .bind(command.image.as_deref())
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        for patch in &command.details {
            let updated = sqlx::query_as::<_, OfferDetail>(
                r#"
                UPDATE offer_details
                SET title = COALESCE($1, title),
                    price = COALESCE($2, price),
                    delivery_time_in_days = COALESCE($3, delivery_time_in_days),
                    revisions = COALESCE($4, revisions),
                    features = COALESCE($5, features)
                WHERE offer_id = $6 AND offer_type = $7
                RETURNING *
                "#,
            )
            .bind(patch.title.as_deref())
            .bind(patch.price)
            .bind(patch.delivery_time_in_days)
            .bind(patch.revisions)
            .bind(patch.features.as_ref().map(Json))
            .bind(id)
            .bind(patch.offer_type.to_string())
            .fetch_optional(&mut *tx)
            .await?;

            if updated.is_none() {
                // No detail with this tier yet: the patch entry must fully
                // specify the new detail's required fields.
                let price = patch.price.ok_or_else(|| {
                    ApiError::validation(format!(
                        "price field required to add a '{}' detail",
                        patch.offer_type
                    ))
                })?;
                let delivery_time_in_days = patch.delivery_time_in_days.ok_or_else(|| {
                    ApiError::validation(format!(
                        "delivery_time_in_days field required to add a '{}' detail",
                        patch.offer_type
                    ))
                })?;

                sqlx::query(
                    r#"
                    INSERT INTO offer_details
                        (id, offer_id, title, offer_type, price, delivery_time_in_days, revisions, features)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                    "#,
                )
                .bind(OfferDetailId::new())
                .bind(id)
                .bind(patch.title.as_deref().unwrap_or(DEFAULT_DETAIL_TITLE))
                .bind(patch.offer_type.to_string())
                .bind(price)
                .bind(delivery_time_in_days)
                .bind(patch.revisions.unwrap_or(0))
                .bind(Json(patch.features.clone().unwrap_or_default()))
                .execute(&mut *tx)
                .await?;
            }
        }

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
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(OfferAggregate { offer, details })
    }

    /// Delete an offer; the FK cascade removes its details in the same
    /// transaction.
    pub async fn delete(id: OfferId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM offers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;

    fn detail(price: i64, days: i32) -> OfferDetail {
        OfferDetail {
            id: OfferDetailId::new(),
            offer_id: OfferId::new(),
            title: "Tier".to_string(),
            offer_type: "basic".to_string(),
            price: Decimal::new(price, 0),
            delivery_time_in_days: days,
            revisions: 0,
            features: Json(vec![]),
        }
    }

    fn aggregate(details: Vec<OfferDetail>) -> OfferAggregate {
        OfferAggregate {
            offer: Offer {
                id: OfferId::new(),
                owner_id: UserId::new(),
                title: "Offer".to_string(),
                description: "Description".to_string(),
                image: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            details,
        }
    }

    #[test]
    fn test_min_price_and_delivery_time() {
        let agg = aggregate(vec![detail(100, 5), detail(200, 7), detail(500, 10)]);
        assert_eq!(agg.min_price(), Decimal::new(100, 0));
        assert_eq!(agg.min_delivery_time(), 5);
    }

    #[test]
    fn test_min_values_default_to_zero_without_details() {
        let agg = aggregate(vec![]);
        assert_eq!(agg.min_price(), Decimal::ZERO);
        assert_eq!(agg.min_delivery_time(), 0);
    }
}
