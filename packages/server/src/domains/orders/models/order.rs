use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::common::auth::Principal;
use crate::common::{OfferDetailId, OrderId, UserId};
use crate::domains::offers::models::offer_detail::OfferDetail;

/// Order - an immutable snapshot of an offer detail at order time,
/// tracked through a status lifecycle.
///
/// Later edits or deletion of the referenced detail never change an
/// existing order; only the status may move after creation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: UserId,
    pub business_id: UserId,
    pub offer_detail_id: OfferDetailId,
    pub title: String,
    pub revisions: i32,
    pub delivery_time_in_days: i32,
    pub price: Decimal,
    pub features: Json<Vec<String>>,
    pub offer_type: String,
    pub status: String, // 'in_progress', 'completed', 'cancelled'
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order lifecycle states.
///
/// `in_progress` is the only non-terminal state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, OrderStatus::InProgress)
    }

    /// Whether moving to `next` is allowed.
    ///
    /// Re-setting the current status is accepted as a no-op update;
    /// a terminal state accepts no other transition.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        self == next || !self.is_terminal()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::InProgress => write!(f, "in_progress"),
            OrderStatus::Completed => write!(f, "completed"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "in_progress" => Ok(OrderStatus::InProgress),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(anyhow::anyhow!("Invalid order status: {}", s)),
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Order {
    /// Find order by ID
    pub async fn find_by_id(id: OrderId, pool: &PgPool) -> Result<Option<Self>> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(order)
    }

    /// List orders visible to the viewer, newest first.
    ///
    /// Non-staff principals see orders where they are either party;
    /// staff sees all.
    pub async fn list_visible(viewer: &Principal, pool: &PgPool) -> Result<Vec<Self>> {
        let orders = if viewer.is_staff {
            sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
                .fetch_all(pool)
                .await?
        } else {
            sqlx::query_as::<_, Order>(
                r#"
                SELECT * FROM orders
                WHERE customer_id = $1 OR business_id = $1
                ORDER BY created_at DESC
                "#,
            )
            .bind(viewer.user_id)
            .fetch_all(pool)
            .await?
        };
        Ok(orders)
    }

    /// Create an order by snapshotting an offer detail.
    ///
    /// All priced fields are copied at creation time; the order keeps a
    /// plain reference to the detail, not a live join.
    pub async fn create_snapshot(
        customer_id: UserId,
        business_id: UserId,
        detail: &OfferDetail,
        pool: &PgPool,
    ) -> Result<Self> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders
                (id, customer_id, business_id, offer_detail_id, title, revisions,
                 delivery_time_in_days, price, features, offer_type, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(OrderId::new())
        .bind(customer_id)
        .bind(business_id)
        .bind(detail.id)
        .bind(&detail.title)
        .bind(detail.revisions)
        .bind(detail.delivery_time_in_days)
        .bind(detail.price)
        .bind(&detail.features)
        .bind(&detail.offer_type)
        .bind(OrderStatus::InProgress.to_string())
        .fetch_one(pool)
        .await?;
        Ok(order)
    }

    /// Update order status
    pub async fn update_status(id: OrderId, status: OrderStatus, pool: &PgPool) -> Result<Self> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(status.to_string())
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(order)
    }

    /// Delete an order (staff-only operation at the API layer)
    pub async fn delete(id: OrderId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Count a business user's orders in the given status
    pub async fn count_by_status(
        business_id: UserId,
        status: OrderStatus,
        pool: &PgPool,
    ) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM orders WHERE business_id = $1 AND status = $2",
        )
        .bind(business_id)
        .bind(status.to_string())
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
