//! Order request/response types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::super::models::order::{Order, OrderStatus};
use crate::common::types::serialize_decimal_trimmed;
use crate::common::{ApiError, ApiResult, OfferDetailId, OrderId, UserId};

#[derive(Debug, Deserialize)]
pub struct CreateOrderInput {
    pub offer_detail_id: Option<OfferDetailId>,
}

impl CreateOrderInput {
    pub fn detail_id(self) -> ApiResult<OfferDetailId> {
        self.offer_detail_id
            .ok_or_else(|| ApiError::validation("offer_detail_id field required"))
    }
}

/// Status update body. The field is checked for presence before any
/// transition is attempted.
#[derive(Debug, Default, Deserialize)]
pub struct OrderStatusPatch {
    pub status: Option<String>,
}

impl OrderStatusPatch {
    pub fn into_status(self) -> ApiResult<OrderStatus> {
        let raw = self
            .status
            .ok_or_else(|| ApiError::validation("status field required"))?;
        OrderStatus::from_str(&raw)
            .map_err(|_| ApiError::validation(format!("Invalid status '{}'.", raw)))
    }
}

/// Full order representation. Price renders as an integer when it has no
/// fractional part.
#[derive(Debug, Serialize)]
pub struct OrderData {
    pub id: OrderId,
    pub customer_id: UserId,
    pub business_id: UserId,
    pub offer_detail_id: OfferDetailId,
    pub title: String,
    pub revisions: i32,
    pub delivery_time_in_days: i32,
    #[serde(serialize_with = "serialize_decimal_trimmed")]
    pub price: Decimal,
    pub features: Vec<String>,
    pub offer_type: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderData {
    fn from(order: Order) -> Self {
        OrderData {
            id: order.id,
            customer_id: order.customer_id,
            business_id: order.business_id,
            offer_detail_id: order.offer_detail_id,
            title: order.title,
            revisions: order.revisions,
            delivery_time_in_days: order.delivery_time_in_days,
            price: order.price,
            features: order.features.0,
            offer_type: order.offer_type,
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_status_is_rejected() {
        let err = OrderStatusPatch::default().into_status().unwrap_err();
        assert!(err.to_string().contains("status field required"));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let patch = OrderStatusPatch {
            status: Some("bogus".to_string()),
        };
        let err = patch.into_status().unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_valid_status_parses() {
        let patch = OrderStatusPatch {
            status: Some("completed".to_string()),
        };
        assert_eq!(patch.into_status().unwrap(), OrderStatus::Completed);
    }

    #[test]
    fn test_missing_offer_detail_id_is_rejected() {
        let input = CreateOrderInput {
            offer_detail_id: None,
        };
        assert!(input.detail_id().is_err());
    }
}
