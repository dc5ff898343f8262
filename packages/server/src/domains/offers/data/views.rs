//! Offer output shaping.
//!
//! The detail representation differs by access pattern: creation and
//! single-item retrieval carry full detail objects, collection responses
//! carry lightweight `{id, url}` references. The selection is a pure
//! function of the aggregate and the view kind - no request introspection.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::super::models::offer::OfferAggregate;
use super::super::models::offer_detail::OfferDetail;
use crate::common::types::serialize_decimal_trimmed;
use crate::common::{OfferDetailId, OfferId, UserId};

/// Which shape of detail representation a response carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferViewKind {
    /// Response to a successful creation: full detail objects.
    Create,
    /// Collection responses: `{id, url}` references only.
    List,
    /// Single-item retrieval (and patch results): full detail objects.
    Retrieve,
}

/// Full detail object, also served by the /offerdetails endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct OfferDetailView {
    pub id: OfferDetailId,
    pub offer_id: OfferId,
    pub title: String,
    pub offer_type: String,
    #[serde(serialize_with = "serialize_decimal_trimmed")]
    pub price: Decimal,
    pub delivery_time_in_days: i32,
    pub revisions: i32,
    pub features: Vec<String>,
}

impl From<&OfferDetail> for OfferDetailView {
    fn from(detail: &OfferDetail) -> Self {
        OfferDetailView {
            id: detail.id,
            offer_id: detail.offer_id,
            title: detail.title.clone(),
            offer_type: detail.offer_type.clone(),
            price: detail.price,
            delivery_time_in_days: detail.delivery_time_in_days,
            revisions: detail.revisions,
            features: detail.features.0.clone(),
        }
    }
}

/// Lightweight detail reference for collection responses.
#[derive(Debug, Clone, Serialize)]
pub struct OfferDetailRef {
    pub id: OfferDetailId,
    pub url: String,
}

impl From<&OfferDetail> for OfferDetailRef {
    fn from(detail: &OfferDetail) -> Self {
        OfferDetailRef {
            id: detail.id,
            url: format!("/offerdetails/{}", detail.id),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DetailRepresentation {
    Full(Vec<OfferDetailView>),
    Reference(Vec<OfferDetailRef>),
}

/// Offer response body with computed aggregates.
#[derive(Debug, Serialize)]
pub struct OfferView {
    pub id: OfferId,
    pub user: UserId,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    #[serde(serialize_with = "serialize_decimal_trimmed")]
    pub min_price: Decimal,
    pub min_delivery_time: i32,
    pub details: DetailRepresentation,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Shape an aggregate for the given view kind.
pub fn offer_view(aggregate: &OfferAggregate, kind: OfferViewKind) -> OfferView {
    let details = match kind {
        OfferViewKind::Create | OfferViewKind::Retrieve => DetailRepresentation::Full(
            aggregate.details.iter().map(OfferDetailView::from).collect(),
        ),
        OfferViewKind::List => DetailRepresentation::Reference(
            aggregate.details.iter().map(OfferDetailRef::from).collect(),
        ),
    };

    OfferView {
        id: aggregate.offer.id,
        user: aggregate.offer.owner_id,
        title: aggregate.offer.title.clone(),
        description: aggregate.offer.description.clone(),
        image: aggregate.offer.image.clone(),
        min_price: aggregate.min_price(),
        min_delivery_time: aggregate.min_delivery_time(),
        details,
        created_at: aggregate.offer.created_at,
        updated_at: aggregate.offer.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::offers::models::offer::Offer;
    use sqlx::types::Json;

    fn sample_aggregate() -> OfferAggregate {
        let offer_id = OfferId::new();
        let detail = OfferDetail {
            id: OfferDetailId::new(),
            offer_id,
            title: "Basic Design".to_string(),
            offer_type: "basic".to_string(),
            price: Decimal::new(10000, 2),
            delivery_time_in_days: 5,
            revisions: 2,
            features: Json(vec!["Logo Design".to_string()]),
        };
        OfferAggregate {
            offer: Offer {
                id: offer_id,
                owner_id: UserId::new(),
                title: "Design package".to_string(),
                description: "A package.".to_string(),
                image: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            details: vec![detail],
        }
    }

    #[test]
    fn test_list_view_renders_detail_references() {
        let aggregate = sample_aggregate();
        let view = offer_view(&aggregate, OfferViewKind::List);
        let json = serde_json::to_value(&view).unwrap();

        let details = json["details"].as_array().unwrap();
        assert_eq!(details.len(), 1);
        assert!(details[0]["url"]
            .as_str()
            .unwrap()
            .starts_with("/offerdetails/"));
        assert!(details[0].get("price").is_none());
    }

    #[test]
    fn test_retrieve_view_renders_full_details() {
        let aggregate = sample_aggregate();
        let view = offer_view(&aggregate, OfferViewKind::Retrieve);
        let json = serde_json::to_value(&view).unwrap();

        let details = json["details"].as_array().unwrap();
        assert_eq!(details[0]["offer_type"], "basic");
        assert_eq!(details[0]["price"], 100);
        assert_eq!(details[0]["features"][0], "Logo Design");
    }

    #[test]
    fn test_computed_fields_in_view() {
        let aggregate = sample_aggregate();
        let view = offer_view(&aggregate, OfferViewKind::Create);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["min_price"], 100);
        assert_eq!(json["min_delivery_time"], 5);
    }
}
