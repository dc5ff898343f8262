//! Offer request bodies and their validated command forms.
//!
//! Inbound payloads deserialize into permissive option-typed inputs;
//! validation copies them into immutable commands. A command either
//! passes every check or the whole aggregate write is rejected - there
//! is no partial persistence of a half-valid detail list.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;
use std::str::FromStr;

use super::super::models::offer_detail::OfferType;
use crate::common::{ApiError, ApiResult};

pub const DEFAULT_DETAIL_TITLE: &str = "Untitled Detail";

// ============================================================================
// Create
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateOfferInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub details: Option<Vec<OfferDetailInput>>,
}

#[derive(Debug, Deserialize)]
pub struct OfferDetailInput {
    pub title: Option<String>,
    pub offer_type: Option<String>,
    pub price: Option<Decimal>,
    pub delivery_time_in_days: Option<i32>,
    pub revisions: Option<i32>,
    pub features: Option<Vec<String>>,
}

/// Validated offer creation command: exactly three details, one per tier.
#[derive(Debug)]
pub struct CreateOfferCommand {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub details: Vec<DetailSpec>,
}

/// A fully specified pricing tier.
#[derive(Debug)]
pub struct DetailSpec {
    pub title: String,
    pub offer_type: OfferType,
    pub price: Decimal,
    pub delivery_time_in_days: i32,
    pub revisions: i32,
    pub features: Vec<String>,
}

impl CreateOfferInput {
    pub fn into_command(self) -> ApiResult<CreateOfferCommand> {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ApiError::validation("title field required"))?;
        let description = self
            .description
            .ok_or_else(|| ApiError::validation("description field required"))?;

        let details = self
            .details
            .ok_or_else(|| ApiError::validation("details field required"))?;
        if details.len() != 3 {
            return Err(ApiError::validation("Exactly three details are required."));
        }

        let details = details
            .into_iter()
            .map(OfferDetailInput::into_spec)
            .collect::<ApiResult<Vec<_>>>()?;

        let mut seen = HashSet::new();
        for spec in &details {
            if !seen.insert(spec.offer_type) {
                return Err(ApiError::validation(format!(
                    "Duplicate offer_type '{}' in details.",
                    spec.offer_type
                )));
            }
        }

        Ok(CreateOfferCommand {
            title,
            description,
            image: self.image,
            details,
        })
    }
}

impl OfferDetailInput {
    fn into_spec(self) -> ApiResult<DetailSpec> {
        let offer_type = parse_offer_type(self.offer_type)?;
        let price = self
            .price
            .ok_or_else(|| ApiError::validation("price field required for each detail"))?;
        let delivery_time_in_days = self.delivery_time_in_days.ok_or_else(|| {
            ApiError::validation("delivery_time_in_days field required for each detail")
        })?;

        validate_price(price)?;
        validate_delivery_time(delivery_time_in_days)?;

        let revisions = self.revisions.unwrap_or(0);
        validate_revisions(revisions)?;

        Ok(DetailSpec {
            title: self
                .title
                .unwrap_or_else(|| DEFAULT_DETAIL_TITLE.to_string()),
            offer_type,
            price,
            delivery_time_in_days,
            revisions,
            features: self.features.unwrap_or_default(),
        })
    }
}

// ============================================================================
// Patch
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct OfferPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub details: Option<Vec<OfferDetailPatch>>,
}

#[derive(Debug, Deserialize)]
pub struct OfferDetailPatch {
    pub offer_type: Option<String>,
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub delivery_time_in_days: Option<i32>,
    pub revisions: Option<i32>,
    pub features: Option<Vec<String>>,
}

/// Validated offer patch. Detail entries are keyed by tier; fields left
/// `None` keep their current value on a matched detail.
#[derive(Debug)]
pub struct OfferPatchCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub details: Vec<DetailPatchSpec>,
}

#[derive(Debug)]
pub struct DetailPatchSpec {
    pub offer_type: OfferType,
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub delivery_time_in_days: Option<i32>,
    pub revisions: Option<i32>,
    pub features: Option<Vec<String>>,
}

impl OfferPatch {
    pub fn into_command(self) -> ApiResult<OfferPatchCommand> {
        let details = self
            .details
            .unwrap_or_default()
            .into_iter()
            .map(OfferDetailPatch::into_spec)
            .collect::<ApiResult<Vec<_>>>()?;

        Ok(OfferPatchCommand {
            title: self.title,
            description: self.description,
            image: self.image,
            details,
        })
    }
}

impl OfferDetailPatch {
    fn into_spec(self) -> ApiResult<DetailPatchSpec> {
        // offer_type is the matching key and is required on every entry
        let offer_type = parse_offer_type(self.offer_type)?;

        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(days) = self.delivery_time_in_days {
            validate_delivery_time(days)?;
        }
        if let Some(revisions) = self.revisions {
            validate_revisions(revisions)?;
        }

        Ok(DetailPatchSpec {
            offer_type,
            title: self.title,
            price: self.price,
            delivery_time_in_days: self.delivery_time_in_days,
            revisions: self.revisions,
            features: self.features,
        })
    }
}

// ============================================================================
// Field checks
// ============================================================================

fn parse_offer_type(value: Option<String>) -> ApiResult<OfferType> {
    let raw = value.ok_or_else(|| ApiError::validation("offer_type field required for each detail"))?;
    OfferType::from_str(&raw)
        .map_err(|_| ApiError::validation(format!("Invalid offer_type '{}'.", raw)))
}

fn validate_price(price: Decimal) -> ApiResult<()> {
    if price.is_sign_negative() {
        return Err(ApiError::validation("price must not be negative"));
    }
    Ok(())
}

fn validate_delivery_time(days: i32) -> ApiResult<()> {
    if days <= 0 {
        return Err(ApiError::validation(
            "delivery_time_in_days must be a positive integer",
        ));
    }
    Ok(())
}

fn validate_revisions(revisions: i32) -> ApiResult<()> {
    if revisions < -1 {
        return Err(ApiError::validation(
            "revisions must be -1 (unlimited) or non-negative",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(offer_type: &str, price: i64) -> OfferDetailInput {
        OfferDetailInput {
            title: Some(format!("{} tier", offer_type)),
            offer_type: Some(offer_type.to_string()),
            price: Some(Decimal::new(price, 0)),
            delivery_time_in_days: Some(5),
            revisions: Some(2),
            features: Some(vec!["Logo Design".to_string()]),
        }
    }

    fn valid_input() -> CreateOfferInput {
        CreateOfferInput {
            title: Some("Graphic design package".to_string()),
            description: Some("A complete package.".to_string()),
            image: None,
            details: Some(vec![
                detail("basic", 100),
                detail("standard", 200),
                detail("premium", 500),
            ]),
        }
    }

    #[test]
    fn test_valid_create_command() {
        let command = valid_input().into_command().unwrap();
        assert_eq!(command.details.len(), 3);
        let types: Vec<_> = command.details.iter().map(|d| d.offer_type).collect();
        assert!(types.contains(&OfferType::Basic));
        assert!(types.contains(&OfferType::Standard));
        assert!(types.contains(&OfferType::Premium));
    }

    #[test]
    fn test_two_details_rejected() {
        let mut input = valid_input();
        input.details = Some(vec![detail("basic", 100), detail("standard", 200)]);
        let err = input.into_command().unwrap_err();
        assert!(err.to_string().contains("Exactly three"));
    }

    #[test]
    fn test_four_details_rejected() {
        let mut input = valid_input();
        input.details = Some(vec![
            detail("basic", 100),
            detail("standard", 200),
            detail("premium", 500),
            detail("premium", 800),
        ]);
        assert!(input.into_command().is_err());
    }

    #[test]
    fn test_duplicate_offer_type_rejected() {
        let mut input = valid_input();
        input.details = Some(vec![
            detail("basic", 100),
            detail("basic", 200),
            detail("premium", 500),
        ]);
        let err = input.into_command().unwrap_err();
        assert!(err.to_string().contains("Duplicate offer_type"));
    }

    #[test]
    fn test_missing_price_rejected() {
        let mut input = valid_input();
        let mut bad = detail("basic", 100);
        bad.price = None;
        input.details = Some(vec![bad, detail("standard", 200), detail("premium", 500)]);
        let err = input.into_command().unwrap_err();
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut input = valid_input();
        let mut bad = detail("basic", 100);
        bad.price = Some(Decimal::new(-100, 0));
        input.details = Some(vec![bad, detail("standard", 200), detail("premium", 500)]);
        assert!(input.into_command().is_err());
    }

    #[test]
    fn test_zero_delivery_time_rejected() {
        let mut input = valid_input();
        let mut bad = detail("basic", 100);
        bad.delivery_time_in_days = Some(0);
        input.details = Some(vec![bad, detail("standard", 200), detail("premium", 500)]);
        assert!(input.into_command().is_err());
    }

    #[test]
    fn test_detail_defaults_applied() {
        let spec = OfferDetailInput {
            title: None,
            offer_type: Some("basic".to_string()),
            price: Some(Decimal::new(100, 0)),
            delivery_time_in_days: Some(5),
            revisions: None,
            features: None,
        }
        .into_spec()
        .unwrap();
        assert_eq!(spec.title, DEFAULT_DETAIL_TITLE);
        assert_eq!(spec.revisions, 0);
        assert!(spec.features.is_empty());
    }

    #[test]
    fn test_patch_detail_requires_offer_type() {
        let patch = OfferPatch {
            title: None,
            description: None,
            image: None,
            details: Some(vec![OfferDetailPatch {
                offer_type: None,
                title: None,
                price: Some(Decimal::new(120, 0)),
                delivery_time_in_days: None,
                revisions: None,
                features: None,
            }]),
        };
        let err = patch.into_command().unwrap_err();
        assert!(err.to_string().contains("offer_type"));
    }

    #[test]
    fn test_patch_without_details_is_valid() {
        let patch = OfferPatch {
            title: Some("New title".to_string()),
            ..Default::default()
        };
        let command = patch.into_command().unwrap();
        assert!(command.details.is_empty());
        assert_eq!(command.title.as_deref(), Some("New title"));
    }
}
