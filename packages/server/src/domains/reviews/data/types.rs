//! Review request/response types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::super::models::review::Review;
use crate::common::types::serialize_decimal_trimmed;
use crate::common::{ApiError, ApiResult, ReviewId, UserId};

#[derive(Debug, Deserialize)]
pub struct CreateReviewInput {
    pub business_user: Option<UserId>,
    pub rating: Option<Decimal>,
    pub description: Option<String>,
}

/// Validated review creation command.
#[derive(Debug)]
pub struct CreateReviewCommand {
    pub business_user_id: UserId,
    pub rating: Decimal,
    pub description: String,
}

impl CreateReviewInput {
    pub fn into_command(self) -> ApiResult<CreateReviewCommand> {
        let business_user_id = self
            .business_user
            .ok_or_else(|| ApiError::validation("business_user field required"))?;
        let rating = self
            .rating
            .ok_or_else(|| ApiError::validation("rating field required"))?;
        validate_rating(rating)?;

        Ok(CreateReviewCommand {
            business_user_id,
            // Ratings are stored at one decimal place
            rating: rating.round_dp(1),
            description: self.description.unwrap_or_default(),
        })
    }
}

/// Allow-listed review patch: only rating and description are editable.
/// Any other key in the request body is dropped during deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewPatch {
    pub rating: Option<Decimal>,
    pub description: Option<String>,
}

impl ReviewPatch {
    pub fn validated(mut self) -> ApiResult<Self> {
        if let Some(rating) = self.rating {
            validate_rating(rating)?;
            self.rating = Some(rating.round_dp(1));
        }
        Ok(self)
    }
}

/// Query-string filters for the review list.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewFilter {
    pub business_user_id: Option<UserId>,
    pub reviewer_id: Option<UserId>,
    pub ordering: Option<String>,
}

/// Review representation. The rating renders as an integer when it has
/// no fractional part.
#[derive(Debug, Serialize)]
pub struct ReviewData {
    pub id: ReviewId,
    pub business_user: UserId,
    pub reviewer: UserId,
    #[serde(serialize_with = "serialize_decimal_trimmed")]
    pub rating: Decimal,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewData {
    fn from(review: Review) -> Self {
        ReviewData {
            id: review.id,
            business_user: review.business_user_id,
            reviewer: review.reviewer_id,
            rating: review.rating,
            description: review.description,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

fn validate_rating(rating: Decimal) -> ApiResult<()> {
    if rating < Decimal::ZERO || rating > Decimal::new(5, 0) {
        return Err(ApiError::validation("rating must be between 0 and 5"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(rating: Decimal) -> CreateReviewInput {
        CreateReviewInput {
            business_user: Some(UserId::new()),
            rating: Some(rating),
            description: Some("Great work".to_string()),
        }
    }

    #[test]
    fn test_valid_review_command() {
        let command = input(Decimal::new(45, 1)).into_command().unwrap();
        assert_eq!(command.rating, Decimal::new(45, 1));
    }

    #[test]
    fn test_rating_is_rounded_to_one_decimal() {
        let command = input(Decimal::new(433, 2)).into_command().unwrap();
        assert_eq!(command.rating, Decimal::new(43, 1));
    }

    #[test]
    fn test_out_of_range_rating_rejected() {
        assert!(input(Decimal::new(51, 1)).into_command().is_err());
        assert!(input(Decimal::new(-1, 0)).into_command().is_err());
    }

    #[test]
    fn test_missing_business_user_rejected() {
        let bad = CreateReviewInput {
            business_user: None,
            rating: Some(Decimal::new(4, 0)),
            description: None,
        };
        assert!(bad.into_command().is_err());
    }

    #[test]
    fn test_patch_drops_disallowed_fields() {
        let patch: ReviewPatch = serde_json::from_value(serde_json::json!({
            "rating": 3.5,
            "business_user": "not-allowed",
            "reviewer": "not-allowed"
        }))
        .unwrap();
        let patch = patch.validated().unwrap();
        assert_eq!(patch.rating, Some(Decimal::new(35, 1)));
        assert!(patch.description.is_none());
    }
}
