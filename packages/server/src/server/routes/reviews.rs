use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::require_principal;
use crate::common::auth::{predicates, AuthUser};
use crate::common::{ApiError, ApiResult, ReviewId};
use crate::domains::profiles::models::User;
use crate::domains::reviews::data::types::{
    CreateReviewInput, ReviewData, ReviewFilter, ReviewPatch,
};
use crate::domains::reviews::models::Review;
use crate::server::app::AppState;

/// List reviews with optional party filters and ordering.
pub async fn list_reviews(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Query(filter): Query<ReviewFilter>,
) -> ApiResult<Json<Vec<ReviewData>>> {
    require_principal(auth.as_deref(), &state.db_pool).await?;
    let reviews = Review::list(&filter, &state.db_pool).await?;
    Ok(Json(reviews.into_iter().map(ReviewData::from).collect()))
}

/// Create a review. A reviewer may review a given business user once.
pub async fn create_review(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(input): Json<CreateReviewInput>,
) -> ApiResult<(StatusCode, Json<ReviewData>)> {
    let principal = require_principal(auth.as_deref(), &state.db_pool).await?;

    if !predicates::can_create_review(&principal) {
        return Err(ApiError::permission("Only customers can create reviews."));
    }

    let command = input.into_command()?;

    if !User::exists(command.business_user_id, &state.db_pool).await? {
        return Err(ApiError::validation(
            "business_user must reference an existing user",
        ));
    }

    if Review::exists_for_pair(principal.user_id, command.business_user_id, &state.db_pool).await? {
        return Err(ApiError::validation(
            "You have already reviewed this business user.",
        ));
    }

    let review = Review::create(
        command.business_user_id,
        principal.user_id,
        command.rating,
        command.description,
        &state.db_pool,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(ReviewData::from(review))))
}

/// Retrieve a single review.
pub async fn retrieve_review(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ReviewData>> {
    require_principal(auth.as_deref(), &state.db_pool).await?;

    let review = Review::find_by_id(ReviewId::from_uuid(id), &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Review {} not found.", id)))?;

    Ok(Json(ReviewData::from(review)))
}

/// Patch a review. Only rating and description are editable, and only
/// by the reviewer or staff.
pub async fn patch_review(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ReviewPatch>,
) -> ApiResult<Json<ReviewData>> {
    let principal = require_principal(auth.as_deref(), &state.db_pool).await?;

    let review = Review::find_by_id(ReviewId::from_uuid(id), &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Review {} not found.", id)))?;

    if !predicates::can_mutate_review(&principal, review.reviewer_id) {
        return Err(ApiError::permission(
            "Only the reviewer or an admin can edit this review.",
        ));
    }

    let patch = patch.validated()?;
    let updated = Review::update(review.id, &patch, &state.db_pool).await?;
    Ok(Json(ReviewData::from(updated)))
}

/// Delete a review (reviewer or staff).
pub async fn delete_review(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let principal = require_principal(auth.as_deref(), &state.db_pool).await?;

    let review = Review::find_by_id(ReviewId::from_uuid(id), &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Review {} not found.", id)))?;

    if !predicates::can_mutate_review(&principal, review.reviewer_id) {
        return Err(ApiError::permission(
            "Only the reviewer or an admin can delete this review.",
        ));
    }

    Review::delete(review.id, &state.db_pool).await?;
    Ok(StatusCode::NO_CONTENT)
}
