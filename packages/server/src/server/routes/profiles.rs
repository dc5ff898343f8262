use axum::{
    extract::{Extension, Path},
    Json,
};
use uuid::Uuid;

use super::require_principal;
use crate::common::auth::{predicates, AuthUser};
use crate::common::{ApiError, ApiResult, UserId};
use crate::domains::profiles::data::types::{ProfileData, ProfilePatch};
use crate::domains::profiles::models::profile::{Profile, ProfileRecord};
use crate::domains::profiles::models::User;
use crate::server::app::AppState;

/// Retrieve a user's profile. Any authenticated principal may look up
/// any profile.
pub async fn get_profile(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<ProfileData>> {
    require_principal(auth.as_deref(), &state.db_pool).await?;

    let target = UserId::from_uuid(user_id);
    let record = ProfileRecord::find_by_user_id(target, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Profile for user {} not found.", user_id)))?;

    Ok(Json(record.into()))
}

/// Update a profile. Only the profile's user or staff may edit it; the
/// patch is limited to the allow-listed fields.
pub async fn patch_profile(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(user_id): Path<Uuid>,
    Json(patch): Json<ProfilePatch>,
) -> ApiResult<Json<ProfileData>> {
    let principal = require_principal(auth.as_deref(), &state.db_pool).await?;
    let target = UserId::from_uuid(user_id);

    Profile::find_by_user_id(target, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Profile for user {} not found.", user_id)))?;

    if !predicates::can_mutate_profile(&principal, target) {
        return Err(ApiError::permission("You can only edit your own profile."));
    }

    if let Some(email) = &patch.email {
        User::update_email(target, email, &state.db_pool).await?;
    }
    Profile::update(target, &patch, &state.db_pool).await?;

    let record = ProfileRecord::find_by_user_id(target, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Profile for user {} not found.", user_id)))?;

    Ok(Json(record.into()))
}

/// List all business profiles.
pub async fn list_business_profiles(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> ApiResult<Json<Vec<ProfileData>>> {
    require_principal(auth.as_deref(), &state.db_pool).await?;
    let records = ProfileRecord::list_by_type("business", &state.db_pool).await?;
    Ok(Json(records.into_iter().map(ProfileData::from).collect()))
}

/// List all customer profiles.
pub async fn list_customer_profiles(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> ApiResult<Json<Vec<ProfileData>>> {
    require_principal(auth.as_deref(), &state.db_pool).await?;
    let records = ProfileRecord::list_by_type("customer", &state.db_pool).await?;
    Ok(Json(records.into_iter().map(ProfileData::from).collect()))
}
