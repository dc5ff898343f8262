use std::collections::HashMap;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::require_principal;
use crate::common::auth::{predicates, AuthUser};
use crate::common::pagination::{paginate, Page, PageParams};
use crate::common::{ApiError, ApiResult, OfferId};
use crate::domains::offers::data::types::{CreateOfferInput, OfferPatch};
use crate::domains::offers::data::views::{offer_view, OfferView, OfferViewKind};
use crate::domains::offers::models::offer::{Offer, OfferAggregate};
use crate::domains::offers::models::offer_detail::OfferDetail;
use crate::server::app::AppState;

/// List offers visible to the caller, six per page by default.
/// Collection responses carry lightweight detail references.
pub async fn list_offers(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Page<OfferView>>> {
    let principal = require_principal(auth.as_deref(), &state.db_pool).await?;

    let (count, offers) = Offer::list_visible(&principal, &params, &state.db_pool).await?;

    let offer_ids: Vec<OfferId> = offers.iter().map(|o| o.id).collect();
    let details = OfferDetail::find_by_offer_ids(&offer_ids, &state.db_pool).await?;
    let mut by_offer: HashMap<OfferId, Vec<OfferDetail>> = HashMap::new();
    for detail in details {
        by_offer.entry(detail.offer_id).or_default().push(detail);
    }

    let views: Vec<OfferView> = offers
        .into_iter()
        .map(|offer| {
            let details = by_offer.remove(&offer.id).unwrap_or_default();
            offer_view(&OfferAggregate { offer, details }, OfferViewKind::List)
        })
        .collect();

    Ok(Json(paginate("/offers", &params, count, views)))
}

/// Create an offer with exactly three pricing tiers.
pub async fn create_offer(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(input): Json<CreateOfferInput>,
) -> ApiResult<(StatusCode, Json<OfferView>)> {
    let principal = require_principal(auth.as_deref(), &state.db_pool).await?;

    if !predicates::can_create_offer(&principal) {
        return Err(ApiError::permission("Only business users can create offers."));
    }

    let command = input.into_command()?;
    let aggregate = Offer::create_aggregate(principal.user_id, command, &state.db_pool).await?;

    Ok((
        StatusCode::CREATED,
        Json(offer_view(&aggregate, OfferViewKind::Create)),
    ))
}

/// Retrieve a single offer with full detail objects.
pub async fn retrieve_offer(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<OfferView>> {
    require_principal(auth.as_deref(), &state.db_pool).await?;

    let aggregate = Offer::load_aggregate(OfferId::from_uuid(id), &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Offer {} not found.", id)))?;

    Ok(Json(offer_view(&aggregate, OfferViewKind::Retrieve)))
}

/// Patch an offer. Detail entries are matched on offer_type; a matched
/// detail is partially overwritten, an unmatched one is created.
pub async fn patch_offer(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<OfferPatch>,
) -> ApiResult<Json<OfferView>> {
    let principal = require_principal(auth.as_deref(), &state.db_pool).await?;
    let offer_id = OfferId::from_uuid(id);

    let offer = Offer::find_by_id(offer_id, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Offer {} not found.", id)))?;

    if !predicates::can_mutate_offer(&principal, offer.owner_id) {
        return Err(ApiError::permission(
            "Only the offer's owner or an admin can edit it.",
        ));
    }

    let command = patch.into_command()?;
    let aggregate = Offer::apply_patch(offer_id, command, &state.db_pool).await?;

    Ok(Json(offer_view(&aggregate, OfferViewKind::Retrieve)))
}

/// Delete an offer and, through the cascade, its details.
pub async fn delete_offer(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let principal = require_principal(auth.as_deref(), &state.db_pool).await?;
    let offer_id = OfferId::from_uuid(id);

    let offer = Offer::find_by_id(offer_id, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Offer {} not found.", id)))?;

    if !predicates::can_mutate_offer(&principal, offer.owner_id) {
        return Err(ApiError::permission(
            "Only the offer's owner or an admin can delete it.",
        ));
    }

    Offer::delete(offer_id, &state.db_pool).await?;
    Ok(StatusCode::NO_CONTENT)
}
