use axum::{
    extract::{Extension, Path},
    Json,
};
use uuid::Uuid;

use super::require_principal;
use crate::common::auth::AuthUser;
use crate::common::{ApiError, ApiResult, OfferDetailId};
use crate::domains::offers::data::views::OfferDetailView;
use crate::domains::offers::models::offer_detail::OfferDetail;
use crate::server::app::AppState;

/// List all offer details (read-only).
pub async fn list_offer_details(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> ApiResult<Json<Vec<OfferDetailView>>> {
    require_principal(auth.as_deref(), &state.db_pool).await?;
    let details = OfferDetail::list_all(&state.db_pool).await?;
    Ok(Json(details.iter().map(OfferDetailView::from).collect()))
}

/// Retrieve a single offer detail (read-only).
pub async fn retrieve_offer_detail(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<OfferDetailView>> {
    require_principal(auth.as_deref(), &state.db_pool).await?;

    let detail = OfferDetail::find_by_id(OfferDetailId::from_uuid(id), &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("OfferDetail {} not found.", id)))?;

    Ok(Json(OfferDetailView::from(&detail)))
}
