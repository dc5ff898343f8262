use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::str::FromStr;
use uuid::Uuid;

use super::require_principal;
use crate::common::auth::{predicates, AuthUser};
use crate::common::{ApiError, ApiResult, OrderId, UserId};
use crate::domains::offers::models::offer::Offer;
use crate::domains::offers::models::offer_detail::OfferDetail;
use crate::domains::orders::data::types::{CreateOrderInput, OrderData, OrderStatusPatch};
use crate::domains::orders::models::order::{Order, OrderStatus};
use crate::domains::profiles::models::User;
use crate::server::app::AppState;

/// List orders where the caller is a party (staff sees all).
pub async fn list_orders(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> ApiResult<Json<Vec<OrderData>>> {
    let principal = require_principal(auth.as_deref(), &state.db_pool).await?;
    let orders = Order::list_visible(&principal, &state.db_pool).await?;
    Ok(Json(orders.into_iter().map(OrderData::from).collect()))
}

/// Create an order by snapshotting an offer detail.
pub async fn create_order(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(input): Json<CreateOrderInput>,
) -> ApiResult<(StatusCode, Json<OrderData>)> {
    let principal = require_principal(auth.as_deref(), &state.db_pool).await?;

    if !predicates::can_create_order(&principal) {
        return Err(ApiError::permission("Only customers can create orders."));
    }

    let detail_id = input.detail_id()?;
    let detail = OfferDetail::find_by_id(detail_id, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("OfferDetail {} not found.", detail_id)))?;

    // The business side is the owner of the detail's parent offer
    let offer = Offer::find_by_id(detail.offer_id, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Offer {} not found.", detail.offer_id)))?;

    let order =
        Order::create_snapshot(principal.user_id, offer.owner_id, &detail, &state.db_pool).await?;

    Ok((StatusCode::CREATED, Json(OrderData::from(order))))
}

/// Retrieve a single order. Visibility is scoped: principals that are
/// not a party see a 404, not a 403.
pub async fn retrieve_order(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<OrderData>> {
    let principal = require_principal(auth.as_deref(), &state.db_pool).await?;

    let order = Order::find_by_id(OrderId::from_uuid(id), &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order {} not found.", id)))?;

    if !predicates::can_view_order(&principal, order.customer_id, order.business_id) {
        return Err(ApiError::not_found(format!("Order {} not found.", id)));
    }

    Ok(Json(OrderData::from(order)))
}

/// Transition an order's status. Only the order's business side or staff
/// may do this; terminal states accept no further transition.
pub async fn patch_order(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<OrderStatusPatch>,
) -> ApiResult<Json<OrderData>> {
    let principal = require_principal(auth.as_deref(), &state.db_pool).await?;

    let order = Order::find_by_id(OrderId::from_uuid(id), &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order {} not found.", id)))?;

    if !predicates::can_transition_order(&principal, order.business_id) {
        return Err(ApiError::permission(
            "Only the order's business user or an admin can update its status.",
        ));
    }

    let new_status = patch.into_status()?;
    let current = OrderStatus::from_str(&order.status)?;

    if !current.can_transition_to(new_status) {
        return Err(ApiError::validation(format!(
            "Cannot transition a {} order to '{}'.",
            current, new_status
        )));
    }

    let updated = Order::update_status(order.id, new_status, &state.db_pool).await?;
    Ok(Json(OrderData::from(updated)))
}

/// Delete an order (admin only).
pub async fn delete_order(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let principal = require_principal(auth.as_deref(), &state.db_pool).await?;

    let order = Order::find_by_id(OrderId::from_uuid(id), &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order {} not found.", id)))?;

    if !predicates::can_delete_order(&principal) {
        return Err(ApiError::permission("Only admins can delete orders."));
    }

    Order::delete(order.id, &state.db_pool).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Default, Deserialize)]
pub struct OrderCountQuery {
    pub status: Option<String>,
}

/// Count a business user's orders by status.
///
/// `?status=in_progress` (the default) answers `{"order_count": n}`;
/// `?status=completed` answers `{"completed_order_count": n}`.
pub async fn order_count(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(business_id): Path<Uuid>,
    Query(query): Query<OrderCountQuery>,
) -> ApiResult<Json<Value>> {
    require_principal(auth.as_deref(), &state.db_pool).await?;

    let business_id = UserId::from_uuid(business_id);
    if !User::exists(business_id, &state.db_pool).await? {
        return Err(ApiError::not_found(format!(
            "Business user {} not found.",
            business_id
        )));
    }

    match query.status.as_deref() {
        None | Some("in_progress") => {
            let count =
                Order::count_by_status(business_id, OrderStatus::InProgress, &state.db_pool)
                    .await?;
            Ok(Json(json!({ "order_count": count })))
        }
        Some("completed") => {
            let count =
                Order::count_by_status(business_id, OrderStatus::Completed, &state.db_pool).await?;
            Ok(Json(json!({ "completed_order_count": count })))
        }
        Some(other) => Err(ApiError::validation(format!(
            "Invalid status '{}': expected 'in_progress' or 'completed'.",
            other
        ))),
    }
}
