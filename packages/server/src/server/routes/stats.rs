use axum::{extract::Extension, Json};

use crate::common::ApiResult;
use crate::domains::stats::DashboardStats;
use crate::server::app::AppState;

/// Public landing-page statistics.
pub async fn stats_handler(Extension(state): Extension<AppState>) -> ApiResult<Json<DashboardStats>> {
    let stats = DashboardStats::load(&state.db_pool).await?;
    Ok(Json(stats))
}
