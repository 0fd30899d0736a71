//! Realtime stats handler

use axum::{extract::State, Json};

use crate::application::admin::RealtimeStats;
use crate::application::AdminService;
use crate::interfaces::http::common::{domain_error, ApiResult};

#[derive(Clone)]
pub struct RealtimeState {
    pub admin: AdminService,
}

#[utoipa::path(
    get,
    path = "/api/realtimeStats",
    tag = "Realtime",
    responses((status = 200, description = "Order counts by stage and drones in flight", body = RealtimeStats))
)]
pub async fn get_realtime_stats(State(state): State<RealtimeState>) -> ApiResult<Json<RealtimeStats>> {
    let stats = state.admin.realtime_stats().await.map_err(domain_error)?;
    Ok(Json(stats))
}
