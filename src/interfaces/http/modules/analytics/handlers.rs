//! Analytics API handlers
//!
//! Figures are recomputed from order history on every request.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{AnalyticsDto, OverviewDto, PeriodParams};
use crate::application::AnalyticsService;
use crate::domain::AnalyticsPeriod;
use crate::interfaces::http::common::{domain_error, ApiResult};

#[derive(Clone)]
pub struct AnalyticsState {
    pub analytics: AnalyticsService,
}

#[utoipa::path(
    get,
    path = "/api/analytics/restaurant/{restaurant_id}",
    tag = "Analytics",
    params(("restaurant_id" = String, Path, description = "Restaurant ID"), PeriodParams),
    responses((status = 200, description = "Figures for the period's sliding window", body = AnalyticsDto))
)]
pub async fn get_restaurant_analytics(
    State(state): State<AnalyticsState>,
    Path(restaurant_id): Path<String>,
    Query(params): Query<PeriodParams>,
) -> ApiResult<Json<AnalyticsDto>> {
    let period = AnalyticsPeriod::parse(params.period.as_deref());
    let snapshot = state
        .analytics
        .calculate(&restaurant_id, period)
        .await
        .map_err(domain_error)?;
    Ok(Json(snapshot.into()))
}

#[utoipa::path(
    get,
    path = "/api/analytics/restaurant/{restaurant_id}/overview",
    tag = "Analytics",
    params(("restaurant_id" = String, Path, description = "Restaurant ID")),
    responses((status = 200, description = "Today's KPIs; an empty object for an unknown restaurant", body = OverviewDto))
)]
pub async fn get_restaurant_overview(
    State(state): State<AnalyticsState>,
    Path(restaurant_id): Path<String>,
) -> ApiResult<Response> {
    let overview = state
        .analytics
        .overview(&restaurant_id)
        .await
        .map_err(domain_error)?;

    Ok(match overview {
        Some(o) => Json(OverviewDto::from(o)).into_response(),
        None => Json(serde_json::json!({})).into_response(),
    })
}
