//! Drone API handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{ClaimDroneRequest, DroneDto, DroneListParams};
use crate::application::DroneService;
use crate::domain::DronePatch;
use crate::interfaces::http::common::{domain_error, ApiResponse, ApiResult, JsonBody, ValidatedJson};

#[derive(Clone)]
pub struct DroneHandlerState {
    pub drones: DroneService,
}

#[utoipa::path(
    get,
    path = "/api/drones",
    tag = "Drones",
    params(DroneListParams),
    responses((status = 200, description = "Drones", body = Vec<DroneDto>))
)]
pub async fn list_drones(
    State(state): State<DroneHandlerState>,
    Query(params): Query<DroneListParams>,
) -> ApiResult<Json<Vec<DroneDto>>> {
    let filter = params.restaurant_id.or(params.restaurant);
    let drones = state
        .drones
        .list(filter.as_deref())
        .await
        .map_err(domain_error)?;
    Ok(Json(drones.into_iter().map(DroneDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/drones/{id}",
    tag = "Drones",
    params(("id" = String, Path, description = "Drone ID")),
    responses(
        (status = 200, description = "Drone", body = DroneDto),
        (status = 404, description = "Not found", body = ApiResponse<String>)
    )
)]
pub async fn get_drone(
    State(state): State<DroneHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DroneDto>> {
    let drone = state.drones.get(&id).await.map_err(domain_error)?;
    Ok(Json(drone.into()))
}

#[utoipa::path(
    patch,
    path = "/api/drones/{id}",
    tag = "Drones",
    params(("id" = String, Path, description = "Drone ID")),
    request_body(content = Object, description = "Telemetry fields: status, battery, batteryLevel, position, currentOrderId, ..."),
    responses(
        (status = 200, description = "Drone updated", body = DroneDto),
        (status = 400, description = "Invalid status or unknown field", body = ApiResponse<String>),
        (status = 404, description = "Not found", body = ApiResponse<String>),
        (status = 409, description = "Drone held for another order", body = ApiResponse<String>)
    )
)]
pub async fn patch_drone(
    State(state): State<DroneHandlerState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<DronePatch>,
) -> ApiResult<Json<DroneDto>> {
    let drone = state.drones.patch(&id, patch).await.map_err(domain_error)?;
    Ok(Json(drone.into()))
}

#[utoipa::path(
    post,
    path = "/api/drones/{id}/claim",
    tag = "Drones",
    params(("id" = String, Path, description = "Drone ID")),
    request_body = ClaimDroneRequest,
    responses(
        (status = 200, description = "Drone assigned", body = DroneDto),
        (status = 404, description = "Not found", body = ApiResponse<String>),
        (status = 409, description = "Drone held for another order", body = ApiResponse<String>)
    )
)]
pub async fn claim_drone(
    State(state): State<DroneHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<ClaimDroneRequest>,
) -> ApiResult<Json<DroneDto>> {
    let drone = state
        .drones
        .claim(&id, &request.order_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(drone.into()))
}

#[utoipa::path(
    post,
    path = "/api/drones/{id}/release",
    tag = "Drones",
    params(("id" = String, Path, description = "Drone ID")),
    responses(
        (status = 200, description = "Drone released", body = DroneDto),
        (status = 404, description = "Not found", body = ApiResponse<String>)
    )
)]
pub async fn release_drone(
    State(state): State<DroneHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DroneDto>> {
    let drone = state.drones.release(&id).await.map_err(domain_error)?;
    Ok(Json(drone.into()))
}
