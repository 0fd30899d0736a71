//! Admin API handlers

use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::RestaurantStatusRequest;
use crate::application::admin::{AdminCustomer, AdminDrone, AdminRestaurant, AdminStats};
use crate::application::AdminService;
use crate::interfaces::http::common::{
    bad_request, domain_error, ApiResponse, ApiResult, JsonBody, MessageResponse,
};
use crate::interfaces::http::modules::restaurants::RestaurantDto;

#[derive(Clone)]
pub struct AdminHandlerState {
    pub admin: AdminService,
}

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Platform totals", body = AdminStats),
        (status = 401, description = "Missing or invalid token", body = ApiResponse<String>),
        (status = 403, description = "Not an admin", body = ApiResponse<String>)
    )
)]
pub async fn get_stats(State(state): State<AdminHandlerState>) -> ApiResult<Json<AdminStats>> {
    let stats = state.admin.stats().await.map_err(domain_error)?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/admin/restaurants",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Restaurants with owner and sales figures", body = Vec<AdminRestaurant>))
)]
pub async fn list_restaurants(
    State(state): State<AdminHandlerState>,
) -> ApiResult<Json<Vec<AdminRestaurant>>> {
    let restaurants = state.admin.restaurants().await.map_err(domain_error)?;
    Ok(Json(restaurants))
}

#[utoipa::path(
    get,
    path = "/api/admin/customers",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Customers with order history figures", body = Vec<AdminCustomer>))
)]
pub async fn list_customers(
    State(state): State<AdminHandlerState>,
) -> ApiResult<Json<Vec<AdminCustomer>>> {
    let customers = state.admin.customers().await.map_err(domain_error)?;
    Ok(Json(customers))
}

#[utoipa::path(
    get,
    path = "/api/admin/drones",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Fleet overview", body = Vec<AdminDrone>))
)]
pub async fn list_drones(State(state): State<AdminHandlerState>) -> ApiResult<Json<Vec<AdminDrone>>> {
    let drones = state.admin.drones().await.map_err(domain_error)?;
    Ok(Json(drones))
}

#[utoipa::path(
    patch,
    path = "/api/admin/restaurants/{id}/status",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Restaurant ID")),
    request_body = RestaurantStatusRequest,
    responses(
        (status = 200, description = "Restaurant updated", body = RestaurantDto),
        (status = 400, description = "isActive missing", body = ApiResponse<String>),
        (status = 404, description = "Not found", body = ApiResponse<String>)
    )
)]
pub async fn set_restaurant_status(
    State(state): State<AdminHandlerState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<RestaurantStatusRequest>,
) -> ApiResult<Json<RestaurantDto>> {
    let Some(is_active) = request.is_active else {
        return Err(bad_request("isActive field required"));
    };
    let restaurant = state
        .admin
        .set_restaurant_active(&id, is_active)
        .await
        .map_err(domain_error)?;
    Ok(Json(restaurant.into()))
}

#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}/suspend",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer suspended", body = MessageResponse),
        (status = 404, description = "No such customer", body = ApiResponse<String>)
    )
)]
pub async fn suspend_user(
    State(state): State<AdminHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.admin.suspend(&id).await.map_err(domain_error)?;
    Ok(Json(MessageResponse::new("Customer suspended")))
}

#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}/reactivate",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer reactivated", body = MessageResponse),
        (status = 404, description = "No such suspended customer", body = ApiResponse<String>)
    )
)]
pub async fn reactivate_user(
    State(state): State<AdminHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.admin.reactivate(&id).await.map_err(domain_error)?;
    Ok(Json(MessageResponse::new("Customer reactivated")))
}
