//! Restaurant API handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{RestaurantDto, RestaurantListParams};
use crate::application::CatalogService;
use crate::interfaces::http::common::{domain_error, ApiResponse, ApiResult};

#[derive(Clone)]
pub struct RestaurantHandlerState {
    pub catalog: CatalogService,
}

#[utoipa::path(
    get,
    path = "/api/restaurants",
    tag = "Restaurants",
    params(RestaurantListParams),
    responses((status = 200, description = "Restaurants", body = Vec<RestaurantDto>))
)]
pub async fn list_restaurants(
    State(state): State<RestaurantHandlerState>,
    Query(params): Query<RestaurantListParams>,
) -> ApiResult<Json<Vec<RestaurantDto>>> {
    let restaurants = state
        .catalog
        .restaurants(params.category.as_deref())
        .await
        .map_err(domain_error)?;
    Ok(Json(restaurants.into_iter().map(RestaurantDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}",
    tag = "Restaurants",
    params(("id" = String, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Restaurant", body = RestaurantDto),
        (status = 404, description = "Not found", body = ApiResponse<String>)
    )
)]
pub async fn get_restaurant(
    State(state): State<RestaurantHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<RestaurantDto>> {
    let restaurant = state.catalog.restaurant(&id).await.map_err(domain_error)?;
    Ok(Json(restaurant.into()))
}

#[utoipa::path(
    get,
    path = "/api/restaurants/owner/{owner_id}",
    tag = "Restaurants",
    params(("owner_id" = String, Path, description = "Owner user ID")),
    responses(
        (status = 200, description = "Restaurant owned by the user", body = RestaurantDto),
        (status = 404, description = "Not found", body = ApiResponse<String>)
    )
)]
pub async fn get_restaurant_by_owner(
    State(state): State<RestaurantHandlerState>,
    Path(owner_id): Path<String>,
) -> ApiResult<Json<RestaurantDto>> {
    let restaurant = state
        .catalog
        .restaurant_by_owner(&owner_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(restaurant.into()))
}
