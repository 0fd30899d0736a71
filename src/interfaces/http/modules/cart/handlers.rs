//! Cart API handlers
//!
//! Every mutation answers with the whole cart, which is also broadcast on
//! the `cart` topic.

use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::{AddCartItemRequest, CartItemDto};
use crate::application::CartService;
use crate::domain::CartItem;
use crate::interfaces::http::common::{domain_error, ApiResponse, ApiResult, ValidatedJson};

#[derive(Clone)]
pub struct CartHandlerState {
    pub cart: CartService,
}

fn to_dtos(items: Vec<CartItem>) -> Json<Vec<CartItemDto>> {
    Json(items.into_iter().map(CartItemDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/cart",
    tag = "Cart",
    responses((status = 200, description = "Cart contents", body = Vec<CartItemDto>))
)]
pub async fn get_cart(State(state): State<CartHandlerState>) -> ApiResult<Json<Vec<CartItemDto>>> {
    let items = state.cart.items().await.map_err(domain_error)?;
    Ok(to_dtos(items))
}

#[utoipa::path(
    post,
    path = "/api/cart/add",
    tag = "Cart",
    request_body = AddCartItemRequest,
    responses(
        (status = 200, description = "Cart after the addition", body = Vec<CartItemDto>),
        (status = 400, description = "Validation failed", body = ApiResponse<String>)
    )
)]
pub async fn add_to_cart(
    State(state): State<CartHandlerState>,
    ValidatedJson(request): ValidatedJson<AddCartItemRequest>,
) -> ApiResult<Json<Vec<CartItemDto>>> {
    let items = state.cart.add(request.into()).await.map_err(domain_error)?;
    Ok(to_dtos(items))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{id}",
    tag = "Cart",
    params(("id" = i64, Path, description = "Cart item ID")),
    responses(
        (status = 200, description = "Cart after the removal", body = Vec<CartItemDto>),
        (status = 404, description = "Not found", body = ApiResponse<String>)
    )
)]
pub async fn remove_from_cart(
    State(state): State<CartHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<CartItemDto>>> {
    let items = state.cart.remove(id).await.map_err(domain_error)?;
    Ok(to_dtos(items))
}

#[utoipa::path(
    delete,
    path = "/api/cart/clear",
    tag = "Cart",
    responses((status = 200, description = "Empty cart", body = Vec<CartItemDto>))
)]
pub async fn clear_cart(State(state): State<CartHandlerState>) -> ApiResult<Json<Vec<CartItemDto>>> {
    let items = state.cart.clear().await.map_err(domain_error)?;
    Ok(to_dtos(items))
}
