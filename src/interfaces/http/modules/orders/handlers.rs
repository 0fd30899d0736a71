//! Order API handlers
//!
//! Mounted under both `/api/orders` and `/orders`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{CreateOrderRequest, OrderDto, OrderListParams, OrderPatchRequest};
use crate::application::{OrderService, PatchOutcome};
use crate::domain::order::OrderFilter;
use crate::interfaces::http::common::{
    domain_error, ApiResponse, ApiResult, JsonBody, MessageResponse,
};

#[derive(Clone)]
pub struct OrderHandlerState {
    pub orders: OrderService,
}

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    params(OrderListParams),
    responses((status = 200, description = "Orders, newest first", body = Vec<OrderDto>))
)]
pub async fn list_orders(
    State(state): State<OrderHandlerState>,
    Query(params): Query<OrderListParams>,
) -> ApiResult<Json<Vec<OrderDto>>> {
    let filter = OrderFilter::from(params);
    let orders = state.orders.query(&filter).await.map_err(domain_error)?;
    Ok(Json(orders.into_iter().map(OrderDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = String, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with items", body = OrderDto),
        (status = 404, description = "Not found", body = ApiResponse<String>)
    )
)]
pub async fn get_order(
    State(state): State<OrderHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<OrderDto>> {
    let order = state.orders.get(&id).await.map_err(domain_error)?;
    Ok(Json(order.into()))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderDto),
        (status = 400, description = "Malformed body", body = ApiResponse<String>),
        (status = 409, description = "Order id already used", body = ApiResponse<String>)
    )
)]
pub async fn create_order(
    State(state): State<OrderHandlerState>,
    JsonBody(request): JsonBody<CreateOrderRequest>,
) -> ApiResult<(StatusCode, Json<OrderDto>)> {
    let order = state
        .orders
        .create(request.into())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = String, Path, description = "Order ID")),
    request_body = OrderPatchRequest,
    responses(
        (status = 200, description = "Updated order, or a message when nothing changed", body = OrderDto),
        (status = 400, description = "Invalid status or unknown field", body = ApiResponse<String>),
        (status = 404, description = "Not found", body = ApiResponse<String>)
    )
)]
pub async fn patch_order(
    State(state): State<OrderHandlerState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<OrderPatchRequest>,
) -> ApiResult<Response> {
    let (status, fields) = request.split();
    let outcome = state
        .orders
        .patch(&id, status.as_deref(), fields)
        .await
        .map_err(domain_error)?;

    Ok(match outcome {
        PatchOutcome::Updated(order) => Json(OrderDto::from(order)).into_response(),
        PatchOutcome::Unchanged => Json(MessageResponse::new("No changes applied")).into_response(),
    })
}
