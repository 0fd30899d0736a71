//! Product API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{ProductDto, ProductListParams, SaveProductRequest};
use crate::application::CatalogService;
use crate::domain::ProductPatch;
use crate::interfaces::http::common::{domain_error, ApiResponse, ApiResult, JsonBody, ValidatedJson};

#[derive(Clone)]
pub struct ProductHandlerState {
    pub catalog: CatalogService,
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    params(ProductListParams),
    responses((status = 200, description = "Products sorted by name", body = Vec<ProductDto>))
)]
pub async fn list_products(
    State(state): State<ProductHandlerState>,
    Query(params): Query<ProductListParams>,
) -> ApiResult<Json<Vec<ProductDto>>> {
    let products = state
        .catalog
        .products(params.restaurant.as_deref())
        .await
        .map_err(domain_error)?;
    Ok(Json(products.into_iter().map(ProductDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = ProductDto),
        (status = 404, description = "Not found", body = ApiResponse<String>)
    )
)]
pub async fn get_product(
    State(state): State<ProductHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProductDto>> {
    let product = state.catalog.product(&id).await.map_err(domain_error)?;
    Ok(Json(product.into()))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = SaveProductRequest,
    responses(
        (status = 201, description = "Product saved", body = ProductDto),
        (status = 400, description = "Missing id or malformed body", body = ApiResponse<String>)
    )
)]
pub async fn create_product(
    State(state): State<ProductHandlerState>,
    ValidatedJson(request): ValidatedJson<SaveProductRequest>,
) -> ApiResult<(StatusCode, Json<ProductDto>)> {
    let product = state
        .catalog
        .save_product(request.into())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ID")),
    request_body(content = Object, description = "Any subset of name, description, price, category, imageUrl, restaurant, available"),
    responses(
        (status = 200, description = "Product updated", body = ProductDto),
        (status = 400, description = "Unknown field", body = ApiResponse<String>),
        (status = 404, description = "Not found", body = ApiResponse<String>)
    )
)]
pub async fn patch_product(
    State(state): State<ProductHandlerState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<ProductPatch>,
) -> ApiResult<Json<ProductDto>> {
    let product = state
        .catalog
        .patch_product(&id, patch)
        .await
        .map_err(domain_error)?;
    Ok(Json(product.into()))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ApiResponse<String>)
    )
)]
pub async fn delete_product(
    State(state): State<ProductHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.catalog.delete_product(&id).await.map_err(domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}
