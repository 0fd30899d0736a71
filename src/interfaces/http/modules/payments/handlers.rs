//! Payment API handlers

use axum::{extract::State, http::HeaderMap, Json};

use super::dto::{
    CheckoutPaymentRequest, CheckoutPaymentResponse, OrderPaymentRequest, PaymentUrlResponse,
};
use crate::application::VnpayService;
use crate::interfaces::http::common::{domain_error, ApiResponse, ApiResult, JsonBody};

const FALLBACK_CLIENT_IP: &str = "127.0.0.1";

#[derive(Clone)]
pub struct PaymentHandlerState {
    pub vnpay: VnpayService,
}

/// First address of `X-Forwarded-For`, then `X-Real-IP`.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .or_else(|| headers.get("x-real-ip").and_then(|v| v.to_str().ok()))
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .unwrap_or(FALLBACK_CLIENT_IP)
        .to_string()
}

#[utoipa::path(
    post,
    path = "/api/payment/vnpay/create",
    tag = "Payments",
    request_body = OrderPaymentRequest,
    responses(
        (status = 200, description = "Signed redirect URL", body = PaymentUrlResponse),
        (status = 400, description = "Invalid amount", body = ApiResponse<String>)
    )
)]
pub async fn create_order_payment(
    State(state): State<PaymentHandlerState>,
    JsonBody(request): JsonBody<OrderPaymentRequest>,
) -> ApiResult<Json<PaymentUrlResponse>> {
    let url = state
        .vnpay
        .create_order_payment(request.amount, &request.order_id)
        .map_err(domain_error)?;
    Ok(Json(PaymentUrlResponse { url }))
}

#[utoipa::path(
    post,
    path = "/api/vnpay/create-payment",
    tag = "Payments",
    request_body = CheckoutPaymentRequest,
    responses(
        (status = 200, description = "Signed redirect URL for the checkout page", body = CheckoutPaymentResponse),
        (status = 400, description = "Invalid amount", body = ApiResponse<String>)
    )
)]
pub async fn create_checkout_payment(
    State(state): State<PaymentHandlerState>,
    headers: HeaderMap,
    JsonBody(request): JsonBody<CheckoutPaymentRequest>,
) -> ApiResult<Json<CheckoutPaymentResponse>> {
    let payment = state
        .vnpay
        .create_checkout_payment(request.amount, request.options(), &client_ip(&headers))
        .map_err(domain_error)?;
    Ok(Json(payment.into()))
}
