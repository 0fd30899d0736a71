//! Authentication API handlers

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserDto};
use crate::application::AuthService;
use crate::interfaces::http::common::{domain_error, ApiResponse, ApiResult, JsonBody, ValidatedJson};

/// Auth handler state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub auth: AuthService,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Invalid credentials or suspended account", body = ApiResponse<String>)
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let result = state
        .auth
        .login(&request.username, &request.password)
        .await
        .map_err(domain_error)?;
    Ok(Json(result.into()))
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Customer registered", body = RegisterResponse),
        (status = 400, description = "Missing field", body = ApiResponse<String>),
        (status = 409, description = "Username, email or phone already used", body = ApiResponse<String>)
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let user = state
        .auth
        .register(request.into())
        .await
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            ok: true,
            data: user.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/auth/users",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All accounts", body = Vec<UserDto>),
        (status = 401, description = "Missing or invalid token", body = ApiResponse<String>)
    )
)]
pub async fn list_users(State(state): State<AuthHandlerState>) -> ApiResult<Json<Vec<UserDto>>> {
    let users = state.auth.users().await.map_err(domain_error)?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}
