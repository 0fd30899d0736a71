//! Admin guard
//!
//! Routes behind [`admin_middleware`] need `Authorization: Bearer <jwt>`
//! whose role is `admin`. The verified caller is stored in request
//! extensions as [`AuthenticatedUser`].

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, warn};

use crate::domain::UserRole;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims, TokenError};
use crate::interfaces::http::common::ApiResponse;

#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
    /// Off in local setups: the guard lets everything through.
    pub require_admin_token: bool,
}

#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub username: String,
    pub role: UserRole,
    pub restaurant_id: Option<String>,
}

impl From<TokenClaims> for AuthenticatedUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            role: claims.role(),
            user_id: claims.sub,
            username: claims.username,
            restaurant_id: claims.restaurant_id,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    MalformedHeader,
    Expired,
    InvalidToken,
    NotAdmin,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
            AuthError::MalformedHeader => (StatusCode::UNAUTHORIZED, "Expected a Bearer token"),
            AuthError::Expired => (StatusCode::UNAUTHORIZED, "Token expired"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
            AuthError::NotAdmin => (StatusCode::FORBIDDEN, "Insufficient permissions"),
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

fn bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MalformedHeader)
}

fn authorize_admin(headers: &HeaderMap, jwt: &JwtConfig) -> Result<AuthenticatedUser, AuthError> {
    let claims = verify_token(bearer(headers)?, jwt).map_err(|e| {
        debug!(error = %e, "Token rejected");
        match e {
            TokenError::Expired => AuthError::Expired,
            TokenError::Invalid(_) => AuthError::InvalidToken,
        }
    })?;

    let user = AuthenticatedUser::from(claims);
    if user.role != UserRole::Admin {
        warn!(user_id = %user.user_id, role = %user.role, "Non-admin token on admin route");
        return Err(AuthError::NotAdmin);
    }
    Ok(user)
}

pub async fn admin_middleware(
    State(auth): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if auth.require_admin_token {
        match authorize_admin(request.headers(), &auth.jwt_config) {
            Ok(user) => {
                request.extensions_mut().insert(user);
            }
            Err(e) => return e.into_response(),
        }
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::jwt::{create_token, TokenSubject};
    use axum::http::HeaderValue;

    fn headers(auth: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_str(auth).unwrap());
        h
    }

    fn token(role: UserRole, hours: i64) -> String {
        let subject = TokenSubject {
            user_id: "U1",
            username: "t",
            role,
            restaurant_id: None,
        };
        create_token(subject, &JwtConfig::new("s", hours)).unwrap()
    }

    #[test]
    fn header_shape_is_checked() {
        let jwt = JwtConfig::new("s", 1);
        assert_eq!(
            authorize_admin(&HeaderMap::new(), &jwt).unwrap_err(),
            AuthError::MissingToken
        );
        assert_eq!(
            authorize_admin(&headers("Basic abc"), &jwt).unwrap_err(),
            AuthError::MalformedHeader
        );
        assert_eq!(
            authorize_admin(&headers("Bearer "), &jwt).unwrap_err(),
            AuthError::MalformedHeader
        );
    }

    #[test]
    fn role_and_expiry_are_enforced() {
        let jwt = JwtConfig::new("s", 1);
        let customer = format!("Bearer {}", token(UserRole::Customer, 1));
        assert_eq!(authorize_admin(&headers(&customer), &jwt).unwrap_err(), AuthError::NotAdmin);

        let stale = format!("Bearer {}", token(UserRole::Admin, -2));
        assert_eq!(authorize_admin(&headers(&stale), &jwt).unwrap_err(), AuthError::Expired);

        let admin = format!("Bearer {}", token(UserRole::Admin, 1));
        let user = authorize_admin(&headers(&admin), &jwt).unwrap();
        assert_eq!(user.role, UserRole::Admin);
    }
}
