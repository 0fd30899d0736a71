//! Shared HTTP types: the error envelope and the domain error mapper

pub mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

pub use validated_json::{JsonBody, ValidatedJson};

/// Envelope used for error bodies and a few legacy endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// `{ "message": ... }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub type ApiResult<T> = Result<T, ApiError>;

/// Map a domain error onto a status code and error body.
///
/// Storage failures are logged and answered with a generic message.
pub fn domain_error(err: DomainError) -> ApiError {
    let (status, message) = match err {
        DomainError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        e @ DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, e.to_string()),
        DomainError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        DomainError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        DomainError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        DomainError::Storage(detail) => {
            error!(error = %detail, "Request failed on storage");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };
    (status, Json(ApiResponse::error(message)))
}

/// 400 with a plain message
pub fn bad_request(message: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_keeps_its_message() {
        let (status, Json(body)) = domain_error(DomainError::Validation("Invalid status: x".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error.as_deref(), Some("Invalid status: x"));
        assert!(!body.success);
    }

    #[test]
    fn storage_detail_is_hidden() {
        let (status, Json(body)) =
            domain_error(DomainError::Storage("Database error: disk I/O".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some("Internal server error"));
    }

    #[test]
    fn status_codes_follow_error_kind() {
        let code = |e| domain_error(e).0;
        assert_eq!(code(DomainError::not_found("Order", "X")), StatusCode::NOT_FOUND);
        assert_eq!(code(DomainError::Conflict("dup".into())), StatusCode::CONFLICT);
        assert_eq!(code(DomainError::Unauthorized("no".into())), StatusCode::UNAUTHORIZED);
        assert_eq!(code(DomainError::Forbidden("no".into())), StatusCode::FORBIDDEN);
    }

    #[test]
    fn error_body_serializes_null_data() {
        let body = ApiResponse::<()>::error("boom");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "data": null, "error": "boom"}));
    }
}
