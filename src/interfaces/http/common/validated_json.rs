//! JSON body extractors
//!
//! - [`ValidatedJson`] parses the body and runs `validator::Validate` on it.
//!   Both a body the JSON parser rejects and one that breaks a rule are a
//!   400; the latter lists every failing field.
//! - [`JsonBody`] parses only. Used by the partial-update bodies, whose
//!   `deny_unknown_fields` turns a stray key into a 400.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiResponse;

/// Deserialized and validated request body.
///
/// ```ignore
/// async fn add(ValidatedJson(item): ValidatedJson<AddCartItemRequest>) { ... }
/// ```
pub struct ValidatedJson<T>(pub T);

/// Deserialized request body without validation rules.
pub struct JsonBody<T>(pub T);

/// Why a body extractor refused the request.
#[derive(Debug)]
pub enum BodyRejection {
    Malformed(JsonRejection),
    Invalid(ValidationErrors),
}

/// `field: message` pairs, sorted by field so the text is stable.
fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{}: {}", field, msg),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();
    parts.sort();

    if parts.is_empty() {
        "Validation failed".to_string()
    } else {
        parts.join("; ")
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            BodyRejection::Malformed(rejection) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {}", rejection.body_text()),
            ),
            BodyRejection::Invalid(errors) => (StatusCode::BAD_REQUEST, describe(&errors)),
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

async fn parse<T, S>(req: Request, state: &S) -> Result<T, BodyRejection>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    Json::<T>::from_request(req, state)
        .await
        .map(|Json(value)| value)
        .map_err(BodyRejection::Malformed)
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value: T = parse(req, state).await?;
        value.validate().map_err(BodyRejection::Invalid)?;
        Ok(ValidatedJson(value))
    }
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        parse(req, state).await.map(JsonBody)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    struct AddItem {
        #[validate(length(min = 1, message = "productName is required"))]
        product_name: String,
        #[validate(range(min = 1, message = "quantity must be at least 1"))]
        quantity: i32,
    }

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Patch {
        #[allow(dead_code)]
        status: Option<String>,
    }

    fn app() -> Router {
        Router::new()
            .route("/add", post(|ValidatedJson(_): ValidatedJson<AddItem>| async { "ok" }))
            .route("/patch", post(|JsonBody(_): JsonBody<Patch>| async { "ok" }))
    }

    async fn post_json(uri: &str, body: &str) -> (StatusCode, String) {
        let req = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn valid_body_passes() {
        let (status, _) = post_json("/add", r#"{"productName": "Donut", "quantity": 2}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn broken_json_is_400() {
        let (status, body) = post_json("/add", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Invalid request body"));
    }

    #[tokio::test]
    async fn rule_violations_are_400_and_list_every_field() {
        let (status, body) = post_json("/add", r#"{"productName": "", "quantity": 0}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            json["error"],
            "productName: productName is required; quantity: quantity must be at least 1"
        );
    }

    #[tokio::test]
    async fn unknown_key_in_patch_is_400() {
        let (status, _) = post_json("/patch", r#"{"status": "ready"}"#).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = post_json("/patch", r#"{"total": 5}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
