//! Auth DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::LoginResult;
use crate::domain::user::NewUser;
use crate::domain::User;

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Login response: the account summary plus a bearer token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: String,
    pub username: String,
    pub role: String,
    pub restaurant_id: Option<String>,
    pub name: Option<String>,
    pub token: String,
}

impl From<LoginResult> for LoginResponse {
    fn from(r: LoginResult) -> Self {
        Self {
            id: r.user.id,
            username: r.user.username,
            role: r.user.role.as_str().to_string(),
            restaurant_id: r.user.restaurant_id,
            name: r.user.name,
            token: r.token,
        }
    }
}

/// Customer sign-up. Every field is required; blanks are rejected by the
/// service with a 400.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, alias = "name")]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl From<RegisterRequest> for NewUser {
    fn from(r: RegisterRequest) -> Self {
        Self {
            username: r.username,
            password: r.password,
            name: r.full_name,
            email: r.email,
            phone: r.phone,
        }
    }
}

/// Account without its password hash
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: String,
    pub restaurant_id: Option<String>,
    pub order_count: i32,
    pub created_at: i64,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            role: u.role.as_str().to_string(),
            id: u.id,
            username: u.username,
            name: u.name,
            email: u.email,
            phone: u.phone,
            restaurant_id: u.restaurant_id,
            order_count: u.order_count,
            created_at: u.created_at,
        }
    }
}

/// `{ "ok": true, "data": user }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub ok: bool,
    pub data: UserDto,
}
