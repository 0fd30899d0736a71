//! HS256 session tokens
//!
//! A token carries the account id, username, role and (for restaurant
//! accounts) the restaurant code, so the admin guard never needs a
//! database round-trip.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{User, UserRole};

const ISSUER: &str = "foodfast";

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Negative values produce already-expired tokens (tests only)
    pub expiration_hours: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.secret.as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.as_bytes())
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("token rejected: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(e),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    pub sub: String,
    pub username: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

impl TokenClaims {
    /// Unknown role strings (older tokens) are treated as customers.
    pub fn role(&self) -> UserRole {
        self.role.parse().unwrap_or(UserRole::Customer)
    }
}

/// Who a token is issued to
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    pub user_id: &'a str,
    pub username: &'a str,
    pub role: UserRole,
    pub restaurant_id: Option<&'a str>,
}

impl<'a> From<&'a User> for TokenSubject<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            user_id: &user.id,
            username: &user.username,
            role: user.role,
            restaurant_id: user.restaurant_id.as_deref(),
        }
    }
}

pub fn create_token(subject: TokenSubject<'_>, config: &JwtConfig) -> Result<String, TokenError> {
    let issued = Utc::now();
    let claims = TokenClaims {
        sub: subject.user_id.to_string(),
        username: subject.username.to_string(),
        role: subject.role.as_str().to_string(),
        restaurant_id: subject.restaurant_id.map(str::to_string),
        iat: issued.timestamp(),
        exp: (issued + Duration::hours(config.expiration_hours)).timestamp(),
        iss: ISSUER.to_string(),
    };
    Ok(encode(&Header::default(), &claims, &config.encoding_key())?)
}

pub fn verify_token(token: &str, config: &JwtConfig) -> Result<TokenClaims, TokenError> {
    let mut validation = Validation::default();
    validation.set_issuer(&[ISSUER]);
    let data = decode::<TokenClaims>(token, &config.decoding_key(), &validation)?;
    Ok(data.claims)
}
