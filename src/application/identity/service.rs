//! Authentication service: application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate here.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::user::NewUser;
use crate::domain::{DomainError, DomainResult, RepositoryProvider, User, UserRole};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig, TokenSubject};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::shared::time::now_millis;

/// Returned after a successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub token: String,
}

#[derive(Clone)]
pub struct AuthService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
}

fn required(value: &str, field: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

impl AuthService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self { repos, jwt_config }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check the bcrypt hash and sign a token. Unknown users and wrong
    /// passwords get the same error.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<LoginResult> {
        let invalid = || DomainError::Unauthorized("Invalid username or password".into());

        let Some(user) = self.repos.users().find_by_username(username).await? else {
            return Err(invalid());
        };
        if !verify_password(password, &user.password_hash) {
            warn!(username, "Failed login attempt");
            return Err(invalid());
        }
        if user.role == UserRole::Suspended {
            return Err(DomainError::Unauthorized("Account is suspended".into()));
        }

        let token = create_token(TokenSubject::from(&user), &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;

        info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(LoginResult { user, token })
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a customer account. Username, email and phone must all
    /// be unused; the store is left untouched on conflict.
    pub async fn register(&self, new_user: NewUser) -> DomainResult<User> {
        required(&new_user.username, "username")?;
        required(&new_user.password, "password")?;
        required(&new_user.name, "fullName")?;
        required(&new_user.email, "email")?;
        required(&new_user.phone, "phone")?;

        let users = self.repos.users();
        if users.find_by_username(&new_user.username).await?.is_some() {
            return Err(DomainError::Conflict("Username already exists".into()));
        }
        if users.find_by_email(&new_user.email).await?.is_some() {
            return Err(DomainError::Conflict("Email already exists".into()));
        }
        if users.find_by_phone(&new_user.phone).await?.is_some() {
            return Err(DomainError::Conflict("Phone already exists".into()));
        }

        let password_hash = hash_password(&new_user.password)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;

        let now = now_millis();
        let user = User {
            id: format!("CUS-{}", now),
            username: new_user.username,
            password_hash,
            name: Some(new_user.name),
            email: Some(new_user.email),
            phone: Some(new_user.phone),
            role: UserRole::Customer,
            restaurant_id: None,
            order_count: 0,
            created_at: now,
        };
        users.create(&user).await?;

        info!(user_id = %user.id, username = %user.username, "New user registered");
        Ok(user)
    }

    /// Create the admin account if no user has that username yet.
    /// Returns whether an account was created.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> DomainResult<bool> {
        if self.repos.users().find_by_username(username).await?.is_some() {
            return Ok(false);
        }
        let password_hash = hash_password(password)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;
        let now = now_millis();
        let admin = User {
            id: format!("ADMIN-{}", now),
            username: username.to_string(),
            password_hash,
            name: Some("Administrator".into()),
            email: None,
            phone: None,
            role: UserRole::Admin,
            restaurant_id: None,
            order_count: 0,
            created_at: now,
        };
        self.repos.users().create(&admin).await?;
        Ok(true)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn users(&self) -> DomainResult<Vec<User>> {
        self.repos.users().find_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::jwt::verify_token;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn service() -> AuthService {
        AuthService::new(
            Arc::new(InMemoryRepositoryProvider::new()),
            JwtConfig::new("test-secret", 1),
        )
    }

    fn new_user(username: &str, email: &str, phone: &str) -> NewUser {
        NewUser {
            username: username.into(),
            password: "pa55word".into(),
            name: "Nguyen Van A".into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    #[tokio::test]
    async fn register_then_login() {
        let svc = service();
        let user = svc.register(new_user("lan", "lan@example.com", "0901")).await.unwrap();
        assert!(user.id.starts_with("CUS-"));
        assert_eq!(user.role, UserRole::Customer);
        assert_ne!(user.password_hash, "pa55word");

        let result = svc.login("lan", "pa55word").await.unwrap();
        let claims = verify_token(&result.token, &JwtConfig::new("test-secret", 1)).unwrap();
        assert_eq!(claims.sub, user.id);

        assert!(matches!(
            svc.login("lan", "wrong").await,
            Err(DomainError::Unauthorized(_))
        ));
        assert!(matches!(
            svc.login("ghost", "pa55word").await,
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_username_leaves_store_unchanged() {
        let svc = service();
        svc.register(new_user("lan", "lan@example.com", "0901")).await.unwrap();
        let err = svc
            .register(new_user("lan", "other@example.com", "0902"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(svc.users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_email_or_phone_conflicts() {
        let svc = service();
        svc.register(new_user("lan", "lan@example.com", "0901")).await.unwrap();
        assert!(matches!(
            svc.register(new_user("minh", "lan@example.com", "0902")).await,
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            svc.register(new_user("minh", "minh@example.com", "0901")).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn missing_field_is_invalid() {
        let svc = service();
        let err = svc.register(new_user("lan", "", "0901")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn ensure_admin_runs_once() {
        let svc = service();
        assert!(svc.ensure_admin("admin", "admin123").await.unwrap());
        assert!(!svc.ensure_admin("admin", "admin123").await.unwrap());
        let login = svc.login("admin", "admin123").await.unwrap();
        assert!(login.user.is_admin());
    }
}
