//! Application configuration
//!
//! Loaded from a TOML file (by default `~/.config/foodfast/config.toml`),
//! with a handful of environment overrides for secrets and the database
//! URL. Every section has defaults, so an empty file is a valid config.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::shared::errors::AppError;

/// Default configuration file location.
///
/// `FOODFAST_CONFIG` wins; otherwise the platform config dir is used,
/// falling back to the working directory when there is none.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("FOODFAST_CONFIG") {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .map(|dir| dir.join("foodfast").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub admin: AdminConfig,
    pub vnpay: VnpayConfig,
    pub orders: OrdersConfig,
    pub seed: SeedConfig,
}

impl AppConfig {
    /// Read and parse `path`, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        let mut config = Self::from_toml(&raw)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Like [`load`](Self::load), but an unreadable or invalid file falls
    /// back to defaults (still env-overridden). The error is handed back so
    /// the caller can log it once tracing is up.
    pub fn load_or_default(path: &Path) -> (Self, Option<AppError>) {
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(e) => {
                let mut config = Self::default();
                config.apply_env_overrides();
                (config, Some(e))
            }
        }
    }

    pub fn from_toml(raw: &str) -> Result<Self, AppError> {
        toml::from_str(raw).map_err(|e| AppError::Config(e.to_string()))
    }

    /// `DATABASE_URL`, `JWT_SECRET`, `VNPAY_TMN_CODE` and
    /// `VNPAY_HASH_SECRET` replace the file values when set.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.security.jwt_secret = secret;
        }
        if let Some(code) = lookup("VNPAY_TMN_CODE") {
            self.vnpay.tmn_code = code;
        }
        if let Some(secret) = lookup("VNPAY_HASH_SECRET") {
            self.vnpay.hash_secret = secret;
        }
    }
}

// ── Sections ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds to wait for in-flight requests on shutdown.
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://foodfast.db?mode=rwc".to_string(),
        }
    }
}

impl DatabaseSettings {
    pub fn connection_url(&self) -> String {
        self.url.clone()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub require_admin_token: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_hours: 24,
            require_admin_token: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

/// VNPay sandbox gateway settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VnpayConfig {
    pub url: String,
    pub tmn_code: String,
    pub hash_secret: String,
    pub return_url: String,
}

pub const PLACEHOLDER_TMN_CODE: &str = "YOUR_TMN_CODE";
pub const PLACEHOLDER_HASH_SECRET: &str = "YOUR_HASH_SECRET";

impl Default for VnpayConfig {
    fn default() -> Self {
        Self {
            url: "https://sandbox.vnpayment.vn/paymentv2/vpcpay.html".to_string(),
            tmn_code: PLACEHOLDER_TMN_CODE.to_string(),
            hash_secret: PLACEHOLDER_HASH_SECRET.to_string(),
            return_url: "http://localhost:5173/payment-callback".to_string(),
        }
    }
}

impl VnpayConfig {
    pub fn has_placeholder_credentials(&self) -> bool {
        self.tmn_code == PLACEHOLDER_TMN_CODE || self.hash_secret == PLACEHOLDER_HASH_SECRET
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrdersConfig {
    /// Emit a fresh notification whenever an order's status changes.
    pub renotify_on_status_change: bool,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            renotify_on_status_change: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub demo_data: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { demo_data: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.server.api_port, 8080);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.orders.renotify_on_status_change);
        assert!(cfg.security.require_admin_token);
        assert!(cfg.vnpay.has_placeholder_credentials());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            api_port = 9090

            [orders]
            renotify_on_status_change = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.api_port, 9090);
        assert_eq!(cfg.server.api_host, "0.0.0.0");
        assert!(!cfg.orders.renotify_on_status_change);
        assert_eq!(cfg.admin.username, "admin");
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = AppConfig::from_toml("[server\napi_port = 1").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn overrides_replace_secrets() {
        let mut cfg = AppConfig::default();
        cfg.apply_overrides(|key| match key {
            "DATABASE_URL" => Some("sqlite::memory:".to_string()),
            "VNPAY_TMN_CODE" => Some("DEMO1234".to_string()),
            _ => None,
        });
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.vnpay.tmn_code, "DEMO1234");
        assert_eq!(cfg.security.jwt_secret, "change-me-in-production");
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = AppConfig::load(Path::new("/nonexistent/foodfast/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let (cfg, err) = AppConfig::load_or_default(Path::new("/nonexistent/foodfast/config.toml"));
        assert!(err.is_some());
        assert_eq!(cfg.admin.username, "admin");
    }
}
