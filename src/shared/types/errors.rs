use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, value: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity,
            field: "id",
            value: value.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<InfraError> for DomainError {
    fn from(e: InfraError) -> Self {
        DomainError::Storage(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_value() {
        let err = DomainError::not_found("Order", "ORDER-1");
        assert_eq!(err.to_string(), "Not found: Order with id=ORDER-1");
    }

    #[test]
    fn database_error_keeps_its_text_in_storage() {
        let infra = InfraError::Database(sea_orm::DbErr::Custom("disk full".into()));
        let domain: DomainError = infra.into();
        assert!(matches!(domain, DomainError::Storage(msg)
            if msg.starts_with("Database error:") && msg.contains("disk full")));
    }

    #[test]
    fn infra_error_folds_into_storage() {
        let infra = InfraError::Crypto("bad key".into());
        let domain: DomainError = infra.into();
        assert!(matches!(domain, DomainError::Storage(msg) if msg.contains("bad key")));
    }
}
