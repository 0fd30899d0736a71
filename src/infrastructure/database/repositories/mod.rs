//! SeaORM repository implementations

mod analytics_repository;
mod cart_repository;
mod drone_repository;
mod notification_repository;
mod order_repository;
mod product_repository;
mod repository_provider;
mod restaurant_repository;
mod user_repository;

pub use analytics_repository::SeaOrmAnalyticsRepository;
pub use cart_repository::SeaOrmCartRepository;
pub use drone_repository::SeaOrmDroneRepository;
pub use notification_repository::SeaOrmNotificationRepository;
pub use order_repository::SeaOrmOrderRepository;
pub use product_repository::SeaOrmProductRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use restaurant_repository::SeaOrmRestaurantRepository;
pub use user_repository::SeaOrmUserRepository;

use crate::domain::DomainError;
use crate::shared::errors::InfraError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    InfraError::Database(e).into()
}

/// Map a write error, turning unique-constraint violations into `Conflict`.
pub(crate) fn write_err(e: sea_orm::DbErr, conflict: impl FnOnce() -> String) -> DomainError {
    let text = e.to_string();
    if text.contains("UNIQUE") || text.contains("duplicate") {
        DomainError::Conflict(conflict())
    } else {
        db_err(e)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use sea_orm::DatabaseConnection;
    use sea_orm_migration::MigratorTrait;

    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::{init_database, DatabaseConfig};

    pub async fn migrated_db() -> DatabaseConnection {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }
}
