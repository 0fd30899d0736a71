use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use super::db_err;
use crate::domain::analytics::{AnalyticsRepository, AnalyticsSnapshot};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::analytics_snapshot;

pub struct SeaOrmAnalyticsRepository {
    db: DatabaseConnection,
}

impl SeaOrmAnalyticsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AnalyticsRepository for SeaOrmAnalyticsRepository {
    async fn save(&self, s: &AnalyticsSnapshot) -> DomainResult<()> {
        analytics_snapshot::ActiveModel {
            id: Set(s.id.clone()),
            restaurant_id: Set(s.restaurant_id.clone()),
            period: Set(s.period.as_str().to_string()),
            revenue: Set(s.revenue),
            orders: Set(s.orders),
            avg_order_value: Set(s.avg_order_value),
            delivery_time: Set(s.delivery_time),
            created_at: Set(s.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;
        Ok(())
    }
}
