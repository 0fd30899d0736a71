use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::db_err;
use crate::domain::notification::{Notification, NotificationRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::notification;

pub struct SeaOrmNotificationRepository {
    db: DatabaseConnection,
}

impl SeaOrmNotificationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: notification::Model) -> Notification {
    Notification {
        id: m.id,
        restaurant_id: m.restaurant_id,
        order_id: m.order_id,
        customer_name: m.customer_name,
        customer_phone: m.customer_phone,
        total: m.total,
        status: m.status,
        timestamp: m.timestamp,
        is_read: m.is_read,
    }
}

#[async_trait]
impl NotificationRepository for SeaOrmNotificationRepository {
    async fn save(&self, n: &Notification) -> DomainResult<()> {
        notification::ActiveModel {
            id: Set(n.id.clone()),
            restaurant_id: Set(n.restaurant_id.clone()),
            order_id: Set(n.order_id.clone()),
            customer_name: Set(n.customer_name.clone()),
            customer_phone: Set(n.customer_phone.clone()),
            total: Set(n.total),
            status: Set(n.status.clone()),
            timestamp: Set(n.timestamp),
            is_read: Set(n.is_read),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn find_by_restaurant(
        &self,
        restaurant_id: &str,
        unread_only: bool,
    ) -> DomainResult<Vec<Notification>> {
        let mut query = notification::Entity::find()
            .filter(notification::Column::RestaurantId.eq(restaurant_id));
        if unread_only {
            query = query.filter(notification::Column::IsRead.eq(false));
        }
        let models = query
            .order_by_desc(notification::Column::Timestamp)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn mark_read(&self, id: &str) -> DomainResult<bool> {
        let result = notification::Entity::update_many()
            .col_expr(notification::Column::IsRead, Expr::value(true))
            .filter(notification::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn count_unread(&self, restaurant_id: &str) -> DomainResult<u64> {
        notification::Entity::find()
            .filter(notification::Column::RestaurantId.eq(restaurant_id))
            .filter(notification::Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::migrated_db;

    fn note(id: &str, timestamp: i64) -> Notification {
        Notification {
            id: id.to_string(),
            restaurant_id: "SweetDreams".to_string(),
            order_id: format!("ORDER-{}", id),
            customer_name: None,
            customer_phone: None,
            total: 40_000,
            status: "Pending".to_string(),
            timestamp,
            is_read: false,
        }
    }

    #[tokio::test]
    async fn newest_first_and_unread_filter() {
        let repo = SeaOrmNotificationRepository::new(migrated_db().await);
        repo.save(&note("N1", 1)).await.unwrap();
        repo.save(&note("N2", 2)).await.unwrap();
        assert!(repo.mark_read("N1").await.unwrap());

        let all = repo.find_by_restaurant("SweetDreams", false).await.unwrap();
        assert_eq!(all.iter().map(|n| n.id.as_str()).collect::<Vec<_>>(), ["N2", "N1"]);
        let unread = repo.find_by_restaurant("SweetDreams", true).await.unwrap();
        assert_eq!(unread.len(), 1);
        assert_eq!(repo.count_unread("SweetDreams").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn mark_read_of_unknown_id_is_false() {
        let repo = SeaOrmNotificationRepository::new(migrated_db().await);
        assert!(!repo.mark_read("missing").await.unwrap());
    }
}
