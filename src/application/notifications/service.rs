//! Notification service
//!
//! Turns orders into restaurant notifications and tracks their read state.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{DomainResult, Notification, Order, RepositoryProvider};
use crate::shared::time::now_millis;

#[derive(Clone)]
pub struct NotificationService {
    repos: Arc<dyn RepositoryProvider>,
}

impl NotificationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Snapshot `order` into a new unread notification for its restaurant.
    pub async fn create_from_order(&self, order: &Order) -> DomainResult<Notification> {
        let notification = Notification::from_order(order, now_millis())?;
        self.repos.notifications().save(&notification).await?;
        info!(
            notification_id = %notification.id,
            order_id = %order.id,
            restaurant_id = %notification.restaurant_id,
            "Notification created"
        );
        Ok(notification)
    }

    /// Newest first.
    pub async fn list_by_restaurant(
        &self,
        restaurant_id: &str,
        unread_only: bool,
    ) -> DomainResult<Vec<Notification>> {
        self.repos
            .notifications()
            .find_by_restaurant(restaurant_id, unread_only)
            .await
    }

    /// Idempotent; an unknown id is not an error.
    pub async fn mark_read(&self, id: &str) -> DomainResult<()> {
        let found = self.repos.notifications().mark_read(id).await?;
        if !found {
            debug!(notification_id = id, "mark_read on unknown notification");
        }
        Ok(())
    }

    pub async fn unread_count(&self, restaurant_id: &str) -> DomainResult<u64> {
        self.repos.notifications().count_unread(restaurant_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn service() -> NotificationService {
        NotificationService::new(Arc::new(InMemoryRepositoryProvider::new()))
    }

    fn order(id: &str, restaurant_id: &str) -> Order {
        let mut order = Order::new(id, 1);
        order.restaurant_id = Some(restaurant_id.into());
        order
    }

    #[tokio::test]
    async fn mark_read_is_idempotent() {
        let svc = service();
        let n = svc.create_from_order(&order("O1", "R1")).await.unwrap();
        svc.create_from_order(&order("O2", "R1")).await.unwrap();
        assert_eq!(svc.unread_count("R1").await.unwrap(), 2);

        svc.mark_read(&n.id).await.unwrap();
        svc.mark_read(&n.id).await.unwrap();
        assert_eq!(svc.unread_count("R1").await.unwrap(), 1);

        svc.mark_read("missing").await.unwrap();
        assert_eq!(svc.unread_count("R1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unread_filter_and_scope() {
        let svc = service();
        let first = svc.create_from_order(&order("O1", "R1")).await.unwrap();
        svc.create_from_order(&order("O2", "R2")).await.unwrap();
        svc.mark_read(&first.id).await.unwrap();

        assert_eq!(svc.list_by_restaurant("R1", false).await.unwrap().len(), 1);
        assert!(svc.list_by_restaurant("R1", true).await.unwrap().is_empty());
        assert_eq!(svc.list_by_restaurant("R2", true).await.unwrap().len(), 1);
    }
}
