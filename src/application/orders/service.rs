//! Order lifecycle manager
//!
//! Creates orders, applies status and field patches, and drives the
//! side effects: realtime broadcasts and restaurant notifications.
//! Notification failures are logged and never fail the request.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::events::SharedEventBus;
use crate::application::notifications::NotificationService;
use crate::domain::events::{restaurant_orders_topic, Event, OrderEvent, ORDERS_TOPIC};
use crate::domain::order::{NewOrder, OrderFieldsPatch, OrderFilter, OrderStatus};
use crate::domain::{DomainError, DomainResult, Order, RepositoryProvider};
use crate::shared::time::now_millis;

/// Result of a PATCH on an order
#[derive(Debug)]
pub enum PatchOutcome {
    Updated(Order),
    /// Nothing recognised in the request; nothing persisted
    Unchanged,
}

#[derive(Clone)]
pub struct OrderService {
    repos: Arc<dyn RepositoryProvider>,
    events: SharedEventBus,
    notifications: NotificationService,
    renotify_on_status_change: bool,
}

impl OrderService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        events: SharedEventBus,
        notifications: NotificationService,
        renotify_on_status_change: bool,
    ) -> Self {
        Self {
            repos,
            events,
            notifications,
            renotify_on_status_change,
        }
    }

    // ── Commands ────────────────────────────────────────────────

    /// Persist a new order with its items, then broadcast and notify.
    pub async fn create(&self, request: NewOrder) -> DomainResult<Order> {
        let order = request.into_order(now_millis())?;
        let order = self.repos.orders().create(order).await?;

        info!(
            order_id = %order.id,
            restaurant_id = ?order.restaurant_id,
            total = order.total,
            items = order.items.len(),
            "Order created"
        );

        self.broadcast(Event::OrderCreated(OrderEvent::from(&order)), &order);
        self.notify(&order).await;
        Ok(order)
    }

    /// Apply an optional status change plus any field patch in one write.
    ///
    /// The status token is validated before anything is modified.
    pub async fn patch(
        &self,
        id: &str,
        status: Option<&str>,
        fields: OrderFieldsPatch,
    ) -> DomainResult<PatchOutcome> {
        let mut order = self.get(id).await?;

        let status = status
            .map(|raw| {
                OrderStatus::parse(raw)
                    .ok_or_else(|| DomainError::Validation(format!("Invalid status: {}", raw)))
            })
            .transpose()?;

        if status.is_none() && fields.is_empty() {
            return Ok(PatchOutcome::Unchanged);
        }

        let now = now_millis();
        if let Some(status) = status {
            order.set_status(status, now);
        }
        fields.apply(&mut order, now);

        self.repos.orders().update(&order).await?;
        info!(order_id = %order.id, status = %order.status, "Order updated");

        self.broadcast(Event::OrderUpdated(OrderEvent::from(&order)), &order);
        if status.is_some() && self.renotify_on_status_change {
            self.notify(&order).await;
        }
        Ok(PatchOutcome::Updated(order))
    }

    pub async fn patch_status(&self, id: &str, status: &str) -> DomainResult<Order> {
        match self.patch(id, Some(status), OrderFieldsPatch::default()).await? {
            PatchOutcome::Updated(order) => Ok(order),
            PatchOutcome::Unchanged => self.get(id).await,
        }
    }

    pub async fn patch_fields(&self, id: &str, fields: OrderFieldsPatch) -> DomainResult<PatchOutcome> {
        self.patch(id, None, fields).await
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get(&self, id: &str) -> DomainResult<Order> {
        self.repos
            .orders()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Order", id))
    }

    pub async fn query(&self, filter: &OrderFilter) -> DomainResult<Vec<Order>> {
        self.repos.orders().find(&filter.resolve()).await
    }

    // ── Side effects ────────────────────────────────────────────

    fn broadcast(&self, event: Event, order: &Order) {
        if let Some(restaurant_id) = order.restaurant_id.as_deref() {
            self.events
                .publish(&restaurant_orders_topic(restaurant_id), event.clone());
        }
        self.events.publish(ORDERS_TOPIC, event);
    }

    async fn notify(&self, order: &Order) {
        if let Err(e) = self.notifications.create_from_order(order).await {
            warn!(order_id = %order.id, error = %e, "Failed to create notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::{create_event_bus, topic_matches};
    use crate::domain::order::NewOrderItem;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    struct Fixture {
        repos: Arc<InMemoryRepositoryProvider>,
        events: SharedEventBus,
        service: OrderService,
    }

    fn fixture(renotify: bool) -> Fixture {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let events = create_event_bus();
        let service = OrderService::new(
            repos.clone(),
            events.clone(),
            NotificationService::new(repos.clone()),
            renotify,
        );
        Fixture {
            repos,
            events,
            service,
        }
    }

    fn request(restaurant_id: Option<&str>) -> NewOrder {
        NewOrder {
            customer_name: Some("Lan".into()),
            customer_phone: Some("0901234567".into()),
            restaurant_id: restaurant_id.map(String::from),
            items: vec![
                NewOrderItem {
                    name: Some("A".into()),
                    quantity: Some(2),
                    price: 50_000,
                    ..Default::default()
                },
                NewOrderItem {
                    name: Some("B".into()),
                    qty: Some(0),
                    quantity: Some(0),
                    price: 1_000,
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_computes_total_and_notifies() {
        let f = fixture(true);
        let order = f.service.create(request(Some("R1"))).await.unwrap();

        // B falls back to qty 1 so it counts: 100_000 + 1_000
        assert_eq!(order.total, 15_000 + 101_000 + 10_100);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(f.repos.notifications().count_unread("R1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn create_broadcasts_on_both_topics() {
        let f = fixture(true);
        let mut sub = f.events.subscribe();
        f.service.create(request(Some("R1"))).await.unwrap();

        let first = sub.recv().await.unwrap();
        let second = sub.recv().await.unwrap();
        let topics = [first.topic, second.topic];
        assert!(topics.contains(&"orders".to_string()));
        assert!(topics.contains(&"orders/R1".to_string()));
        assert!(topics.iter().all(|t| topic_matches("orders", t)));
    }

    #[tokio::test]
    async fn notification_failure_does_not_fail_create() {
        let f = fixture(true);
        let order = f.service.create(request(None)).await.unwrap();
        assert!(f.service.get(&order.id).await.is_ok());
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let f = fixture(true);
        let mut req = request(Some("R1"));
        req.id = Some("ORDER-FIXED".into());
        f.service.create(req.clone()).await.unwrap();
        let err = f.service.create(req).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn patch_status_validates_and_renotifies() {
        let f = fixture(true);
        let order = f.service.create(request(Some("R1"))).await.unwrap();

        let err = f.service.patch_status(&order.id, "teleported").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let updated = f.service.patch_status(&order.id, "in_progress").await.unwrap();
        assert_eq!(updated.status, OrderStatus::Preparing);
        assert!(updated.updated_at >= updated.created_at);
        assert_eq!(f.repos.notifications().count_unread("R1").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn renotify_can_be_disabled() {
        let f = fixture(false);
        let order = f.service.create(request(Some("R1"))).await.unwrap();
        f.service.patch_status(&order.id, "Ready").await.unwrap();
        assert_eq!(f.repos.notifications().count_unread("R1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn patch_unknown_order_is_not_found() {
        let f = fixture(true);
        let err = f.service.patch_status("nope", "Ready").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn empty_field_patch_is_unchanged() {
        let f = fixture(true);
        let order = f.service.create(request(Some("R1"))).await.unwrap();
        let outcome = f
            .service
            .patch_fields(&order.id, OrderFieldsPatch::default())
            .await
            .unwrap();
        assert!(matches!(outcome, PatchOutcome::Unchanged));
    }

    #[tokio::test]
    async fn field_patch_keeps_items_and_total() {
        let f = fixture(true);
        let order = f.service.create(request(Some("R1"))).await.unwrap();
        let patch = OrderFieldsPatch {
            drone_path: Some(vec!["A".into(), "B".into()]),
            confirmed_at: Some(42),
            ..Default::default()
        };
        f.service.patch_fields(&order.id, patch).await.unwrap();

        let stored = f.service.get(&order.id).await.unwrap();
        assert_eq!(stored.drone_path, vec!["A", "B"]);
        assert_eq!(stored.confirmed_at, Some(42));
        assert_eq!(stored.items.len(), 2);
        assert_eq!(stored.total, order.total);
    }

    #[tokio::test]
    async fn payment_session_query_ignores_other_filters() {
        let f = fixture(true);
        let mut req = request(Some("R1"));
        req.payment_session_id = Some("PS-1".into());
        f.service.create(req).await.unwrap();
        f.service.create(request(Some("R1"))).await.unwrap();

        let filter = OrderFilter {
            payment_session_id: Some("PS-1".into()),
            phone: Some("nomatch".into()),
            restaurant_id: Some("R9".into()),
        };
        assert_eq!(f.service.query(&filter).await.unwrap().len(), 1);
    }
}
