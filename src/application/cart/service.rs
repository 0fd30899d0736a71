//! Cart service
//!
//! Every mutation returns the whole cart and broadcasts it on `cart`.

use std::sync::Arc;

use crate::application::events::SharedEventBus;
use crate::domain::events::{CartEvent, Event, CART_TOPIC};
use crate::domain::{CartItem, DomainError, DomainResult, NewCartItem, RepositoryProvider};

#[derive(Clone)]
pub struct CartService {
    repos: Arc<dyn RepositoryProvider>,
    events: SharedEventBus,
}

impl CartService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, events: SharedEventBus) -> Self {
        Self { repos, events }
    }

    pub async fn items(&self) -> DomainResult<Vec<CartItem>> {
        self.repos.cart().find_all().await
    }

    pub async fn add(&self, item: NewCartItem) -> DomainResult<Vec<CartItem>> {
        if item.quantity < 1 {
            return Err(DomainError::Validation("quantity must be at least 1".into()));
        }
        if !item.unit_price.is_finite() || item.unit_price < 0.0 {
            return Err(DomainError::Validation("unitPrice must not be negative".into()));
        }
        self.repos.cart().add(item).await?;
        self.publish().await
    }

    pub async fn remove(&self, id: i64) -> DomainResult<Vec<CartItem>> {
        if !self.repos.cart().delete(id).await? {
            return Err(DomainError::not_found("CartItem", id.to_string()));
        }
        self.publish().await
    }

    pub async fn clear(&self) -> DomainResult<Vec<CartItem>> {
        self.repos.cart().clear().await?;
        self.publish().await
    }

    async fn publish(&self) -> DomainResult<Vec<CartItem>> {
        let items = self.items().await?;
        self.events.publish(
            CART_TOPIC,
            Event::CartUpdated(CartEvent {
                items: items.clone(),
            }),
        );
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::create_event_bus;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn line(quantity: i32) -> NewCartItem {
        NewCartItem {
            product_id: 7,
            product_name: "Pizza Hawaii".into(),
            unit_price: 89_000.0,
            quantity,
            restaurant_code: "Aloha".into(),
        }
    }

    #[tokio::test]
    async fn add_remove_clear_broadcast_full_cart() {
        let events = create_event_bus();
        let svc = CartService::new(Arc::new(InMemoryRepositoryProvider::new()), events.clone());
        let mut sub = events.subscribe();

        let cart = svc.add(line(2)).await.unwrap();
        assert_eq!(cart.len(), 1);
        let msg = sub.recv().await.unwrap();
        assert_eq!(msg.topic, "cart");

        svc.add(line(1)).await.unwrap();
        let cart = svc.remove(cart[0].id).await.unwrap();
        assert_eq!(cart.len(), 1);

        assert!(matches!(svc.remove(999).await, Err(DomainError::NotFound { .. })));
        assert!(svc.clear().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected() {
        let svc = CartService::new(Arc::new(InMemoryRepositoryProvider::new()), create_event_bus());
        assert!(matches!(svc.add(line(0)).await, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn negative_or_nan_price_is_rejected() {
        let svc = CartService::new(Arc::new(InMemoryRepositoryProvider::new()), create_event_bus());
        for price in [-1.0, f64::NAN, f64::INFINITY] {
            let item = NewCartItem {
                unit_price: price,
                ..line(1)
            };
            assert!(matches!(svc.add(item).await, Err(DomainError::Validation(_))));
        }
        assert!(svc.items().await.unwrap().is_empty());

        let free = NewCartItem {
            unit_price: 0.0,
            ..line(1)
        };
        assert_eq!(svc.add(free).await.unwrap().len(), 1);
    }
}
