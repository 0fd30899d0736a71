//! In-memory repositories backed by `DashMap`

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::analytics::{AnalyticsRepository, AnalyticsSnapshot};
use crate::domain::cart::{CartItem, CartRepository, NewCartItem};
use crate::domain::drone::{Drone, DroneRepository};
use crate::domain::notification::{Notification, NotificationRepository};
use crate::domain::order::{Order, OrderQuery, OrderRepository};
use crate::domain::product::{Product, ProductRepository};
use crate::domain::restaurant::{Restaurant, RestaurantRepository};
use crate::domain::user::{User, UserRepository, UserRole};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// Every repository in one struct, for service tests.
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    products: DashMap<String, Product>,
    restaurants: DashMap<String, Restaurant>,
    users: DashMap<String, User>,
    drones: DashMap<String, Drone>,
    orders: DashMap<String, Order>,
    cart: DashMap<i64, CartItem>,
    notifications: DashMap<String, Notification>,
    analytics: DashMap<String, AnalyticsSnapshot>,
    cart_counter: AtomicI64,
    item_counter: AtomicI64,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of analytics snapshots written so far.
    pub fn analytics_len(&self) -> usize {
        self.analytics.len()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn products(&self) -> &dyn ProductRepository {
        self
    }
    fn restaurants(&self) -> &dyn RestaurantRepository {
        self
    }
    fn users(&self) -> &dyn UserRepository {
        self
    }
    fn drones(&self) -> &dyn DroneRepository {
        self
    }
    fn orders(&self) -> &dyn OrderRepository {
        self
    }
    fn cart(&self) -> &dyn CartRepository {
        self
    }
    fn notifications(&self) -> &dyn NotificationRepository {
        self
    }
    fn analytics(&self) -> &dyn AnalyticsRepository {
        self
    }
}

fn eq_ci(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

// ── Products ────────────────────────────────────────────────────

#[async_trait]
impl ProductRepository for InMemoryRepositoryProvider {
    async fn find_all(&self) -> DomainResult<Vec<Product>> {
        let mut all: Vec<Product> = self.products.iter().map(|p| p.value().clone()).collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_by_restaurant(&self, restaurant: &str) -> DomainResult<Vec<Product>> {
        let all = ProductRepository::find_all(self).await?;
        Ok(all.into_iter().filter(|p| p.sells_at(restaurant)).collect())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Product>> {
        Ok(self.products.get(id).map(|p| p.value().clone()))
    }

    async fn save(&self, product: &Product) -> DomainResult<()> {
        self.products.insert(product.id.clone(), product.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        Ok(self.products.remove(id).is_some())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.products.len() as u64)
    }
}

// ── Restaurants ─────────────────────────────────────────────────

#[async_trait]
impl RestaurantRepository for InMemoryRepositoryProvider {
    async fn find_all(&self) -> DomainResult<Vec<Restaurant>> {
        let mut all: Vec<Restaurant> = self.restaurants.iter().map(|r| r.value().clone()).collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn find_active(&self) -> DomainResult<Vec<Restaurant>> {
        let all = RestaurantRepository::find_all(self).await?;
        Ok(all.into_iter().filter(|r| r.is_active).collect())
    }

    async fn find_by_category(&self, category: &str) -> DomainResult<Vec<Restaurant>> {
        let all = RestaurantRepository::find_all(self).await?;
        Ok(all.into_iter().filter(|r| r.in_category(category)).collect())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Restaurant>> {
        Ok(self.restaurants.get(id).map(|r| r.value().clone()))
    }

    async fn find_by_owner(&self, owner_id: &str) -> DomainResult<Option<Restaurant>> {
        Ok(self
            .restaurants
            .iter()
            .find(|r| r.owner_id.as_deref() == Some(owner_id))
            .map(|r| r.value().clone()))
    }

    async fn save(&self, restaurant: &Restaurant) -> DomainResult<()> {
        self.restaurants.insert(restaurant.id.clone(), restaurant.clone());
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.restaurants.len() as u64)
    }
}

// ── Users ───────────────────────────────────────────────────────

#[async_trait]
impl UserRepository for InMemoryRepositoryProvider {
    async fn create(&self, user: &User) -> DomainResult<()> {
        let clash = self.users.iter().any(|u| {
            u.username == user.username
                || (user.email.is_some() && u.email == user.email)
                || (user.phone.is_some() && u.phone == user.phone)
        });
        if clash {
            return Err(DomainError::Conflict(format!("User {} already exists", user.username)));
        }
        match self.users.entry(user.id.clone()) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!("User {} already exists", user.id))),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(())
            }
        }
    }

    async fn update(&self, user: &User) -> DomainResult<()> {
        match self.users.get_mut(&user.id) {
            Some(mut existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("User", user.id.clone())),
        }
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let mut all: Vec<User> = self.users.iter().map(|u| u.value().clone()).collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email.as_deref() == Some(email))
            .map(|u| u.value().clone()))
    }

    async fn find_by_phone(&self, phone: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.phone.as_deref() == Some(phone))
            .map(|u| u.value().clone()))
    }

    async fn find_by_role(&self, role: UserRole) -> DomainResult<Vec<User>> {
        let all = UserRepository::find_all(self).await?;
        Ok(all.into_iter().filter(|u| u.role == role).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.users.len() as u64)
    }
}

// ── Drones ──────────────────────────────────────────────────────

#[async_trait]
impl DroneRepository for InMemoryRepositoryProvider {
    async fn find_all(&self) -> DomainResult<Vec<Drone>> {
        let mut all: Vec<Drone> = self.drones.iter().map(|d| d.value().clone()).collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Drone>> {
        Ok(self.drones.get(id).map(|d| d.value().clone()))
    }

    async fn find_by_restaurant(&self, restaurant_id: &str) -> DomainResult<Vec<Drone>> {
        let all = DroneRepository::find_all(self).await?;
        Ok(all
            .into_iter()
            .filter(|d| eq_ci(&d.restaurant_id, restaurant_id))
            .collect())
    }

    async fn save(&self, drone: &Drone) -> DomainResult<()> {
        self.drones.insert(drone.id.clone(), drone.clone());
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.drones.len() as u64)
    }
}

// ── Orders ──────────────────────────────────────────────────────

#[async_trait]
impl OrderRepository for InMemoryRepositoryProvider {
    async fn create(&self, mut order: Order) -> DomainResult<Order> {
        match self.orders.entry(order.id.clone()) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "Order {} already exists",
                order.id
            ))),
            Entry::Vacant(slot) => {
                for item in order.items.iter_mut() {
                    item.id = Some(self.item_counter.fetch_add(1, Ordering::SeqCst) + 1);
                }
                slot.insert(order.clone());
                Ok(order)
            }
        }
    }

    async fn update(&self, order: &Order) -> DomainResult<()> {
        match self.orders.get_mut(&order.id) {
            Some(mut existing) => {
                let items = std::mem::take(&mut existing.items);
                *existing = Order {
                    items,
                    ..order.clone()
                };
                Ok(())
            }
            None => Err(DomainError::not_found("Order", order.id.clone())),
        }
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Order>> {
        Ok(self.orders.get(id).map(|o| o.value().clone()))
    }

    async fn find(&self, query: &OrderQuery) -> DomainResult<Vec<Order>> {
        let mut found: Vec<Order> = self
            .orders
            .iter()
            .filter(|o| query.matches(o.value()))
            .map(|o| o.value().clone())
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn find_by_restaurant_created_after(
        &self,
        restaurant_id: &str,
        after_millis: i64,
    ) -> DomainResult<Vec<Order>> {
        let found = self.find(&OrderQuery::Restaurant(restaurant_id.to_string())).await?;
        Ok(found
            .into_iter()
            .filter(|o| o.created_at > after_millis)
            .collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.orders.len() as u64)
    }
}

// ── Cart ────────────────────────────────────────────────────────

#[async_trait]
impl CartRepository for InMemoryRepositoryProvider {
    async fn find_all(&self) -> DomainResult<Vec<CartItem>> {
        let mut all: Vec<CartItem> = self.cart.iter().map(|c| c.value().clone()).collect();
        all.sort_by_key(|c| c.id);
        Ok(all)
    }

    async fn add(&self, item: NewCartItem) -> DomainResult<CartItem> {
        let id = self.cart_counter.fetch_add(1, Ordering::SeqCst) + 1;
        let item = item.with_id(id);
        self.cart.insert(id, item.clone());
        Ok(item)
    }

    async fn delete(&self, id: i64) -> DomainResult<bool> {
        Ok(self.cart.remove(&id).is_some())
    }

    async fn clear(&self) -> DomainResult<()> {
        self.cart.clear();
        Ok(())
    }
}

// ── Notifications ───────────────────────────────────────────────

#[async_trait]
impl NotificationRepository for InMemoryRepositoryProvider {
    async fn save(&self, notification: &Notification) -> DomainResult<()> {
        self.notifications
            .insert(notification.id.clone(), notification.clone());
        Ok(())
    }

    async fn find_by_restaurant(
        &self,
        restaurant_id: &str,
        unread_only: bool,
    ) -> DomainResult<Vec<Notification>> {
        let mut found: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|n| n.restaurant_id == restaurant_id && (!unread_only || !n.is_read))
            .map(|n| n.value().clone())
            .collect();
        found.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(found)
    }

    async fn mark_read(&self, id: &str) -> DomainResult<bool> {
        match self.notifications.get_mut(id) {
            Some(mut n) => {
                n.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_unread(&self, restaurant_id: &str) -> DomainResult<u64> {
        Ok(self
            .notifications
            .iter()
            .filter(|n| n.restaurant_id == restaurant_id && !n.is_read)
            .count() as u64)
    }
}

// ── Analytics ───────────────────────────────────────────────────

#[async_trait]
impl AnalyticsRepository for InMemoryRepositoryProvider {
    async fn save(&self, snapshot: &AnalyticsSnapshot) -> DomainResult<()> {
        self.analytics.insert(snapshot.id.clone(), snapshot.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_order_id_is_a_conflict() {
        let repos = InMemoryRepositoryProvider::new();
        repos.orders().create(Order::new("O1", 1)).await.unwrap();
        let err = repos.orders().create(Order::new("O1", 2)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(repos.orders().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn cart_ids_increment() {
        let repos = InMemoryRepositoryProvider::new();
        let line = || NewCartItem {
            product_id: 1,
            product_name: "Donut".into(),
            unit_price: 25_000.0,
            quantity: 1,
            restaurant_code: "SweetDreams".into(),
        };
        let a = repos.cart().add(line()).await.unwrap();
        let b = repos.cart().add(line()).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert!(repos.cart().delete(1).await.unwrap());
        assert!(!repos.cart().delete(1).await.unwrap());
        assert_eq!(repos.cart().find_all().await.unwrap().len(), 1);
    }
}
