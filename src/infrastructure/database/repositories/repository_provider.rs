//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::analytics::AnalyticsRepository;
use crate::domain::cart::CartRepository;
use crate::domain::drone::DroneRepository;
use crate::domain::notification::NotificationRepository;
use crate::domain::order::OrderRepository;
use crate::domain::product::ProductRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::restaurant::RestaurantRepository;
use crate::domain::user::UserRepository;

use super::analytics_repository::SeaOrmAnalyticsRepository;
use super::cart_repository::SeaOrmCartRepository;
use super::drone_repository::SeaOrmDroneRepository;
use super::notification_repository::SeaOrmNotificationRepository;
use super::order_repository::SeaOrmOrderRepository;
use super::product_repository::SeaOrmProductRepository;
use super::restaurant_repository::SeaOrmRestaurantRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let order = repos.orders().find_by_id("ORDER-1A2B3C4D5E6F").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    products: SeaOrmProductRepository,
    restaurants: SeaOrmRestaurantRepository,
    users: SeaOrmUserRepository,
    drones: SeaOrmDroneRepository,
    orders: SeaOrmOrderRepository,
    cart: SeaOrmCartRepository,
    notifications: SeaOrmNotificationRepository,
    analytics: SeaOrmAnalyticsRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            products: SeaOrmProductRepository::new(db.clone()),
            restaurants: SeaOrmRestaurantRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db.clone()),
            drones: SeaOrmDroneRepository::new(db.clone()),
            orders: SeaOrmOrderRepository::new(db.clone()),
            cart: SeaOrmCartRepository::new(db.clone()),
            notifications: SeaOrmNotificationRepository::new(db.clone()),
            analytics: SeaOrmAnalyticsRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn products(&self) -> &dyn ProductRepository {
        &self.products
    }

    fn restaurants(&self) -> &dyn RestaurantRepository {
        &self.restaurants
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn drones(&self) -> &dyn DroneRepository {
        &self.drones
    }

    fn orders(&self) -> &dyn OrderRepository {
        &self.orders
    }

    fn cart(&self) -> &dyn CartRepository {
        &self.cart
    }

    fn notifications(&self) -> &dyn NotificationRepository {
        &self.notifications
    }

    fn analytics(&self) -> &dyn AnalyticsRepository {
        &self.analytics
    }
}
