//! Domain layer
//!
//! Aggregates, their invariants and the repository traits that persist
//! them. Nothing in here knows about HTTP or the database engine.

pub mod analytics;
pub mod cart;
pub mod drone;
pub mod events;
pub mod notification;
pub mod order;
pub mod product;
pub mod repositories;
pub mod restaurant;
pub mod user;

pub use analytics::{AnalyticsPeriod, AnalyticsRepository, AnalyticsSnapshot, RestaurantOverview};
pub use cart::{CartItem, CartRepository, NewCartItem};
pub use drone::{Drone, DronePatch, DroneRepository, DroneStatus, GeoPoint};
pub use notification::{Notification, NotificationRepository};
pub use order::{Order, OrderRepository, OrderStatus};
pub use product::{Product, ProductPatch, ProductRepository};
pub use repositories::{DomainResult, RepositoryProvider};
pub use restaurant::{Restaurant, RestaurantRepository, ThemeColors};
pub use user::{User, UserRepository, UserRole};

pub use crate::shared::errors::DomainError;
