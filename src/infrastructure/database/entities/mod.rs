//! Database entities module

pub mod analytics_snapshot;
pub mod cart_item;
pub mod drone;
pub mod notification;
pub mod order;
pub mod order_item;
pub mod product;
pub mod restaurant;
pub mod user;

pub use analytics_snapshot::Entity as AnalyticsSnapshot;
pub use cart_item::Entity as CartItem;
pub use drone::Entity as Drone;
pub use notification::Entity as Notification;
pub use order::Entity as Order;
pub use order_item::Entity as OrderItem;
pub use product::Entity as Product;
pub use restaurant::Entity as Restaurant;
pub use user::Entity as User;
