//! Application layer: use cases over the domain repositories

pub mod admin;
pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod drones;
pub mod events;
pub mod identity;
pub mod notifications;
pub mod orders;
pub mod payment;

pub use admin::AdminService;
pub use analytics::AnalyticsService;
pub use cart::CartService;
pub use catalog::CatalogService;
pub use drones::DroneService;
pub use events::{create_event_bus, Event, EventBus, EventSubscriber, SharedEventBus};
pub use identity::{AuthService, LoginResult};
pub use notifications::NotificationService;
pub use orders::{OrderService, PatchOutcome};
pub use payment::VnpayService;
