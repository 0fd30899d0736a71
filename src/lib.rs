//! # FoodFast
//!
//! Backend for a drone food-delivery platform: product catalog, orders,
//! a shared cart, restaurant notifications, drone fleet, analytics and
//! VNPay payment links, plus a realtime event stream for dashboards.
//!
//! ## Architecture
//!
//! - **domain**: entities, their rules and the repository traits
//! - **application**: services (use cases) and the event bus
//! - **infrastructure**: SeaORM storage, in-memory storage, crypto
//! - **interfaces**: REST API with Swagger docs and the `/ws` stream
//! - **server**: startup, seeding and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

pub use interfaces::http::{create_api_router, ApiContext};

pub use application::events::{create_event_bus, EventBus, SharedEventBus};
