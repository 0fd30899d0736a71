pub mod admin;
pub mod analytics;
pub mod auth;
pub mod cart;
pub mod drones;
pub mod health;
pub mod notifications;
pub mod orders;
pub mod payments;
pub mod products;
pub mod realtime;
pub mod request_id;
pub mod restaurants;
