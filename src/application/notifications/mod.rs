//! Restaurant notifications

pub mod service;

pub use service::NotificationService;
