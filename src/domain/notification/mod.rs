//! Notification aggregate

pub mod model;
pub mod repository;

pub use model::Notification;
pub use repository::NotificationRepository;
