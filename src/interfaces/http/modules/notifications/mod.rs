//! Notifications module: restaurant inbox

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
