//! Admin module: back-office reporting and moderation (admin token required)

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
