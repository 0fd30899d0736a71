//! Payments module: VNPay redirect URLs

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
