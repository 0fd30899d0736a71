//! Orders module: placement, lookup and patching of customer orders

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
