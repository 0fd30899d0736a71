//! Restaurants module: read-only restaurant lookups

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
