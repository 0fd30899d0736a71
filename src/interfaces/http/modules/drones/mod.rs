//! Drones module: fleet listing, telemetry patches and order claims

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
