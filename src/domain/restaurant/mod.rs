//! Restaurant aggregate

pub mod model;
pub mod repository;

pub use model::{Restaurant, ThemeColors};
pub use repository::RestaurantRepository;
