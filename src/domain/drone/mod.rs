//! Drone aggregate

pub mod model;
pub mod repository;

pub use model::{clamp_battery, Drone, DronePatch, DroneStatus, GeoPoint, DEFAULT_POSITION};
pub use repository::DroneRepository;
