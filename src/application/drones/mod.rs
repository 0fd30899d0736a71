pub mod service;

pub use service::DroneService;
