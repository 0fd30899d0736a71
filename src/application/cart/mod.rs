pub mod service;

pub use service::CartService;
