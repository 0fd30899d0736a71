//! Products and restaurants

pub mod service;

pub use service::CatalogService;
