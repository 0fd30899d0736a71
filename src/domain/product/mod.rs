//! Product aggregate

pub mod model;
pub mod repository;

pub use model::{Product, ProductPatch};
pub use repository::ProductRepository;
