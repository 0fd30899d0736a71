pub mod model;
pub mod repository;

pub use model::{CartItem, NewCartItem};
pub use repository::CartRepository;
