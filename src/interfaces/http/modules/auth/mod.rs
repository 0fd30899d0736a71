//! Auth module: login, customer registration and the account list

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
