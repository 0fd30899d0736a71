//! Identity module: login, registration and account state

pub mod service;

pub use service::{AuthService, LoginResult};
