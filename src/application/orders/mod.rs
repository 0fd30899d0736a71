//! Order lifecycle

pub mod service;

pub use service::{OrderService, PatchOutcome};
