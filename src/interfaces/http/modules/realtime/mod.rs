//! Realtime module: live order pipeline counters

pub mod handlers;

pub use handlers::*;
