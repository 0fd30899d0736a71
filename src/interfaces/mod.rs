//! Interfaces layer: HTTP API and WebSocket stream

pub mod http;
pub mod ws;
