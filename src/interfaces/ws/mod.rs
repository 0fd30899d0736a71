//! WebSocket interfaces
//!
//! - `notifications`: realtime event stream for dashboards

pub mod notifications;

pub use notifications::{ws_events_handler, RealtimeSocketState};
