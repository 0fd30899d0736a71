//! WebSocket stream of realtime events for dashboards
//!
//! `GET /ws?topics=orders,drone` subscribes to the event bus and forwards
//! every message whose topic matches one of the filters. A filter matches
//! its own topic and any sub-topic, so `orders` also delivers
//! `orders/SweetDreams`. Without `topics` everything is forwarded.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::select;
use tracing::{debug, error, info, warn};

use crate::application::events::{topic_matches, EventMessage, SharedEventBus};

/// Query parameters of the upgrade request
#[derive(Debug, Default, Deserialize)]
pub struct TopicFilter {
    /// Comma-separated topic filters
    pub topics: Option<String>,
}

impl TopicFilter {
    pub fn topics(&self) -> Vec<String> {
        self.topics
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Whether `message` passes `filters`; an empty filter list passes all.
pub fn accepts(filters: &[String], message: &EventMessage) -> bool {
    filters.is_empty() || filters.iter().any(|f| topic_matches(f, &message.topic))
}

/// State for the realtime WebSocket handler
#[derive(Clone)]
pub struct RealtimeSocketState {
    pub event_bus: SharedEventBus,
}

pub async fn ws_events_handler(
    ws: WebSocketUpgrade,
    State(state): State<RealtimeSocketState>,
    Query(filter): Query<TopicFilter>,
) -> impl IntoResponse {
    let topics = filter.topics();
    info!(topics = ?topics, "New realtime WebSocket connection");

    ws.on_upgrade(move |socket| handle_socket(socket, state, topics))
}

async fn handle_socket(socket: WebSocket, state: RealtimeSocketState, topics: Vec<String>) {
    let (mut sender, mut receiver) = socket.split();
    let mut subscriber = state.event_bus.subscribe();

    let welcome = serde_json::json!({
        "type": "connected",
        "message": "Connected to realtime stream",
        "topics": topics,
    });

    if let Err(e) = sender
        .send(Message::Text(welcome.to_string().into()))
        .await
    {
        error!(error = %e, "Failed to send welcome message");
        return;
    }

    loop {
        select! {
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if let Err(e) = sender.send(Message::Pong(data)).await {
                            error!(error = %e, "Failed to send pong");
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("Realtime client closed the stream");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "WebSocket error");
                        break;
                    }
                    // Clients are listeners; anything else they send is ignored.
                    Some(Ok(_)) => {}
                }
            }

            event = subscriber.recv() => {
                let Some(event_msg) = event else {
                    warn!("Event bus closed");
                    break;
                };
                if !accepts(&topics, &event_msg) {
                    continue;
                }
                match serde_json::to_string(&event_msg) {
                    Ok(json) => {
                        if let Err(e) = sender.send(Message::Text(json.into())).await {
                            debug!(error = %e, "Failed to forward event");
                            break;
                        }
                    }
                    Err(e) => error!(error = %e, "Failed to serialize event"),
                }
            }
        }
    }

    info!("Realtime WebSocket client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::{CartEvent, Event};

    fn message(topic: &str) -> EventMessage {
        EventMessage::new(topic, Event::CartUpdated(CartEvent { items: vec![] }))
    }

    #[test]
    fn topics_are_split_and_trimmed() {
        let filter = TopicFilter {
            topics: Some(" orders, drone,,".into()),
        };
        assert_eq!(filter.topics(), vec!["orders", "drone"]);
        assert!(TopicFilter::default().topics().is_empty());
    }

    #[test]
    fn parent_topic_receives_restaurant_scoped_events() {
        let filters = vec!["orders".to_string()];
        assert!(accepts(&filters, &message("orders/SweetDreams")));
        assert!(accepts(&filters, &message("orders")));
        assert!(!accepts(&filters, &message("drone")));
    }

    #[test]
    fn no_filter_accepts_everything() {
        assert!(accepts(&[], &message("cart")));
    }
}
