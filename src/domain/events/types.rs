//! Realtime events
//!
//! Facts pushed to dashboards over the broadcast channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::cart::CartItem;
use crate::domain::drone::{Drone, GeoPoint};
use crate::domain::order::{Order, OrderStatus};

/// Topic carrying every order event.
pub const ORDERS_TOPIC: &str = "orders";
pub const DRONE_TOPIC: &str = "drone";
pub const CART_TOPIC: &str = "cart";

/// Per-restaurant order topic, e.g. `orders/SweetDreams`.
pub fn restaurant_orders_topic(restaurant_id: &str) -> String {
    format!("{}/{}", ORDERS_TOPIC, restaurant_id)
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    OrderCreated(OrderEvent),
    OrderUpdated(OrderEvent),
    DroneUpdated(DroneEvent),
    CartUpdated(CartEvent),
}

impl Event {
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::OrderCreated(_) => "order_created",
            Event::OrderUpdated(_) => "order_updated",
            Event::DroneUpdated(_) => "drone_updated",
            Event::CartUpdated(_) => "cart_updated",
        }
    }

    pub fn restaurant_id(&self) -> Option<&str> {
        match self {
            Event::OrderCreated(e) | Event::OrderUpdated(e) => e.restaurant_id.as_deref(),
            Event::DroneUpdated(e) => Some(&e.restaurant_id),
            Event::CartUpdated(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEvent {
    pub order_id: String,
    pub restaurant_id: Option<String>,
    pub restaurant: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub status: OrderStatus,
    pub total: i64,
    pub drone_id: Option<String>,
    pub drone_path: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&Order> for OrderEvent {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id.clone(),
            restaurant_id: order.restaurant_id.clone(),
            restaurant: order.restaurant.clone(),
            customer_name: order.customer_name.clone(),
            customer_phone: order.customer_phone.clone(),
            status: order.status,
            total: order.total,
            drone_id: order.drone_id.clone(),
            drone_path: order.drone_path.clone(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroneEvent {
    pub drone_id: String,
    pub restaurant_id: String,
    /// Client label, `delivering` or `returning`
    pub status: String,
    pub battery: i32,
    pub current_order_id: Option<String>,
    pub position: GeoPoint,
    pub updated_at: Option<i64>,
}

impl From<&Drone> for DroneEvent {
    fn from(drone: &Drone) -> Self {
        Self {
            drone_id: drone.id.clone(),
            restaurant_id: drone.restaurant_id.clone(),
            status: drone.status.client_label().to_string(),
            battery: drone.battery(),
            current_order_id: drone.current_order_id().map(String::from),
            position: drone.position_or_default(),
            updated_at: drone.updated_at,
        }
    }
}

/// The whole cart after a change
#[derive(Debug, Clone, Serialize)]
pub struct CartEvent {
    pub items: Vec<CartItem>,
}

/// Envelope sent to subscribers
#[derive(Debug, Clone, Serialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub topic: String,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(topic: impl Into<String>, event: Event) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            topic: topic.into(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_tagged_and_flattened() {
        let mut order = Order::new("ORDER-1", 5);
        order.restaurant_id = Some("R1".into());
        let msg = EventMessage::new(
            restaurant_orders_topic("R1"),
            Event::OrderCreated(OrderEvent::from(&order)),
        );
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["topic"], "orders/R1");
        assert_eq!(json["type"], "OrderCreated");
        assert_eq!(json["data"]["orderId"], "ORDER-1");
        assert_eq!(json["data"]["status"], "Pending");
    }

    #[test]
    fn drone_event_uses_client_label_and_default_position() {
        let drone = Drone::new("D1", "R1");
        let event = DroneEvent::from(&drone);
        assert_eq!(event.status, "returning");
        assert_eq!(event.position, crate::domain::drone::DEFAULT_POSITION);
    }
}
