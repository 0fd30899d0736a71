//! Domain events
//!
//! Event types that represent facts about what happened in the system.
//! The EventBus implementation lives in `application::events`.

pub mod types;

pub use types::{
    restaurant_orders_topic, CartEvent, DroneEvent, Event, EventMessage, OrderEvent,
    CART_TOPIC, DRONE_TOPIC, ORDERS_TOPIC,
};
