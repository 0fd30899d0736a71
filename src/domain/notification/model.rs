//! Restaurant-facing notification
//!
//! A notification is a snapshot of an order taken when it was created.
//! Only the read flag changes afterwards.

use crate::domain::order::Order;
use crate::shared::errors::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: String,
    pub restaurant_id: String,
    pub order_id: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub total: i64,
    pub status: String,
    /// Epoch millis
    pub timestamp: i64,
    pub is_read: bool,
}

impl Notification {
    /// Snapshot `order` for its restaurant. Orders without a restaurant
    /// id fall back to the restaurant name; with neither there is nobody
    /// to notify.
    pub fn from_order(order: &Order, now: i64) -> Result<Self, DomainError> {
        let restaurant_id = order
            .restaurant_id
            .clone()
            .or_else(|| order.restaurant.clone())
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| {
                DomainError::Validation(format!("Order {} has no restaurant", order.id))
            })?;

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            restaurant_id,
            order_id: order.id.clone(),
            customer_name: order.customer_name.clone(),
            customer_phone: order.customer_phone.clone(),
            total: order.total,
            status: order.status.as_str().to_string(),
            timestamp: now,
            is_read: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderStatus;

    #[test]
    fn snapshot_copies_order_fields() {
        let mut order = Order::new("ORDER-1", 100);
        order.restaurant_id = Some("R1".into());
        order.customer_name = Some("Lan".into());
        order.status = OrderStatus::Preparing;
        order.total = 125_000;

        let n = Notification::from_order(&order, 500).unwrap();
        assert_eq!(n.restaurant_id, "R1");
        assert_eq!(n.order_id, "ORDER-1");
        assert_eq!(n.status, "In Progress");
        assert_eq!(n.total, 125_000);
        assert_eq!(n.timestamp, 500);
        assert!(!n.is_read);
    }

    #[test]
    fn falls_back_to_restaurant_name() {
        let mut order = Order::new("ORDER-2", 100);
        order.restaurant = Some("Aloha".into());
        let n = Notification::from_order(&order, 1).unwrap();
        assert_eq!(n.restaurant_id, "Aloha");
    }

    #[test]
    fn order_without_restaurant_is_rejected() {
        let order = Order::new("ORDER-3", 100);
        assert!(Notification::from_order(&order, 1).is_err());
    }
}
