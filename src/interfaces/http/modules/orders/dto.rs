//! Order DTOs
//!
//! Web and mobile clients disagree on a few key names (`name` vs
//! `customerName`, `qty` vs `quantity`), so requests accept both and
//! responses carry both where the clients read both.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::order::{NewOrder, NewOrderItem, OrderFieldsPatch, OrderFilter, OrderItem};
use crate::domain::Order;

// ── Responses ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub id: Option<String>,
    pub product_id: Option<String>,
    pub name: String,
    pub qty: i32,
    pub quantity: i32,
    pub price: i64,
    pub product_name: Option<String>,
}

impl From<OrderItem> for OrderItemDto {
    fn from(i: OrderItem) -> Self {
        Self {
            id: i.id.map(|id| id.to_string()),
            product_id: i.product_id,
            name: i.name,
            qty: i.qty,
            quantity: i.qty,
            price: i.price,
            product_name: i.product_name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: String,
    /// Customer name
    pub name: Option<String>,
    /// Customer phone
    pub phone: Option<String>,
    pub customer_email: Option<String>,
    pub address: Option<String>,
    pub restaurant: Option<String>,
    pub restaurant_id: Option<String>,
    pub user_id: Option<String>,
    pub payment_session_id: Option<String>,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
    pub note: Option<String>,
    pub internal_notes: Option<String>,
    pub drone_id: Option<String>,
    pub drone_path: Vec<String>,
    pub vnpay_transaction_id: Option<String>,
    pub confirmed_at: Option<i64>,
    pub cancelled_at: Option<i64>,
    pub confirmed_by: Option<String>,
    /// Client label, e.g. `Pending` or `In Progress`
    pub status: String,
    pub total: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub items: Vec<OrderItemDto>,
}

impl From<Order> for OrderDto {
    fn from(o: Order) -> Self {
        Self {
            status: o.status.as_str().to_string(),
            id: o.id,
            name: o.customer_name,
            phone: o.customer_phone,
            customer_email: o.customer_email,
            address: o.address,
            restaurant: o.restaurant,
            restaurant_id: o.restaurant_id,
            user_id: o.user_id,
            payment_session_id: o.payment_session_id,
            payment_method: o.payment_method,
            payment_status: o.payment_status,
            note: o.note,
            internal_notes: o.internal_notes,
            drone_id: o.drone_id,
            drone_path: o.drone_path,
            vnpay_transaction_id: o.vnpay_transaction_id,
            confirmed_at: o.confirmed_at,
            cancelled_at: o.cancelled_at,
            confirmed_by: o.confirmed_by,
            total: o.total,
            created_at: o.created_at,
            updated_at: o.updated_at,
            items: o.items.into_iter().map(OrderItemDto::from).collect(),
        }
    }
}

// ── Requests ───────────────────────────────────────────────────

// Product ids arrive as strings from the web client and as numbers from
// the mobile app.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItemRequest {
    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(value_type = Option<String>)]
    pub product_id: Option<String>,
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub qty: Option<i32>,
    #[serde(default)]
    pub price: i64,
    pub product_name: Option<String>,
}

impl From<CreateOrderItemRequest> for NewOrderItem {
    fn from(r: CreateOrderItemRequest) -> Self {
        Self {
            product_id: r.product_id,
            name: r.name.or_else(|| r.product_name.clone()),
            quantity: r.quantity,
            qty: r.qty,
            price: r.price,
            product_name: r.product_name,
        }
    }
}

/// New order. Any client-sent `total` is ignored; the server computes it.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub id: Option<String>,
    #[serde(alias = "customerName")]
    pub name: Option<String>,
    #[serde(alias = "customerPhone")]
    pub phone: Option<String>,
    pub customer_email: Option<String>,
    pub address: Option<String>,
    pub restaurant: Option<String>,
    pub restaurant_id: Option<String>,
    pub user_id: Option<String>,
    pub payment_session_id: Option<String>,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
    pub note: Option<String>,
    pub drone_id: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
    #[serde(default)]
    pub items: Vec<CreateOrderItemRequest>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(r: CreateOrderRequest) -> Self {
        Self {
            id: r.id,
            customer_name: r.name,
            customer_phone: r.phone,
            customer_email: r.customer_email,
            address: r.address,
            restaurant: r.restaurant,
            restaurant_id: r.restaurant_id,
            user_id: r.user_id,
            payment_session_id: r.payment_session_id,
            payment_method: r.payment_method,
            payment_status: r.payment_status,
            note: r.note,
            drone_id: r.drone_id,
            status: r.status,
            created_at: r.created_at,
            updated_at: r.updated_at,
            items: r.items.into_iter().map(NewOrderItem::from).collect(),
        }
    }
}

/// Partial order update. Unknown keys are rejected.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderPatchRequest {
    pub status: Option<String>,
    pub confirmed_at: Option<i64>,
    pub cancelled_at: Option<i64>,
    pub internal_notes: Option<String>,
    pub confirmed_by: Option<String>,
    pub drone_path: Option<Vec<String>>,
    pub vnpay_transaction_id: Option<String>,
}

impl OrderPatchRequest {
    pub fn split(self) -> (Option<String>, OrderFieldsPatch) {
        (
            self.status,
            OrderFieldsPatch {
                confirmed_at: self.confirmed_at,
                cancelled_at: self.cancelled_at,
                internal_notes: self.internal_notes,
                confirmed_by: self.confirmed_by,
                drone_path: self.drone_path,
                vnpay_transaction_id: self.vnpay_transaction_id,
            },
        )
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct OrderListParams {
    /// Wins over every other filter
    pub payment_session_id: Option<String>,
    /// Substring match on the customer phone
    pub phone: Option<String>,
    #[serde(alias = "restaurantId")]
    pub restaurant: Option<String>,
}

impl From<OrderListParams> for OrderFilter {
    fn from(p: OrderListParams) -> Self {
        Self {
            payment_session_id: p.payment_session_id,
            phone: p.phone,
            restaurant_id: p.restaurant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_both_key_styles() {
        let web: CreateOrderRequest = serde_json::from_str(
            r#"{"name": "Lan", "phone": "0901", "items": [{"productId": 7, "name": "Donut", "qty": 2, "price": 25000}]}"#,
        )
        .unwrap();
        let mobile: CreateOrderRequest = serde_json::from_str(
            r#"{"customerName": "Lan", "customerPhone": "0901", "total": 1, "items": [{"productId": "7", "name": "Donut", "quantity": 2, "price": 25000}]}"#,
        )
        .unwrap();

        for request in [web, mobile] {
            let order = NewOrder::from(request).into_order(1_000).unwrap();
            assert_eq!(order.customer_name.as_deref(), Some("Lan"));
            assert_eq!(order.items[0].product_id.as_deref(), Some("7"));
            assert_eq!(order.items[0].qty, 2);
            assert_eq!(order.total, 15_000 + 50_000 + 5_000);
        }
    }

    #[test]
    fn patch_request_rejects_unknown_keys() {
        let result = serde_json::from_str::<OrderPatchRequest>(r#"{"status": "Ready", "total": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn patch_request_splits_status_from_fields() {
        let request: OrderPatchRequest =
            serde_json::from_str(r#"{"status": "Ready", "internalNotes": "fragile"}"#).unwrap();
        let (status, fields) = request.split();
        assert_eq!(status.as_deref(), Some("Ready"));
        assert_eq!(fields.internal_notes.as_deref(), Some("fragile"));
        assert!(!fields.is_empty());
    }

    #[test]
    fn response_uses_client_keys() {
        let mut order = Order::new("ORDER-1", 10);
        order.customer_name = Some("Lan".into());
        order.set_items(vec![OrderItem {
            id: Some(3),
            product_id: None,
            name: "Donut".into(),
            qty: 2,
            price: 25_000,
            product_name: None,
        }])
        .unwrap();
        let json = serde_json::to_value(OrderDto::from(order)).unwrap();
        assert_eq!(json["name"], "Lan");
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["items"][0]["id"], "3");
        assert_eq!(json["items"][0]["quantity"], 2);
        assert_eq!(json["createdAt"], 10);
    }
}
