//! Order domain entity
//!
//! An order owns its line items and derives its total from them. The
//! total is recomputed on every change to the item list and is never
//! accepted from client input.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::shared::errors::DomainError;

/// Flat delivery fee added to every order (minor currency units).
pub const SHIPPING_FEE: i64 = 15_000;

/// Tax percentage applied to the item subtotal, truncated toward zero.
pub const TAX_PERCENT: i64 = 10;

/// Order lifecycle status
///
/// Any status may be set to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Delivering,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivering,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Label shown to clients. `Preparing` is rendered as "In Progress".
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "In Progress",
            OrderStatus::Ready => "Ready",
            OrderStatus::Delivering => "Delivering",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Case-insensitive parse accepting both enum names and client labels.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "pending" => Some(OrderStatus::Pending),
            "confirmed" => Some(OrderStatus::Confirmed),
            "preparing" | "in progress" => Some(OrderStatus::Preparing),
            "ready" => Some(OrderStatus::Ready),
            "delivering" => Some(OrderStatus::Delivering),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" | "canceled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::parse(s).ok_or_else(|| DomainError::Validation(format!("Invalid status: {}", s)))
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        OrderStatus::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid status: {}", raw)))
    }
}

/// A line item owned by exactly one order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    /// Database id, `None` until persisted
    pub id: Option<i64>,
    pub product_id: Option<String>,
    pub name: String,
    pub qty: i32,
    pub price: i64,
    pub product_name: Option<String>,
}

impl OrderItem {
    /// Contribution to the subtotal. Items with a non-positive quantity or
    /// price contribute nothing; `None` when the product overflows.
    pub fn line_total(&self) -> Option<i64> {
        if self.qty > 0 && self.price > 0 {
            i64::from(self.qty).checked_mul(self.price)
        } else {
            Some(0)
        }
    }
}

fn amount_too_large() -> DomainError {
    DomainError::Validation("Order amount is too large".to_string())
}

/// Sum of counted line totals.
pub fn subtotal(items: &[OrderItem]) -> Result<i64, DomainError> {
    items.iter().try_fold(0i64, |acc, item| {
        item.line_total()
            .and_then(|line| acc.checked_add(line))
            .ok_or_else(amount_too_large)
    })
}

/// `SHIPPING_FEE + subtotal + floor(subtotal * TAX_PERCENT / 100)`.
/// Amounts that do not fit in an `i64` are a validation error.
pub fn compute_total(items: &[OrderItem]) -> Result<i64, DomainError> {
    let subtotal = subtotal(items)?;
    // Split on 100 so the intermediate product cannot overflow.
    let tax = (subtotal / 100) * TAX_PERCENT + (subtotal % 100) * TAX_PERCENT / 100;
    SHIPPING_FEE
        .checked_add(subtotal)
        .and_then(|t| t.checked_add(tax))
        .ok_or_else(amount_too_large)
}

/// Customer order aggregate
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
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
    pub status: OrderStatus,
    pub total: i64,
    /// Epoch millis
    pub created_at: i64,
    /// Epoch millis, never earlier than `created_at`
    pub updated_at: i64,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Collision-resistant id: `ORDER-` plus 12 uppercase hex characters.
    pub fn generate_id() -> String {
        let hex = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
        format!("ORDER-{}", &hex[..12])
    }

    /// Empty pending order with both timestamps set to `now`.
    pub fn new(id: impl Into<String>, now: i64) -> Self {
        Self {
            id: id.into(),
            customer_name: None,
            customer_phone: None,
            customer_email: None,
            address: None,
            restaurant: None,
            restaurant_id: None,
            user_id: None,
            payment_session_id: None,
            payment_method: None,
            payment_status: None,
            note: None,
            internal_notes: None,
            drone_id: None,
            drone_path: Vec::new(),
            vnpay_transaction_id: None,
            confirmed_at: None,
            cancelled_at: None,
            confirmed_by: None,
            status: OrderStatus::Pending,
            total: SHIPPING_FEE,
            created_at: now,
            updated_at: now,
            items: Vec::new(),
        }
    }

    /// Replace the items and recompute the total. On overflow the order
    /// is left unchanged.
    pub fn set_items(&mut self, items: Vec<OrderItem>) -> Result<(), DomainError> {
        self.total = compute_total(&items)?;
        self.items = items;
        Ok(())
    }

    /// Advance `updated_at`, keeping it monotonic.
    pub fn touch(&mut self, now: i64) {
        self.updated_at = now.max(self.updated_at).max(self.created_at);
    }

    pub fn set_status(&mut self, status: OrderStatus, now: i64) {
        self.status = status;
        self.touch(now);
    }
}

/// Item as submitted by a client when placing an order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewOrderItem {
    pub product_id: Option<String>,
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub qty: Option<i32>,
    pub price: i64,
    pub product_name: Option<String>,
}

impl NewOrderItem {
    /// `quantity` wins when positive, then `qty`, else 1.
    pub fn effective_qty(&self) -> i32 {
        match (self.quantity, self.qty) {
            (Some(q), _) if q > 0 => q,
            (_, Some(q)) if q > 0 => q,
            _ => 1,
        }
    }

    pub fn into_item(self) -> OrderItem {
        let qty = self.effective_qty();
        OrderItem {
            id: None,
            product_id: self.product_id,
            name: self.name.unwrap_or_default(),
            qty,
            price: self.price.max(0),
            product_name: self.product_name,
        }
    }
}

/// Client request to place an order
#[derive(Debug, Clone, Default)]
pub struct NewOrder {
    pub id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
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
    pub items: Vec<NewOrderItem>,
}

impl NewOrder {
    /// Build the order aggregate. Unknown status falls back to `Pending`
    /// and non-positive timestamps are replaced by `now`.
    pub fn into_order(self, now: i64) -> Result<Order, DomainError> {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(Order::generate_id);

        let created_at = self.created_at.filter(|t| *t > 0).unwrap_or(now);
        let updated_at = self.updated_at.filter(|t| *t > 0).unwrap_or(now);

        let mut order = Order::new(id, created_at);
        order.updated_at = updated_at.max(created_at);
        order.customer_name = self.customer_name;
        order.customer_phone = self.customer_phone;
        order.customer_email = self.customer_email;
        order.address = self.address;
        order.restaurant = self.restaurant;
        order.restaurant_id = self.restaurant_id;
        order.user_id = self.user_id;
        order.payment_session_id = self.payment_session_id.filter(|s| !s.trim().is_empty());
        order.payment_method = self.payment_method;
        order.payment_status = self.payment_status;
        order.note = self.note;
        order.drone_id = self.drone_id;
        order.status = self
            .status
            .as_deref()
            .and_then(OrderStatus::parse)
            .unwrap_or_default();
        order.set_items(self.items.into_iter().map(NewOrderItem::into_item).collect())?;
        Ok(order)
    }
}

/// Raw query parameters for listing orders
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub payment_session_id: Option<String>,
    pub phone: Option<String>,
    pub restaurant_id: Option<String>,
}

/// Resolved order query, one variant per precedence level
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderQuery {
    PaymentSession(String),
    PhoneAndRestaurant { phone: String, restaurant_id: String },
    Phone(String),
    Restaurant(String),
    All,
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

impl OrderFilter {
    /// Payment session beats phone+restaurant, which beats phone, which
    /// beats restaurant. Blank values count as absent.
    pub fn resolve(&self) -> OrderQuery {
        if let Some(session) = present(&self.payment_session_id) {
            return OrderQuery::PaymentSession(session);
        }
        match (present(&self.phone), present(&self.restaurant_id)) {
            (Some(phone), Some(restaurant_id)) => OrderQuery::PhoneAndRestaurant {
                phone,
                restaurant_id,
            },
            (Some(phone), None) => OrderQuery::Phone(phone),
            (None, Some(restaurant_id)) => OrderQuery::Restaurant(restaurant_id),
            (None, None) => OrderQuery::All,
        }
    }
}

impl OrderQuery {
    /// In-process evaluation, used by the in-memory store.
    pub fn matches(&self, order: &Order) -> bool {
        let phone_contains = |needle: &str| {
            order
                .customer_phone
                .as_deref()
                .map(|p| p.to_lowercase().contains(&needle.to_lowercase()))
                .unwrap_or(false)
        };
        match self {
            OrderQuery::PaymentSession(s) => order.payment_session_id.as_deref() == Some(s),
            OrderQuery::PhoneAndRestaurant {
                phone,
                restaurant_id,
            } => phone_contains(phone) && order.restaurant_id.as_deref() == Some(restaurant_id),
            OrderQuery::Phone(phone) => phone_contains(phone),
            OrderQuery::Restaurant(r) => order.restaurant_id.as_deref() == Some(r),
            OrderQuery::All => true,
        }
    }
}

/// Partial update of the non-status order fields
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderFieldsPatch {
    pub confirmed_at: Option<i64>,
    pub cancelled_at: Option<i64>,
    pub internal_notes: Option<String>,
    pub confirmed_by: Option<String>,
    pub drone_path: Option<Vec<String>>,
    pub vnpay_transaction_id: Option<String>,
}

impl OrderFieldsPatch {
    pub fn is_empty(&self) -> bool {
        self == &OrderFieldsPatch::default()
    }

    /// Copies every present field onto `order`. Returns whether anything
    /// was applied.
    pub fn apply(self, order: &mut Order, now: i64) -> bool {
        if self.is_empty() {
            return false;
        }
        if let Some(v) = self.confirmed_at {
            order.confirmed_at = Some(v);
        }
        if let Some(v) = self.cancelled_at {
            order.cancelled_at = Some(v);
        }
        if let Some(v) = self.internal_notes {
            order.internal_notes = Some(v);
        }
        if let Some(v) = self.confirmed_by {
            order.confirmed_by = Some(v);
        }
        if let Some(v) = self.drone_path {
            order.drone_path = v;
        }
        if let Some(v) = self.vnpay_transaction_id {
            order.vnpay_transaction_id = Some(v);
        }
        order.touch(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, qty: i32, price: i64) -> OrderItem {
        OrderItem {
            id: None,
            product_id: None,
            name: name.to_string(),
            qty,
            price,
            product_name: None,
        }
    }

    #[test]
    fn zero_quantity_item_is_excluded_from_total() {
        // subtotal = 2 * 50_000 = 100_000; tax = 10_000; shipping = 15_000
        let items = vec![item("A", 2, 50_000), item("B", 0, 1_000)];
        assert_eq!(subtotal(&items).unwrap(), 100_000);
        assert_eq!(compute_total(&items).unwrap(), 125_000);
    }

    #[test]
    fn empty_order_costs_only_shipping() {
        assert_eq!(compute_total(&[]).unwrap(), SHIPPING_FEE);
    }

    #[test]
    fn tax_is_truncated() {
        // subtotal = 3 * 33 = 99; tax = floor(9.9) = 9
        let items = vec![item("C", 3, 33)];
        assert_eq!(compute_total(&items).unwrap(), 15_000 + 99 + 9);
    }

    #[test]
    fn negative_price_contributes_nothing() {
        let items = vec![item("refund", 1, -5_000), item("ok", 1, 10_000)];
        assert_eq!(compute_total(&items).unwrap(), 15_000 + 10_000 + 1_000);
    }

    #[test]
    fn total_formula_holds_across_mixed_items() {
        for (qty, price) in [(1, 1), (7, 12_345), (0, 99_999), (3, 0), (-2, 500)] {
            let items = vec![item("x", qty, price), item("y", 2, 25_000)];
            let sub = subtotal(&items).unwrap();
            assert_eq!(compute_total(&items).unwrap(), 15_000 + sub + sub / 10);
        }
    }

    #[test]
    fn oversized_line_is_rejected() {
        let items = vec![item("gold", 2, i64::MAX / 2 + 1)];
        assert!(matches!(compute_total(&items), Err(DomainError::Validation(_))));
    }

    #[test]
    fn overflowing_sum_or_fees_are_rejected() {
        let items = vec![item("a", 1, i64::MAX - 10), item("b", 1, 20)];
        assert!(compute_total(&items).is_err());

        // Subtotal fits but shipping and tax push it past the limit.
        let items = vec![item("a", 1, i64::MAX - 1_000)];
        assert!(compute_total(&items).is_err());
    }

    #[test]
    fn large_but_valid_total_keeps_exact_tax() {
        let price = 8_000_000_000_000_007;
        let total = compute_total(&[item("bulk", 1, price)]).unwrap();
        assert_eq!(total, SHIPPING_FEE + price + price / 10);
        assert!(total > 0);
    }

    #[test]
    fn set_items_keeps_order_on_overflow() {
        let mut order = Order::new("O1", 1);
        order.set_items(vec![item("a", 1, 100)]).unwrap();
        let err = order.set_items(vec![item("gold", 2, i64::MAX / 2 + 1)]);
        assert!(err.is_err());
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total, SHIPPING_FEE + 110);
    }

    #[test]
    fn status_labels_and_aliases() {
        assert_eq!(OrderStatus::Preparing.as_str(), "In Progress");
        assert_eq!(OrderStatus::parse("in progress"), Some(OrderStatus::Preparing));
        assert_eq!(OrderStatus::parse("PREPARING"), Some(OrderStatus::Preparing));
        assert_eq!(OrderStatus::parse("in_progress"), Some(OrderStatus::Preparing));
        assert_eq!(OrderStatus::parse("Canceled"), Some(OrderStatus::Cancelled));
        assert_eq!(OrderStatus::parse(" delivered "), Some(OrderStatus::Delivered));
        assert_eq!(OrderStatus::parse("shipped"), None);
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn status_serializes_as_client_label() {
        let json = serde_json::to_string(&OrderStatus::Preparing).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let parsed: OrderStatus = serde_json::from_str("\"ready\"").unwrap();
        assert_eq!(parsed, OrderStatus::Ready);
        assert!(serde_json::from_str::<OrderStatus>("\"lost\"").is_err());
    }

    #[test]
    fn generated_id_shape() {
        let id = Order::generate_id();
        assert!(id.starts_with("ORDER-"));
        let suffix = &id["ORDER-".len()..];
        assert_eq!(suffix.len(), 12);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn effective_qty_prefers_quantity_then_qty() {
        let both = NewOrderItem { quantity: Some(3), qty: Some(5), ..Default::default() };
        let qty_only = NewOrderItem { quantity: Some(0), qty: Some(5), ..Default::default() };
        let neither = NewOrderItem { quantity: Some(-1), qty: None, ..Default::default() };
        assert_eq!(both.effective_qty(), 3);
        assert_eq!(qty_only.effective_qty(), 5);
        assert_eq!(neither.effective_qty(), 1);
    }

    #[test]
    fn new_order_defaults() {
        let req = NewOrder {
            id: Some("  ".into()),
            status: Some("nonsense".into()),
            created_at: Some(0),
            updated_at: Some(-5),
            items: vec![NewOrderItem { name: None, price: 1_000, ..Default::default() }],
            ..Default::default()
        };
        let order = req.into_order(1_700_000_000_000).unwrap();
        assert!(order.id.starts_with("ORDER-"));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.created_at, 1_700_000_000_000);
        assert_eq!(order.updated_at, 1_700_000_000_000);
        assert_eq!(order.items[0].name, "");
        assert_eq!(order.items[0].qty, 1);
        assert_eq!(order.total, 15_000 + 1_000 + 100);
    }

    #[test]
    fn new_order_keeps_client_timestamps_monotonic() {
        let req = NewOrder {
            created_at: Some(2_000),
            updated_at: Some(1_000),
            ..Default::default()
        };
        let order = req.into_order(9_999).unwrap();
        assert_eq!(order.created_at, 2_000);
        assert_eq!(order.updated_at, 2_000);
    }

    #[test]
    fn payment_session_takes_precedence() {
        let filter = OrderFilter {
            payment_session_id: Some("PS-1".into()),
            phone: Some("0901".into()),
            restaurant_id: Some("R1".into()),
        };
        assert_eq!(filter.resolve(), OrderQuery::PaymentSession("PS-1".into()));
    }

    #[test]
    fn filter_precedence_below_payment_session() {
        let both = OrderFilter {
            payment_session_id: Some(" ".into()),
            phone: Some("0901".into()),
            restaurant_id: Some("R1".into()),
        };
        assert_eq!(
            both.resolve(),
            OrderQuery::PhoneAndRestaurant { phone: "0901".into(), restaurant_id: "R1".into() }
        );
        let phone = OrderFilter { phone: Some("0901".into()), ..Default::default() };
        assert_eq!(phone.resolve(), OrderQuery::Phone("0901".into()));
        let rest = OrderFilter { restaurant_id: Some("R1".into()), ..Default::default() };
        assert_eq!(rest.resolve(), OrderQuery::Restaurant("R1".into()));
        assert_eq!(OrderFilter::default().resolve(), OrderQuery::All);
    }

    #[test]
    fn phone_match_is_case_insensitive_substring() {
        let mut order = Order::new("O1", 1);
        order.customer_phone = Some("+84-ABC-0901".into());
        assert!(OrderQuery::Phone("abc".into()).matches(&order));
        assert!(!OrderQuery::Phone("999".into()).matches(&order));
    }

    #[test]
    fn empty_patch_applies_nothing() {
        let mut order = Order::new("O1", 10);
        let before = order.clone();
        assert!(!OrderFieldsPatch::default().apply(&mut order, 20));
        assert_eq!(order, before);
    }

    #[test]
    fn patch_sets_fields_and_touches() {
        let mut order = Order::new("O1", 10);
        let patch = OrderFieldsPatch {
            confirmed_by: Some("staff-1".into()),
            drone_path: Some(vec!["A".into(), "B".into()]),
            ..Default::default()
        };
        assert!(patch.apply(&mut order, 50));
        assert_eq!(order.confirmed_by.as_deref(), Some("staff-1"));
        assert_eq!(order.drone_path, vec!["A", "B"]);
        assert_eq!(order.updated_at, 50);
    }

    #[test]
    fn patch_rejects_unknown_keys() {
        let err = serde_json::from_str::<OrderFieldsPatch>(r#"{"total": 1}"#);
        assert!(err.is_err());
    }
}
