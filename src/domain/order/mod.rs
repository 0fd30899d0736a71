//! Order aggregate
//!
//! Contains the Order entity, its line items, status, pricing rules and
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{
    compute_total, subtotal, NewOrder, NewOrderItem, Order, OrderFieldsPatch, OrderFilter,
    OrderItem, OrderQuery, OrderStatus, SHIPPING_FEE, TAX_PERCENT,
};
pub use repository::OrderRepository;
