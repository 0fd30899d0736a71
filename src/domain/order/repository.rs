//! Order repository interface

use async_trait::async_trait;

use super::model::{Order, OrderQuery};
use crate::domain::DomainResult;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert the order together with its items as one atomic write.
    /// Fails with `Conflict` when the id is taken.
    async fn create(&self, order: Order) -> DomainResult<Order>;
    /// Overwrite the order's scalar fields. Items are left untouched.
    async fn update(&self, order: &Order) -> DomainResult<()>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Order>>;
    async fn find(&self, query: &OrderQuery) -> DomainResult<Vec<Order>>;
    /// Orders of a restaurant created strictly after `after_millis`.
    async fn find_by_restaurant_created_after(
        &self,
        restaurant_id: &str,
        after_millis: i64,
    ) -> DomainResult<Vec<Order>>;
    async fn count(&self) -> DomainResult<u64>;
}
