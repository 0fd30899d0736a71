//! Cart repository interface

use async_trait::async_trait;

use super::model::{CartItem, NewCartItem};
use crate::domain::DomainResult;

#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Every line, in insertion order.
    async fn find_all(&self) -> DomainResult<Vec<CartItem>>;
    async fn add(&self, item: NewCartItem) -> DomainResult<CartItem>;
    /// Returns `false` when no line has this id.
    async fn delete(&self, id: i64) -> DomainResult<bool>;
    async fn clear(&self) -> DomainResult<()>;
}
