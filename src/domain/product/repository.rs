//! Product repository interface

use async_trait::async_trait;

use super::model::Product;
use crate::domain::DomainResult;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products ordered by name.
    async fn find_all(&self) -> DomainResult<Vec<Product>>;
    async fn find_by_restaurant(&self, restaurant: &str) -> DomainResult<Vec<Product>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Product>>;
    /// Insert or overwrite.
    async fn save(&self, product: &Product) -> DomainResult<()>;
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: &str) -> DomainResult<bool>;
    async fn count(&self) -> DomainResult<u64>;
}
