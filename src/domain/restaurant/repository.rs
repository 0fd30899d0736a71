//! Restaurant repository interface

use async_trait::async_trait;

use super::model::Restaurant;
use crate::domain::DomainResult;

#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Restaurant>>;
    async fn find_active(&self) -> DomainResult<Vec<Restaurant>>;
    async fn find_by_category(&self, category: &str) -> DomainResult<Vec<Restaurant>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Restaurant>>;
    async fn find_by_owner(&self, owner_id: &str) -> DomainResult<Option<Restaurant>>;
    async fn save(&self, restaurant: &Restaurant) -> DomainResult<()>;
    async fn count(&self) -> DomainResult<u64>;
}
