//! Drone repository interface

use async_trait::async_trait;

use super::model::Drone;
use crate::domain::DomainResult;

#[async_trait]
pub trait DroneRepository: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Drone>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Drone>>;
    async fn find_by_restaurant(&self, restaurant_id: &str) -> DomainResult<Vec<Drone>>;
    /// Insert or overwrite (last write wins).
    async fn save(&self, drone: &Drone) -> DomainResult<()>;
    async fn count(&self) -> DomainResult<u64>;
}
