//! Notification repository interface

use async_trait::async_trait;

use super::model::Notification;
use crate::domain::DomainResult;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn save(&self, notification: &Notification) -> DomainResult<()>;
    /// Newest first.
    async fn find_by_restaurant(
        &self,
        restaurant_id: &str,
        unread_only: bool,
    ) -> DomainResult<Vec<Notification>>;
    /// Returns `false` when no such notification exists.
    async fn mark_read(&self, id: &str) -> DomainResult<bool>;
    async fn count_unread(&self, restaurant_id: &str) -> DomainResult<u64>;
}
