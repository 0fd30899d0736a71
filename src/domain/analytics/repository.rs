//! Analytics snapshot sink

use async_trait::async_trait;

use super::model::AnalyticsSnapshot;
use crate::domain::DomainResult;

#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    async fn save(&self, snapshot: &AnalyticsSnapshot) -> DomainResult<()>;
}
