//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::analytics::AnalyticsRepository;
use super::cart::CartRepository;
use super::drone::DroneRepository;
use super::notification::NotificationRepository;
use super::order::OrderRepository;
use super::product::ProductRepository;
use super::restaurant::RestaurantRepository;
use super::user::UserRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let order = repos.orders().find_by_id("ORDER-1A2B3C4D5E6F").await?;
///     let drones = repos.drones().find_by_restaurant("SweetDreams").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn products(&self) -> &dyn ProductRepository;
    fn restaurants(&self) -> &dyn RestaurantRepository;
    fn users(&self) -> &dyn UserRepository;
    fn drones(&self) -> &dyn DroneRepository;
    fn orders(&self) -> &dyn OrderRepository;
    fn cart(&self) -> &dyn CartRepository;
    fn notifications(&self) -> &dyn NotificationRepository;
    fn analytics(&self) -> &dyn AnalyticsRepository;
}
