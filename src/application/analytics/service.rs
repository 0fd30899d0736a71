//! Analytics aggregator
//!
//! Figures are recomputed from order history on every call.

use std::sync::Arc;

use chrono::Local;
use tracing::warn;

use crate::domain::analytics::{
    orders_on_day, top_items, AnalyticsPeriod, AnalyticsSnapshot, RestaurantOverview,
    DELIVERY_TIME_MINUTES, TOP_ITEMS_LIMIT,
};
use crate::domain::order::OrderQuery;
use crate::domain::{DomainResult, DroneStatus, RepositoryProvider};
use crate::shared::time::now_millis;

#[derive(Clone)]
pub struct AnalyticsService {
    repos: Arc<dyn RepositoryProvider>,
}

impl AnalyticsService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Revenue, order count and average order value over the period's
    /// sliding window. The snapshot is stored best effort.
    pub async fn calculate(
        &self,
        restaurant_id: &str,
        period: AnalyticsPeriod,
    ) -> DomainResult<AnalyticsSnapshot> {
        let now = now_millis();
        let orders = self
            .repos
            .orders()
            .find_by_restaurant_created_after(restaurant_id, now - period.window_millis())
            .await?;

        let snapshot = AnalyticsSnapshot::calculate(restaurant_id, period, &orders, now);

        if let Err(e) = self.repos.analytics().save(&snapshot).await {
            warn!(restaurant_id, error = %e, "Failed to store analytics snapshot");
        }
        Ok(snapshot)
    }

    /// Today's KPIs. `None` when the restaurant does not exist.
    pub async fn overview(&self, restaurant_id: &str) -> DomainResult<Option<RestaurantOverview>> {
        let Some(restaurant) = self.repos.restaurants().find_by_id(restaurant_id).await? else {
            return Ok(None);
        };

        let orders = self
            .repos
            .orders()
            .find(&OrderQuery::Restaurant(restaurant_id.to_string()))
            .await?;
        let today = orders_on_day(&orders, Local::now());

        let active_drones = self
            .repos
            .drones()
            .find_by_restaurant(restaurant_id)
            .await?
            .iter()
            .filter(|d| d.status == DroneStatus::Delivering)
            .count();

        Ok(Some(RestaurantOverview {
            id: restaurant.id,
            name: restaurant.name,
            revenue: today.iter().map(|o| o.total).sum(),
            orders_today: today.len() as i64,
            active_drones: active_drones as i64,
            avg_delivery_time: DELIVERY_TIME_MINUTES,
            rating: restaurant.rating,
            top_items: top_items(&today, TOP_ITEMS_LIMIT),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Drone, Order, Restaurant, ThemeColors};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    const HOUR_MS: i64 = 60 * 60 * 1000;

    fn restaurant(id: &str) -> Restaurant {
        Restaurant {
            id: id.into(),
            name: "Sweet Dreams".into(),
            description: None,
            category: Some("Dessert".into()),
            location: None,
            rating: 4.5,
            theme: ThemeColors::default(),
            owner_id: None,
            is_active: true,
            created_at: None,
        }
    }

    async fn seeded() -> (Arc<InMemoryRepositoryProvider>, AnalyticsService) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let now = now_millis();
        for (id, age_hours, total) in [("old", 25, 50_000), ("new", 23, 40_000)] {
            let mut order = Order::new(id, now - age_hours * HOUR_MS);
            order.restaurant_id = Some("R1".into());
            order.total = total;
            repos.orders().create(order).await.unwrap();
        }
        let service = AnalyticsService::new(repos.clone());
        (repos, service)
    }

    #[tokio::test]
    async fn day_window_excludes_25h_and_includes_23h() {
        let (repos, service) = seeded().await;
        let snap = service.calculate("R1", AnalyticsPeriod::Day).await.unwrap();
        assert_eq!(snap.orders, 1);
        assert_eq!(snap.revenue, 40_000);
        assert_eq!(repos.analytics_len(), 1);

        let week = service.calculate("R1", AnalyticsPeriod::Week).await.unwrap();
        assert_eq!(week.orders, 2);
        assert_eq!(week.avg_order_value, 45_000);
    }

    #[tokio::test]
    async fn overview_of_unknown_restaurant_is_none() {
        let (_, service) = seeded().await;
        assert!(service.overview("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn overview_counts_delivering_drones() {
        let (repos, service) = seeded().await;
        repos.restaurants().save(&restaurant("R1")).await.unwrap();
        let mut busy = Drone::new("D1", "R1");
        busy.status = DroneStatus::Delivering;
        repos.drones().save(&busy).await.unwrap();
        repos.drones().save(&Drone::new("D2", "R1")).await.unwrap();

        let overview = service.overview("R1").await.unwrap().unwrap();
        assert_eq!(overview.active_drones, 1);
        assert_eq!(overview.avg_delivery_time, 18);
        assert_eq!(overview.rating, 4.5);
    }
}
