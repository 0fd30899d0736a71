//! Admin service
//!
//! Read models are computed from full table scans; the data set of a
//! single delivery platform instance is small.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{
    DomainError, DomainResult, DroneStatus, OrderStatus, RepositoryProvider, Restaurant,
    UserRole,
};
use crate::domain::order::OrderQuery;
use crate::shared::time::now_millis;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_customers: u64,
    pub total_restaurants: u64,
    pub active_restaurants: u64,
    pub pending_restaurants: u64,
    pub total_orders: u64,
    pub total_revenue: i64,
    pub total_drones: u64,
    pub active_drones: u64,
    pub idle_drones: u64,
    pub charging_drones: u64,
    pub maintenance_drones: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminRestaurant {
    pub id: String,
    pub name: String,
    pub category: String,
    /// `Active` or `Pending`
    pub status: String,
    pub owner_id: Option<String>,
    pub owner_name: String,
    pub total_orders: u64,
    pub total_revenue: i64,
    pub rating: f64,
    pub drone_count: u64,
    pub location: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminCustomer {
    pub id: String,
    pub name: Option<String>,
    pub phone: String,
    pub email: String,
    pub total_orders: u64,
    pub total_spend: i64,
    /// `Active` or `Suspended`
    pub account_status: String,
    pub created_at: i64,
    pub last_order_date: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDrone {
    pub id: String,
    pub restaurant_id: String,
    pub restaurant_name: String,
    /// Internal status: `Idle`, `Delivering`, `Charging` or `Maintenance`
    pub status: String,
    pub battery: i32,
    pub current_order_id: Option<String>,
    pub last_maintenance: i64,
    pub flagged_for_issue: bool,
    pub issue_description: Option<String>,
}

/// Order pipeline counts for the live dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeStats {
    pub total_orders: u64,
    /// Pending, confirmed or being prepared
    pub pending: u64,
    /// Ready or out for delivery
    pub in_progress: u64,
    pub delivered: u64,
    pub cancelled: u64,
    pub active_drones: u64,
}

#[derive(Clone)]
pub struct AdminService {
    repos: Arc<dyn RepositoryProvider>,
}

impl AdminService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn stats(&self) -> DomainResult<AdminStats> {
        let restaurants = self.repos.restaurants().find_all().await?;
        let customers = self.repos.users().find_by_role(UserRole::Customer).await?;
        let orders = self.repos.orders().find(&OrderQuery::All).await?;
        let drones = self.repos.drones().find_all().await?;

        let active = restaurants.iter().filter(|r| r.is_active).count() as u64;
        let by_status =
            |s: DroneStatus| drones.iter().filter(|d| d.status == s).count() as u64;

        Ok(AdminStats {
            total_customers: customers.len() as u64,
            total_restaurants: restaurants.len() as u64,
            active_restaurants: active,
            pending_restaurants: restaurants.len() as u64 - active,
            total_orders: orders.len() as u64,
            total_revenue: orders.iter().map(|o| o.total).sum(),
            total_drones: drones.len() as u64,
            active_drones: by_status(DroneStatus::Delivering),
            idle_drones: by_status(DroneStatus::Idle),
            charging_drones: by_status(DroneStatus::Charging),
            maintenance_drones: by_status(DroneStatus::Maintenance),
        })
    }

    pub async fn restaurants(&self) -> DomainResult<Vec<AdminRestaurant>> {
        let restaurants = self.repos.restaurants().find_all().await?;
        let orders = self.repos.orders().find(&OrderQuery::All).await?;
        let drones = self.repos.drones().find_all().await?;
        let users = self.repos.users().find_all().await?;
        let now = now_millis();

        Ok(restaurants
            .into_iter()
            .map(|r| {
                let owns = |id: Option<&str>| id == Some(r.id.as_str());
                let mine: Vec<_> = orders
                    .iter()
                    .filter(|o| owns(o.restaurant_id.as_deref()) || owns(o.restaurant.as_deref()))
                    .collect();
                let drone_count = drones.iter().filter(|d| d.restaurant_id == r.id).count();
                let owner_name = r
                    .owner_id
                    .as_deref()
                    .and_then(|owner| users.iter().find(|u| u.id == owner))
                    .and_then(|u| u.name.clone())
                    .unwrap_or_else(|| "Unknown".to_string());

                AdminRestaurant {
                    category: r.category.clone().unwrap_or_else(|| "General".to_string()),
                    status: if r.is_active { "Active" } else { "Pending" }.to_string(),
                    owner_name,
                    total_orders: mine.len() as u64,
                    total_revenue: mine.iter().map(|o| o.total).sum(),
                    rating: r.rating,
                    drone_count: drone_count as u64,
                    location: r.location.clone().unwrap_or_else(|| "Unknown".to_string()),
                    created_at: r.created_at.unwrap_or(now),
                    owner_id: r.owner_id,
                    id: r.id,
                    name: r.name,
                }
            })
            .collect())
    }

    /// Customers and suspended customers with their order history totals.
    pub async fn customers(&self) -> DomainResult<Vec<AdminCustomer>> {
        let users = self.repos.users().find_all().await?;
        let orders = self.repos.orders().find(&OrderQuery::All).await?;

        Ok(users
            .into_iter()
            .filter(|u| matches!(u.role, UserRole::Customer | UserRole::Suspended))
            .map(|u| {
                let mine: Vec<_> = orders
                    .iter()
                    .filter(|o| o.user_id.as_deref() == Some(u.id.as_str()))
                    .collect();
                AdminCustomer {
                    phone: u.phone.clone().unwrap_or_default(),
                    email: u.email.clone().unwrap_or_default(),
                    total_orders: mine.len() as u64,
                    total_spend: mine.iter().map(|o| o.total).sum(),
                    account_status: if u.role == UserRole::Suspended {
                        "Suspended"
                    } else {
                        "Active"
                    }
                    .to_string(),
                    created_at: u.created_at,
                    last_order_date: mine.iter().map(|o| o.created_at).max(),
                    id: u.id,
                    name: u.name,
                }
            })
            .collect())
    }

    pub async fn drones(&self) -> DomainResult<Vec<AdminDrone>> {
        let now = now_millis();
        Ok(self
            .repos
            .drones()
            .find_all()
            .await?
            .into_iter()
            .map(|d| AdminDrone {
                status: d.status.as_str().to_string(),
                battery: d.battery(),
                current_order_id: d.current_order_id().map(String::from),
                last_maintenance: d.last_maintenance.unwrap_or(now),
                restaurant_name: d
                    .restaurant_name
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                flagged_for_issue: d.flagged_for_issue,
                issue_description: d.issue_description,
                restaurant_id: d.restaurant_id,
                id: d.id,
            })
            .collect())
    }

    pub async fn set_restaurant_active(&self, id: &str, is_active: bool) -> DomainResult<Restaurant> {
        let mut restaurant = self
            .repos
            .restaurants()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Restaurant", id))?;
        restaurant.is_active = is_active;
        self.repos.restaurants().save(&restaurant).await?;
        info!(restaurant_id = id, is_active, "Restaurant status changed");
        Ok(restaurant)
    }

    /// Suspend a customer. Any other account is reported as not found.
    pub async fn suspend(&self, user_id: &str) -> DomainResult<()> {
        self.switch_role(user_id, UserRole::Customer, UserRole::Suspended)
            .await
    }

    /// Lift a suspension. Only suspended accounts qualify.
    pub async fn reactivate(&self, user_id: &str) -> DomainResult<()> {
        self.switch_role(user_id, UserRole::Suspended, UserRole::Customer)
            .await
    }

    async fn switch_role(&self, user_id: &str, from: UserRole, to: UserRole) -> DomainResult<()> {
        let mut user = self
            .repos
            .users()
            .find_by_id(user_id)
            .await?
            .filter(|u| u.role == from)
            .ok_or_else(|| DomainError::not_found("User", user_id))?;
        user.role = to;
        self.repos.users().update(&user).await?;
        info!(user_id, role = %to, "User role changed");
        Ok(())
    }

    pub async fn realtime_stats(&self) -> DomainResult<RealtimeStats> {
        let orders = self.repos.orders().find(&OrderQuery::All).await?;
        let drones = self.repos.drones().find_all().await?;

        let mut stats = RealtimeStats {
            total_orders: orders.len() as u64,
            active_drones: drones
                .iter()
                .filter(|d| d.status == DroneStatus::Delivering)
                .count() as u64,
            ..Default::default()
        };
        for order in &orders {
            match order.status {
                OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::Preparing => {
                    stats.pending += 1
                }
                OrderStatus::Ready | OrderStatus::Delivering => stats.in_progress += 1,
                OrderStatus::Delivered => stats.delivered += 1,
                OrderStatus::Cancelled => stats.cancelled += 1,
            }
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Drone, Order, ThemeColors, User};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn user(id: &str, role: UserRole) -> User {
        User {
            id: id.into(),
            username: id.into(),
            password_hash: "x".into(),
            name: Some(format!("Name {}", id)),
            email: Some(format!("{}@example.com", id)),
            phone: Some(format!("09{}", id)),
            role,
            restaurant_id: None,
            order_count: 0,
            created_at: 1,
        }
    }

    async fn fixture() -> (Arc<InMemoryRepositoryProvider>, AdminService) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        for (id, active) in [("SweetDreams", true), ("Aloha", false)] {
            repos
                .restaurants()
                .save(&Restaurant {
                    id: id.into(),
                    name: id.into(),
                    description: None,
                    category: None,
                    location: None,
                    rating: 4.8,
                    theme: ThemeColors::default(),
                    owner_id: Some("owner".into()),
                    is_active: active,
                    created_at: Some(5),
                })
                .await
                .unwrap();
        }
        repos.users().create(&user("c1", UserRole::Customer)).await.unwrap();
        repos.users().create(&user("owner", UserRole::Restaurant)).await.unwrap();

        let mut delivering = Drone::new("D1", "SweetDreams");
        delivering.status = DroneStatus::Delivering;
        repos.drones().save(&delivering).await.unwrap();
        repos.drones().save(&Drone::new("D2", "Aloha")).await.unwrap();

        for (id, status, created) in [
            ("O1", OrderStatus::Pending, 10),
            ("O2", OrderStatus::Delivering, 20),
            ("O3", OrderStatus::Delivered, 30),
        ] {
            let mut order = Order::new(id, created);
            order.status = status;
            order.total = 100;
            order.user_id = Some("c1".into());
            order.restaurant_id = Some("SweetDreams".into());
            repos.orders().create(order).await.unwrap();
        }
        let svc = AdminService::new(repos.clone());
        (repos, svc)
    }

    #[tokio::test]
    async fn stats_count_everything() {
        let (_, svc) = fixture().await;
        let stats = svc.stats().await.unwrap();
        assert_eq!(stats.total_customers, 1);
        assert_eq!(stats.active_restaurants, 1);
        assert_eq!(stats.pending_restaurants, 1);
        assert_eq!(stats.total_revenue, 300);
        assert_eq!(stats.active_drones, 1);
        assert_eq!(stats.idle_drones, 1);
    }

    #[tokio::test]
    async fn restaurant_and_customer_enrichment() {
        let (_, svc) = fixture().await;
        let restaurants = svc.restaurants().await.unwrap();
        let sd = restaurants.iter().find(|r| r.id == "SweetDreams").unwrap();
        assert_eq!(sd.total_orders, 3);
        assert_eq!(sd.drone_count, 1);
        assert_eq!(sd.owner_name, "Name owner");
        assert_eq!(sd.category, "General");

        let customers = svc.customers().await.unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].last_order_date, Some(30));
        assert_eq!(customers[0].total_spend, 300);
    }

    #[tokio::test]
    async fn suspend_only_applies_to_customers() {
        let (_, svc) = fixture().await;
        assert!(matches!(svc.suspend("owner").await, Err(DomainError::NotFound { .. })));
        assert!(matches!(svc.reactivate("c1").await, Err(DomainError::NotFound { .. })));

        svc.suspend("c1").await.unwrap();
        assert_eq!(svc.customers().await.unwrap()[0].account_status, "Suspended");
        svc.reactivate("c1").await.unwrap();
        assert_eq!(svc.customers().await.unwrap()[0].account_status, "Active");
    }

    #[tokio::test]
    async fn realtime_stats_group_by_stage() {
        let (_, svc) = fixture().await;
        let stats = svc.realtime_stats().await.unwrap();
        assert_eq!(
            stats,
            RealtimeStats {
                total_orders: 3,
                pending: 1,
                in_progress: 1,
                delivered: 1,
                cancelled: 0,
                active_drones: 1,
            }
        );
    }
}
