//! Analytics DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::analytics::TopItem;
use crate::domain::{AnalyticsSnapshot, RestaurantOverview};

#[derive(Debug, Deserialize, IntoParams)]
pub struct PeriodParams {
    /// `day` (default), `week` or `month`
    pub period: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsDto {
    /// Dashboard label of the period
    pub period: String,
    pub revenue: i64,
    pub orders: i64,
    pub avg_order_value: i64,
    /// Minutes
    pub delivery_time: i64,
}

impl From<AnalyticsSnapshot> for AnalyticsDto {
    fn from(s: AnalyticsSnapshot) -> Self {
        Self {
            period: s.period.label().to_string(),
            revenue: s.revenue,
            orders: s.orders,
            avg_order_value: s.avg_order_value,
            delivery_time: s.delivery_time,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TopItemDto {
    pub name: String,
    pub orders: i64,
    pub revenue: i64,
}

impl From<TopItem> for TopItemDto {
    fn from(t: TopItem) -> Self {
        Self {
            name: t.name,
            orders: t.orders,
            revenue: t.revenue,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewDto {
    pub id: String,
    pub name: String,
    pub revenue: i64,
    pub orders_today: i64,
    pub active_drones: i64,
    pub avg_delivery_time: i64,
    pub rating: f64,
    pub top_items: Vec<TopItemDto>,
}

impl From<RestaurantOverview> for OverviewDto {
    fn from(o: RestaurantOverview) -> Self {
        Self {
            id: o.id,
            name: o.name,
            revenue: o.revenue,
            orders_today: o.orders_today,
            active_drones: o.active_drones,
            avg_delivery_time: o.avg_delivery_time,
            rating: o.rating,
            top_items: o.top_items.into_iter().map(TopItemDto::from).collect(),
        }
    }
}
