//! Restaurant analytics
//!
//! Everything here is derived from order history. Snapshots are written
//! to storage for reporting but never read back.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::order::Order;
use crate::shared::time::same_local_day;

/// Placeholder delivery time in minutes until real delivery data exists.
pub const DELIVERY_TIME_MINUTES: i64 = 18;

/// Number of entries in the overview's top-items ranking.
pub const TOP_ITEMS_LIMIT: usize = 5;

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyticsPeriod {
    #[default]
    Day,
    Week,
    Month,
}

impl AnalyticsPeriod {
    /// Anything other than `week` or `month` means a day.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|r| r.trim().to_lowercase()).as_deref() {
            Some("week") => AnalyticsPeriod::Week,
            Some("month") => AnalyticsPeriod::Month,
            _ => AnalyticsPeriod::Day,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsPeriod::Day => "day",
            AnalyticsPeriod::Week => "week",
            AnalyticsPeriod::Month => "month",
        }
    }

    pub fn window_millis(&self) -> i64 {
        match self {
            AnalyticsPeriod::Day => DAY_MS,
            AnalyticsPeriod::Week => 7 * DAY_MS,
            AnalyticsPeriod::Month => 30 * DAY_MS,
        }
    }

    /// Dashboard label
    pub fn label(&self) -> &'static str {
        match self {
            AnalyticsPeriod::Day => "Hôm nay",
            AnalyticsPeriod::Week => "Tuần này",
            AnalyticsPeriod::Month => "Tháng này",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSnapshot {
    pub id: String,
    pub restaurant_id: String,
    pub period: AnalyticsPeriod,
    pub revenue: i64,
    pub orders: i64,
    pub avg_order_value: i64,
    pub delivery_time: i64,
    pub created_at: i64,
}

impl AnalyticsSnapshot {
    /// Aggregate the orders created strictly after `now - window`.
    pub fn calculate(
        restaurant_id: &str,
        period: AnalyticsPeriod,
        orders: &[Order],
        now: i64,
    ) -> Self {
        let start = now - period.window_millis();
        let in_window: Vec<&Order> = orders.iter().filter(|o| o.created_at > start).collect();

        let revenue: i64 = in_window.iter().map(|o| o.total).sum();
        let count = in_window.len() as i64;
        let avg_order_value = if count > 0 { revenue / count } else { 0 };

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            restaurant_id: restaurant_id.to_string(),
            period,
            revenue,
            orders: count,
            avg_order_value,
            delivery_time: DELIVERY_TIME_MINUTES,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopItem {
    pub name: String,
    pub orders: i64,
    pub revenue: i64,
}

/// Rank items by revenue across `orders`. Ties keep first-seen order.
pub fn top_items(orders: &[&Order], limit: usize) -> Vec<TopItem> {
    let mut stats: Vec<TopItem> = Vec::new();
    for item in orders.iter().flat_map(|o| o.items.iter()) {
        let qty = item.qty as i64;
        match stats.iter_mut().find(|s| s.name == item.name) {
            Some(entry) => {
                entry.orders += qty;
                entry.revenue += item.price * qty;
            }
            None => stats.push(TopItem {
                name: item.name.clone(),
                orders: qty,
                revenue: item.price * qty,
            }),
        }
    }
    // sort_by is stable
    stats.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    stats.truncate(limit);
    stats
}

/// Today's figures for one restaurant
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantOverview {
    pub id: String,
    pub name: String,
    pub revenue: i64,
    pub orders_today: i64,
    pub active_drones: i64,
    pub avg_delivery_time: i64,
    pub rating: f64,
    pub top_items: Vec<TopItem>,
}

/// Orders created on `today`'s local calendar day.
pub fn orders_on_day<'a>(orders: &'a [Order], today: DateTime<Local>) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|o| same_local_day(o.created_at, today))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderItem;

    fn order_at(id: &str, created_at: i64, total: i64) -> Order {
        let mut order = Order::new(id, created_at);
        order.total = total;
        order
    }

    fn with_items(mut order: Order, items: &[(&str, i32, i64)]) -> Order {
        order.items = items
            .iter()
            .map(|(name, qty, price)| OrderItem {
                id: None,
                product_id: None,
                name: name.to_string(),
                qty: *qty,
                price: *price,
                product_name: None,
            })
            .collect();
        order
    }

    #[test]
    fn day_window_is_strict_24_hours() {
        let now = 100 * DAY_MS;
        let orders = vec![
            order_at("old", now - 25 * HOUR_MS, 50_000),
            order_at("recent", now - 23 * HOUR_MS, 40_000),
            order_at("edge", now - DAY_MS, 10_000),
        ];
        let snap = AnalyticsSnapshot::calculate("R1", AnalyticsPeriod::Day, &orders, now);
        assert_eq!(snap.orders, 1);
        assert_eq!(snap.revenue, 40_000);
        assert_eq!(snap.avg_order_value, 40_000);
        assert_eq!(snap.delivery_time, 18);
        assert_eq!(snap.period.label(), "Hôm nay");
    }

    #[test]
    fn average_is_floored_and_zero_when_empty() {
        let now = 10 * DAY_MS;
        let orders = vec![order_at("a", now - 1, 10), order_at("b", now - 2, 11)];
        let snap = AnalyticsSnapshot::calculate("R1", AnalyticsPeriod::Week, &orders, now);
        assert_eq!(snap.avg_order_value, 10);

        let empty = AnalyticsSnapshot::calculate("R1", AnalyticsPeriod::Month, &[], now);
        assert_eq!(empty.orders, 0);
        assert_eq!(empty.avg_order_value, 0);
    }

    #[test]
    fn unknown_period_means_day() {
        assert_eq!(AnalyticsPeriod::parse(Some("year")), AnalyticsPeriod::Day);
        assert_eq!(AnalyticsPeriod::parse(None), AnalyticsPeriod::Day);
        assert_eq!(AnalyticsPeriod::parse(Some("WEEK")), AnalyticsPeriod::Week);
        assert_eq!(AnalyticsPeriod::Month.label(), "Tháng này");
    }

    #[test]
    fn top_items_rank_by_revenue_and_keep_tie_order() {
        let a = with_items(order_at("a", 1, 0), &[("Donut", 2, 25_000), ("Pizza", 1, 50_000)]);
        let b = with_items(order_at("b", 2, 0), &[("Burger", 1, 79_000), ("Donut", 1, 25_000)]);
        let ranked = top_items(&[&a, &b], TOP_ITEMS_LIMIT);

        assert_eq!(ranked[0].name, "Burger");
        assert_eq!(ranked[1], TopItem { name: "Donut".into(), orders: 3, revenue: 75_000 });
        assert_eq!(ranked[2].name, "Pizza");
    }

    #[test]
    fn top_items_tie_keeps_first_seen() {
        let a = with_items(order_at("a", 1, 0), &[("Tea", 1, 10_000), ("Coffee", 1, 10_000)]);
        let ranked = top_items(&[&a], 1);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name, "Tea");
    }
}
