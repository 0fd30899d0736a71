//! Analytics aggregation

pub mod model;
pub mod repository;

pub use model::{
    orders_on_day, top_items, AnalyticsPeriod, AnalyticsSnapshot, RestaurantOverview, TopItem,
    DELIVERY_TIME_MINUTES, TOP_ITEMS_LIMIT,
};
pub use repository::AnalyticsRepository;
