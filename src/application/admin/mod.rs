//! Back-office reporting and account moderation

pub mod service;

pub use service::{
    AdminCustomer, AdminDrone, AdminRestaurant, AdminService, AdminStats, RealtimeStats,
};
