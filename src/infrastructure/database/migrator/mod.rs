//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_restaurants;
mod m20240101_000002_create_products;
mod m20240101_000003_create_users;
mod m20240101_000004_create_drones;
mod m20240101_000005_create_orders;
mod m20240101_000006_create_cart_items;
mod m20240101_000007_create_notifications;
mod m20240101_000008_create_analytics;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_restaurants::Migration),
            Box::new(m20240101_000002_create_products::Migration),
            Box::new(m20240101_000003_create_users::Migration),
            Box::new(m20240101_000004_create_drones::Migration),
            Box::new(m20240101_000005_create_orders::Migration),
            Box::new(m20240101_000006_create_cart_items::Migration),
            Box::new(m20240101_000007_create_notifications::Migration),
            Box::new(m20240101_000008_create_analytics::Migration),
        ]
    }
}
