//! Drone entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "drones")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(nullable)]
    pub drone_code: Option<String>,
    pub restaurant_id: String,
    #[sea_orm(nullable)]
    pub restaurant_name: Option<String>,
    /// Idle, Delivering, Charging, Maintenance
    pub status: String,
    pub battery: i32,
    #[sea_orm(nullable)]
    pub current_order_id: Option<String>,
    #[sea_orm(nullable)]
    pub lat: Option<f64>,
    #[sea_orm(nullable)]
    pub lng: Option<f64>,
    pub speed_mps: f64,
    #[sea_orm(nullable)]
    pub updated_at: Option<i64>,
    #[sea_orm(nullable)]
    pub last_maintenance: Option<i64>,
    pub flagged_for_issue: bool,
    #[sea_orm(nullable)]
    pub issue_description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
