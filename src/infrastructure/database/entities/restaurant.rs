//! Restaurant entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "restaurants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(nullable)]
    pub description: Option<String>,
    #[sea_orm(nullable)]
    pub category: Option<String>,
    #[sea_orm(nullable)]
    pub location: Option<String>,
    pub rating: f64,
    #[sea_orm(nullable)]
    pub theme_primary: Option<String>,
    #[sea_orm(nullable)]
    pub theme_secondary: Option<String>,
    #[sea_orm(nullable)]
    pub theme_accent: Option<String>,
    #[sea_orm(nullable)]
    pub owner_id: Option<String>,
    pub is_active: bool,
    /// Epoch millis
    #[sea_orm(nullable)]
    pub created_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
