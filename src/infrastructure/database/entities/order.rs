//! Order entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(nullable)]
    pub customer_name: Option<String>,
    #[sea_orm(nullable)]
    pub customer_phone: Option<String>,
    #[sea_orm(nullable)]
    pub customer_email: Option<String>,
    #[sea_orm(nullable)]
    pub address: Option<String>,
    #[sea_orm(nullable)]
    pub restaurant: Option<String>,
    #[sea_orm(nullable)]
    pub restaurant_id: Option<String>,
    #[sea_orm(nullable)]
    pub user_id: Option<String>,
    #[sea_orm(nullable)]
    pub payment_session_id: Option<String>,
    #[sea_orm(nullable)]
    pub payment_method: Option<String>,
    #[sea_orm(nullable)]
    pub payment_status: Option<String>,
    #[sea_orm(nullable)]
    pub note: Option<String>,
    #[sea_orm(nullable)]
    pub internal_notes: Option<String>,
    #[sea_orm(nullable)]
    pub drone_id: Option<String>,
    /// JSON array of waypoints
    pub drone_path: String,
    #[sea_orm(nullable)]
    pub vnpay_transaction_id: Option<String>,
    #[sea_orm(nullable)]
    pub confirmed_at: Option<i64>,
    #[sea_orm(nullable)]
    pub cancelled_at: Option<i64>,
    #[sea_orm(nullable)]
    pub confirmed_by: Option<String>,
    pub status: String,
    pub total: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_item::Entity")]
    Items,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
