//! Migration to create analytics table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Analytics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Analytics::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Analytics::RestaurantId).string_len(64).not_null())
                    .col(ColumnDef::new(Analytics::Period).string_len(10).not_null())
                    .col(ColumnDef::new(Analytics::Revenue).big_integer().not_null())
                    .col(ColumnDef::new(Analytics::Orders).big_integer().not_null())
                    .col(ColumnDef::new(Analytics::AvgOrderValue).big_integer().not_null())
                    .col(ColumnDef::new(Analytics::DeliveryTime).big_integer().not_null())
                    .col(ColumnDef::new(Analytics::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Analytics::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Analytics {
    Table,
    Id,
    RestaurantId,
    Period,
    Revenue,
    Orders,
    AvgOrderValue,
    DeliveryTime,
    CreatedAt,
}
