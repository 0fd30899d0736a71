//! Migration to create notifications table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notifications::RestaurantId).string_len(64).not_null())
                    .col(ColumnDef::new(Notifications::OrderId).string_len(64).not_null())
                    .col(ColumnDef::new(Notifications::CustomerName).string_len(255).null())
                    .col(ColumnDef::new(Notifications::CustomerPhone).string_len(32).null())
                    .col(
                        ColumnDef::new(Notifications::Total)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Notifications::Status).string_len(20).not_null())
                    .col(ColumnDef::new(Notifications::Timestamp).big_integer().not_null())
                    .col(
                        ColumnDef::new(Notifications::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_restaurant_read")
                    .table(Notifications::Table)
                    .col(Notifications::RestaurantId)
                    .col(Notifications::IsRead)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Notifications {
    Table,
    Id,
    RestaurantId,
    OrderId,
    CustomerName,
    CustomerPhone,
    Total,
    Status,
    Timestamp,
    IsRead,
}
