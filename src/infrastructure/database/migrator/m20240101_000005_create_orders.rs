//! Migration to create orders and order_items tables

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::CustomerName).string_len(255).null())
                    .col(ColumnDef::new(Orders::CustomerPhone).string_len(32).null())
                    .col(ColumnDef::new(Orders::CustomerEmail).string_len(255).null())
                    .col(ColumnDef::new(Orders::Address).text().null())
                    .col(ColumnDef::new(Orders::Restaurant).string_len(255).null())
                    .col(ColumnDef::new(Orders::RestaurantId).string_len(64).null())
                    .col(ColumnDef::new(Orders::UserId).string_len(64).null())
                    .col(ColumnDef::new(Orders::PaymentSessionId).string_len(128).null())
                    .col(ColumnDef::new(Orders::PaymentMethod).string_len(32).null())
                    .col(ColumnDef::new(Orders::PaymentStatus).string_len(32).null())
                    .col(ColumnDef::new(Orders::Note).text().null())
                    .col(ColumnDef::new(Orders::InternalNotes).text().null())
                    .col(ColumnDef::new(Orders::DroneId).string_len(64).null())
                    .col(
                        ColumnDef::new(Orders::DronePath)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Orders::VnpayTransactionId).string_len(128).null())
                    .col(ColumnDef::new(Orders::ConfirmedAt).big_integer().null())
                    .col(ColumnDef::new(Orders::CancelledAt).big_integer().null())
                    .col(ColumnDef::new(Orders::ConfirmedBy).string_len(64).null())
                    .col(
                        ColumnDef::new(Orders::Status)
                            .string_len(20)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(Orders::Total)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Orders::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Orders::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderItems::OrderId).string_len(64).not_null())
                    .col(ColumnDef::new(OrderItems::ProductId).string_len(64).null())
                    .col(ColumnDef::new(OrderItems::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(OrderItems::Qty)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(OrderItems::Price)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(OrderItems::ProductName).string_len(255).null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_items_order")
                            .from(OrderItems::Table, OrderItems::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_restaurant_created")
                    .table(Orders::Table)
                    .col(Orders::RestaurantId)
                    .col(Orders::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_payment_session")
                    .table(Orders::Table)
                    .col(Orders::PaymentSessionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_order_items_order_id")
                    .table(OrderItems::Table)
                    .col(OrderItems::OrderId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Orders {
    Table,
    Id,
    CustomerName,
    CustomerPhone,
    CustomerEmail,
    Address,
    Restaurant,
    RestaurantId,
    UserId,
    PaymentSessionId,
    PaymentMethod,
    PaymentStatus,
    Note,
    InternalNotes,
    DroneId,
    DronePath,
    VnpayTransactionId,
    ConfirmedAt,
    CancelledAt,
    ConfirmedBy,
    Status,
    Total,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum OrderItems {
    Table,
    Id,
    OrderId,
    ProductId,
    Name,
    Qty,
    Price,
    ProductName,
}
