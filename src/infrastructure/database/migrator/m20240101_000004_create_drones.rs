//! Migration to create drones table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Drones::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Drones::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Drones::DroneCode).string_len(64).null())
                    .col(ColumnDef::new(Drones::RestaurantId).string_len(64).not_null())
                    .col(ColumnDef::new(Drones::RestaurantName).string_len(255).null())
                    .col(
                        ColumnDef::new(Drones::Status)
                            .string_len(20)
                            .not_null()
                            .default("Idle"),
                    )
                    .col(
                        ColumnDef::new(Drones::Battery)
                            .integer()
                            .not_null()
                            .default(100),
                    )
                    .col(ColumnDef::new(Drones::CurrentOrderId).string_len(64).null())
                    .col(ColumnDef::new(Drones::Lat).double().null())
                    .col(ColumnDef::new(Drones::Lng).double().null())
                    .col(
                        ColumnDef::new(Drones::SpeedMps)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Drones::UpdatedAt).big_integer().null())
                    .col(ColumnDef::new(Drones::LastMaintenance).big_integer().null())
                    .col(
                        ColumnDef::new(Drones::FlaggedForIssue)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Drones::IssueDescription).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_drones_restaurant_id")
                    .table(Drones::Table)
                    .col(Drones::RestaurantId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Drones::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Drones {
    Table,
    Id,
    DroneCode,
    RestaurantId,
    RestaurantName,
    Status,
    Battery,
    CurrentOrderId,
    Lat,
    Lng,
    SpeedMps,
    UpdatedAt,
    LastMaintenance,
    FlaggedForIssue,
    IssueDescription,
}
