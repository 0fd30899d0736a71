//! Migration to create restaurants table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Restaurants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Restaurants::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Restaurants::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Restaurants::Description).text().null())
                    .col(ColumnDef::new(Restaurants::Category).string_len(64).null())
                    .col(ColumnDef::new(Restaurants::Location).string_len(255).null())
                    .col(
                        ColumnDef::new(Restaurants::Rating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Restaurants::ThemePrimary).string_len(32).null())
                    .col(ColumnDef::new(Restaurants::ThemeSecondary).string_len(32).null())
                    .col(ColumnDef::new(Restaurants::ThemeAccent).string_len(32).null())
                    .col(ColumnDef::new(Restaurants::OwnerId).string_len(64).null())
                    .col(
                        ColumnDef::new(Restaurants::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Restaurants::CreatedAt).big_integer().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_restaurants_owner_id")
                    .table(Restaurants::Table)
                    .col(Restaurants::OwnerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Restaurants::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Restaurants {
    Table,
    Id,
    Name,
    Description,
    Category,
    Location,
    Rating,
    ThemePrimary,
    ThemeSecondary,
    ThemeAccent,
    OwnerId,
    IsActive,
    CreatedAt,
}
