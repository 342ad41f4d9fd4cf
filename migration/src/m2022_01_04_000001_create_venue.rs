//! Migration to create the venue table.
//!
//! Venues are bookable locations grouped by city and state on the listing
//! page. Genres are stored as a JSON array so the schema works on both
//! Postgres and SQLite.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Venue::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Venue::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Venue::Name).text().not_null())
                    .col(ColumnDef::new(Venue::City).string_len(120).not_null())
                    .col(ColumnDef::new(Venue::State).string_len(120).not_null())
                    .col(ColumnDef::new(Venue::Address).string_len(120).null())
                    .col(ColumnDef::new(Venue::Phone).string_len(120).null())
                    .col(ColumnDef::new(Venue::Genres).json_binary().not_null())
                    .col(ColumnDef::new(Venue::ImageLink).string_len(200).null())
                    .col(ColumnDef::new(Venue::FacebookLink).string_len(120).null())
                    .col(ColumnDef::new(Venue::WebsiteLink).string_len(100).null())
                    .col(
                        ColumnDef::new(Venue::SeekingTalent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Venue::SeekingDescription)
                            .string_len(300)
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Backs the (city, state) grouping on the venue listing
        manager
            .create_index(
                Index::create()
                    .name("idx_venue_city_state")
                    .table(Venue::Table)
                    .col(Venue::City)
                    .col(Venue::State)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_venue_city_state")
                    .table(Venue::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Venue::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Venue {
    Table,
    Id,
    Name,
    City,
    State,
    Address,
    Phone,
    Genres,
    ImageLink,
    FacebookLink,
    WebsiteLink,
    SeekingTalent,
    SeekingDescription,
}
