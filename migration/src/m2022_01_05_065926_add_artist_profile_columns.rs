//! Migration to add the social and booking columns to artists.
//!
//! Adds `facebook_link`, `website`, `seeking_venue` and
//! `seeking_description`. SQLite accepts a single change per
//! `ALTER TABLE`, so each column is added in its own statement.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let columns = [
            (
                "facebook_link",
                ColumnDef::new(Artist::FacebookLink)
                    .string_len(120)
                    .null()
                    .to_owned(),
            ),
            (
                "website",
                ColumnDef::new(Artist::Website).string_len(200).null().to_owned(),
            ),
            (
                "seeking_venue",
                ColumnDef::new(Artist::SeekingVenue)
                    .boolean()
                    .not_null()
                    .default(false)
                    .to_owned(),
            ),
            (
                "seeking_description",
                ColumnDef::new(Artist::SeekingDescription)
                    .string_len(500)
                    .null()
                    .to_owned(),
            ),
        ];

        for (name, mut column) in columns {
            if manager.has_column("artist", name).await? {
                continue;
            }

            manager
                .alter_table(
                    Table::alter()
                        .table(Artist::Table)
                        .add_column(&mut column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let columns = [
            ("seeking_description", Artist::SeekingDescription),
            ("seeking_venue", Artist::SeekingVenue),
            ("website", Artist::Website),
            ("facebook_link", Artist::FacebookLink),
        ];

        for (name, column) in columns {
            if !manager.has_column("artist", name).await? {
                continue;
            }

            manager
                .alter_table(
                    Table::alter()
                        .table(Artist::Table)
                        .drop_column(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Artist {
    Table,
    FacebookLink,
    Website,
    SeekingVenue,
    SeekingDescription,
}
