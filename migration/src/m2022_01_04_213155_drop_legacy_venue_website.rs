//! Migration to drop the legacy `venue.website` column.
//!
//! Early databases carried both `website` and `website_link` on venues;
//! only `website_link` is read. Fresh databases never had the column, so the
//! drop only runs when it is present.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if !manager.has_column("venue", "website").await? {
            return Ok(());
        }

        manager
            .alter_table(
                Table::alter()
                    .table(Venue::Table)
                    .drop_column(Venue::Website)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.has_column("venue", "website").await? {
            return Ok(());
        }

        manager
            .alter_table(
                Table::alter()
                    .table(Venue::Table)
                    .add_column(ColumnDef::new(Venue::Website).string_len(100).null())
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Venue {
    Table,
    Website,
}
