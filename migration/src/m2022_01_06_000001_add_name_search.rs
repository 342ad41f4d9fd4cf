//! Migration to add the `name_search` column to venues and artists.
//!
//! Name search matches against this lowercased copy of `name`. Existing
//! rows are backfilled here with Unicode case folding, since SQLite's
//! `LOWER()` leaves non-ASCII letters untouched.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

const TABLES: [&str; 2] = ["venue", "artist"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in TABLES {
            if !manager.has_column(table, "name_search").await? {
                manager
                    .alter_table(
                        Table::alter()
                            .table(Alias::new(table))
                            .add_column(
                                ColumnDef::new(Named::NameSearch)
                                    .text()
                                    .not_null()
                                    .default(""),
                            )
                            .to_owned(),
                    )
                    .await?;
            }

            backfill(manager, table).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in TABLES {
            if !manager.has_column(table, "name_search").await? {
                continue;
            }

            manager
                .alter_table(
                    Table::alter()
                        .table(Alias::new(table))
                        .drop_column(Named::NameSearch)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}

async fn backfill(manager: &SchemaManager<'_>, table: &str) -> Result<(), DbErr> {
    let db = manager.get_connection();
    let backend = manager.get_database_backend();

    let select = Query::select()
        .columns([Named::Id, Named::Name])
        .from(Alias::new(table))
        .to_owned();

    for row in db.query_all(backend.build(&select)).await? {
        let id: i32 = row.try_get("", "id")?;
        let name: String = row.try_get("", "name")?;

        let update = Query::update()
            .table(Alias::new(table))
            .value(Named::NameSearch, name.to_lowercase())
            .and_where(Expr::col(Named::Id).eq(id))
            .to_owned();
        db.execute(backend.build(&update)).await?;
    }

    Ok(())
}

#[derive(DeriveIden)]
enum Named {
    Id,
    Name,
    NameSearch,
}
