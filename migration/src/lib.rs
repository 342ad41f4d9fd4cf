//! Database migrations for the venue booking service.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2022_01_04_000001_create_venue;
mod m2022_01_04_000002_create_artist;
mod m2022_01_04_000003_create_show;
mod m2022_01_04_213155_drop_legacy_venue_website;
mod m2022_01_05_065926_add_artist_profile_columns;
mod m2022_01_06_000001_add_name_search;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2022_01_04_000001_create_venue::Migration),
            Box::new(m2022_01_04_000002_create_artist::Migration),
            Box::new(m2022_01_04_000003_create_show::Migration),
            Box::new(m2022_01_04_213155_drop_legacy_venue_website::Migration),
            Box::new(m2022_01_05_065926_add_artist_profile_columns::Migration),
            Box::new(m2022_01_06_000001_add_name_search::Migration),
        ]
    }
}
