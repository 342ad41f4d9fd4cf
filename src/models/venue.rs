//! Venue entity model
//!
//! This module contains the SeaORM entity model for the venue table,
//! which stores bookable locations and their profile details.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

use super::genres_from_json;

/// Venue entity representing a bookable location
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "venue")]
pub struct Model {
    /// Unique identifier for the venue (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name of the venue
    pub name: String,

    /// Lowercased `name`, matched by name search
    pub name_search: String,

    pub city: String,

    pub state: String,

    pub address: Option<String>,

    pub phone: Option<String>,

    /// Genres hosted by the venue (stored as JSON array of strings)
    #[sea_orm(column_type = "JsonBinary")]
    pub genres: JsonValue,

    pub image_link: Option<String>,

    pub facebook_link: Option<String>,

    pub website_link: Option<String>,

    /// Whether the venue is looking for artists to book
    pub seeking_talent: bool,

    pub seeking_description: Option<String>,
}

impl Model {
    /// Genres as a list; non-string entries are skipped.
    pub fn genre_list(&self) -> Vec<String> {
        genres_from_json(&self.genres)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::show::Entity")]
    Show,
}

impl Related<super::show::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Show.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
