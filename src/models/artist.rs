//! Artist entity model
//!
//! This module contains the SeaORM entity model for the artist table.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

use super::genres_from_json;

/// Artist entity representing a bookable performer
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "artist")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// Lowercased `name`, matched by name search
    pub name_search: String,

    pub city: String,

    pub state: String,

    pub phone: Option<String>,

    /// Genres the artist performs (stored as JSON array of strings)
    #[sea_orm(column_type = "JsonBinary")]
    pub genres: JsonValue,

    pub image_link: Option<String>,

    pub facebook_link: Option<String>,

    pub website: Option<String>,

    /// Whether the artist is looking for venues
    pub seeking_venue: bool,

    pub seeking_description: Option<String>,
}

impl Model {
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
