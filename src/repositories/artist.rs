//! # Artist Repository
//!
//! This module contains the repository implementation for Artist entities.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use super::{RECENT_LIMIT, name_contains};
use crate::error::RepositoryError;
use crate::forms::ArtistForm;
use crate::models::{Artist, Show, artist, show};

/// Repository for Artist database operations
pub struct ArtistRepository<'a, C> {
    db: &'a C,
}

impl<'a, C> ArtistRepository<'a, C>
where
    C: ConnectionTrait,
{
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Get an artist by id, or `NotFound`
    pub async fn get(&self, id: i32) -> Result<artist::Model, RepositoryError> {
        Artist::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Artist", id))
    }

    /// All artists ordered by name then id
    pub async fn list(&self) -> Result<Vec<artist::Model>, RepositoryError> {
        let artists = Artist::find()
            .order_by_asc(artist::Column::Name)
            .order_by_asc(artist::Column::Id)
            .all(self.db)
            .await?;

        Ok(artists)
    }

    /// Artists whose name contains `term`, ignoring case
    pub async fn search_by_name(&self, term: &str) -> Result<Vec<artist::Model>, RepositoryError> {
        let artists = Artist::find()
            .filter(name_contains((artist::Entity, artist::Column::NameSearch), term))
            .order_by_asc(artist::Column::Name)
            .order_by_asc(artist::Column::Id)
            .all(self.db)
            .await?;

        Ok(artists)
    }

    pub async fn recent(&self) -> Result<Vec<artist::Model>, RepositoryError> {
        let artists = Artist::find()
            .order_by_desc(artist::Column::Id)
            .limit(RECENT_LIMIT)
            .all(self.db)
            .await?;

        Ok(artists)
    }

    pub async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(Artist::find().count(self.db).await?)
    }

    pub async fn create(&self, form: ArtistForm) -> Result<artist::Model, RepositoryError> {
        let artist = form.into_active_model().insert(self.db).await?;
        Ok(artist)
    }

    /// Overwrite the artist identified by `id` with a validated form
    pub async fn update(&self, id: i32, form: ArtistForm) -> Result<artist::Model, RepositoryError> {
        let mut active_artist = self.get(id).await?.into_active_model();
        form.apply_to(&mut active_artist);

        let artist = active_artist.update(self.db).await?;
        Ok(artist)
    }

    /// Delete an artist together with its shows, returning the deleted row
    pub async fn delete(&self, id: i32) -> Result<artist::Model, RepositoryError> {
        let artist = self.get(id).await?;

        Show::delete_many()
            .filter(show::Column::ArtistId.eq(id))
            .exec(self.db)
            .await?;
        artist.clone().delete(self.db).await?;

        Ok(artist)
    }
}
