//! # Venue Repository
//!
//! This module contains the repository implementation for Venue entities,
//! providing lookup, search, grouped listing and write operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use super::{RECENT_LIMIT, name_contains};
use crate::error::RepositoryError;
use crate::forms::VenueForm;
use crate::models::{Show, Venue, show, venue};

/// Venues sharing one (city, state) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CityGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<venue::Model>,
}

/// Repository for Venue database operations
pub struct VenueRepository<'a, C> {
    db: &'a C,
}

impl<'a, C> VenueRepository<'a, C>
where
    C: ConnectionTrait,
{
    /// Create a new VenueRepository over a pool or transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Get a venue by id, or `NotFound`
    pub async fn get(&self, id: i32) -> Result<venue::Model, RepositoryError> {
        Venue::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Venue", id))
    }

    /// All venues grouped by (city, state). Groups are ordered by city then
    /// state, venues within a group by name then id.
    pub async fn list_grouped_by_city(&self) -> Result<Vec<CityGroup>, RepositoryError> {
        let venues = Venue::find()
            .order_by_asc(venue::Column::City)
            .order_by_asc(venue::Column::State)
            .order_by_asc(venue::Column::Name)
            .order_by_asc(venue::Column::Id)
            .all(self.db)
            .await?;

        let mut groups: Vec<CityGroup> = Vec::new();
        for venue in venues {
            match groups.last_mut() {
                Some(group) if group.city == venue.city && group.state == venue.state => {
                    group.venues.push(venue);
                }
                _ => groups.push(CityGroup {
                    city: venue.city.clone(),
                    state: venue.state.clone(),
                    venues: vec![venue],
                }),
            }
        }

        Ok(groups)
    }

    /// Venues whose name contains `term`, ignoring case
    pub async fn search_by_name(&self, term: &str) -> Result<Vec<venue::Model>, RepositoryError> {
        let venues = Venue::find()
            .filter(name_contains((venue::Entity, venue::Column::NameSearch), term))
            .order_by_asc(venue::Column::Name)
            .order_by_asc(venue::Column::Id)
            .all(self.db)
            .await?;

        Ok(venues)
    }

    /// Most recently listed venues, newest first
    pub async fn recent(&self) -> Result<Vec<venue::Model>, RepositoryError> {
        let venues = Venue::find()
            .order_by_desc(venue::Column::Id)
            .limit(RECENT_LIMIT)
            .all(self.db)
            .await?;

        Ok(venues)
    }

    pub async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(Venue::find().count(self.db).await?)
    }

    /// Insert a new venue from a validated form
    pub async fn create(&self, form: VenueForm) -> Result<venue::Model, RepositoryError> {
        let venue = form.into_active_model().insert(self.db).await?;
        Ok(venue)
    }

    /// Overwrite the venue identified by `id` with a validated form
    pub async fn update(&self, id: i32, form: VenueForm) -> Result<venue::Model, RepositoryError> {
        let mut active_venue = self.get(id).await?.into_active_model();
        form.apply_to(&mut active_venue);

        let venue = active_venue.update(self.db).await?;
        Ok(venue)
    }

    /// Delete a venue together with its shows, returning the deleted row
    pub async fn delete(&self, id: i32) -> Result<venue::Model, RepositoryError> {
        let venue = self.get(id).await?;

        Show::delete_many()
            .filter(show::Column::VenueId.eq(id))
            .exec(self.db)
            .await?;
        venue.clone().delete(self.db).await?;

        Ok(venue)
    }
}
