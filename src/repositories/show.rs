//! # Show Repository
//!
//! Show bookings and the joins that resolve them to their artist and venue.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use serde::Serialize;

use crate::error::RepositoryError;
use crate::forms::NewShow;
use crate::models::{Artist, Show, Venue, artist, show, venue};

/// A show as listed on the shows page, with its own venue and artist resolved.
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct ShowListingRow {
    pub show_id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

/// A show at a venue, keyed by the performing artist.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct ShowWithArtist {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

/// A show by an artist, keyed by the hosting venue.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct ShowWithVenue {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

/// Ids bound into one `IN (...)` list. Stays under SQLite's historical
/// limit of 999 bind parameters per statement.
const MAX_IDS_PER_QUERY: usize = 900;

#[derive(Debug, FromQueryResult)]
struct UpcomingCount {
    owner_id: i32,
    upcoming: i64,
}

/// Repository for Show database operations
pub struct ShowRepository<'a, C> {
    db: &'a C,
}

impl<'a, C> ShowRepository<'a, C>
where
    C: ConnectionTrait,
{
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Show columns joined to each row's own venue and artist.
    fn listing_select() -> Select<Show> {
        Show::find()
            .select_only()
            .column(show::Column::ShowId)
            .column(show::Column::VenueId)
            .column_as(venue::Column::Name, "venue_name")
            .column(show::Column::ArtistId)
            .column_as(artist::Column::Name, "artist_name")
            .column_as(artist::Column::ImageLink, "artist_image_link")
            .column(show::Column::StartTime)
            .join(JoinType::InnerJoin, show::Relation::Venue.def())
            .join(JoinType::InnerJoin, show::Relation::Artist.def())
    }

    /// Every show, newest first.
    pub async fn list(&self) -> Result<Vec<ShowListingRow>, RepositoryError> {
        let rows = Self::listing_select()
            .order_by_desc(show::Column::StartTime)
            .order_by_desc(show::Column::ShowId)
            .into_model::<ShowListingRow>()
            .all(self.db)
            .await?;

        Ok(rows)
    }

    /// One show as it appears in the listing, or `NotFound`.
    pub async fn get_listing(&self, show_id: i32) -> Result<ShowListingRow, RepositoryError> {
        Self::listing_select()
            .filter(show::Column::ShowId.eq(show_id))
            .into_model::<ShowListingRow>()
            .one(self.db)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Show", show_id))
    }

    /// Shows hosted by `venue_id`, earliest first, with the performing artist.
    pub async fn for_venue(&self, venue_id: i32) -> Result<Vec<ShowWithArtist>, RepositoryError> {
        let rows = Show::find()
            .select_only()
            .column(show::Column::ArtistId)
            .column_as(artist::Column::Name, "artist_name")
            .column_as(artist::Column::ImageLink, "artist_image_link")
            .column(show::Column::StartTime)
            .join(JoinType::InnerJoin, show::Relation::Artist.def())
            .filter(show::Column::VenueId.eq(venue_id))
            .order_by_asc(show::Column::StartTime)
            .order_by_asc(show::Column::ShowId)
            .into_model::<ShowWithArtist>()
            .all(self.db)
            .await?;

        Ok(rows)
    }

    /// Shows performed by `artist_id`, earliest first, with the hosting venue.
    pub async fn for_artist(&self, artist_id: i32) -> Result<Vec<ShowWithVenue>, RepositoryError> {
        let rows = Show::find()
            .select_only()
            .column(show::Column::VenueId)
            .column_as(venue::Column::Name, "venue_name")
            .column_as(venue::Column::ImageLink, "venue_image_link")
            .column(show::Column::StartTime)
            .join(JoinType::InnerJoin, show::Relation::Venue.def())
            .filter(show::Column::ArtistId.eq(artist_id))
            .order_by_asc(show::Column::StartTime)
            .order_by_asc(show::Column::ShowId)
            .into_model::<ShowWithVenue>()
            .all(self.db)
            .await?;

        Ok(rows)
    }

    /// Upcoming show counts for every venue that has any, in one grouped query.
    pub async fn upcoming_counts_for_all_venues(
        &self,
        now: DateTime<Utc>,
    ) -> Result<HashMap<i32, u64>, RepositoryError> {
        self.grouped_upcoming_counts(show::Column::VenueId, None, now)
            .await
    }

    /// Upcoming show counts for each of `venue_ids`. Venues without upcoming
    /// shows are absent from the map.
    pub async fn upcoming_counts_by_venue(
        &self,
        venue_ids: &[i32],
        now: DateTime<Utc>,
    ) -> Result<HashMap<i32, u64>, RepositoryError> {
        self.upcoming_counts(show::Column::VenueId, venue_ids, now)
            .await
    }

    /// Upcoming show counts for each of `artist_ids`.
    pub async fn upcoming_counts_by_artist(
        &self,
        artist_ids: &[i32],
        now: DateTime<Utc>,
    ) -> Result<HashMap<i32, u64>, RepositoryError> {
        self.upcoming_counts(show::Column::ArtistId, artist_ids, now)
            .await
    }

    async fn upcoming_counts(
        &self,
        owner: show::Column,
        ids: &[i32],
        now: DateTime<Utc>,
    ) -> Result<HashMap<i32, u64>, RepositoryError> {
        let mut counts = HashMap::new();
        for chunk in ids.chunks(MAX_IDS_PER_QUERY) {
            counts.extend(
                self.grouped_upcoming_counts(owner, Some(chunk), now)
                    .await?,
            );
        }

        Ok(counts)
    }

    async fn grouped_upcoming_counts(
        &self,
        owner: show::Column,
        ids: Option<&[i32]>,
        now: DateTime<Utc>,
    ) -> Result<HashMap<i32, u64>, RepositoryError> {
        let mut query = Show::find()
            .select_only()
            .column_as(owner, "owner_id")
            .column_as(Expr::col(show::Column::ShowId).count(), "upcoming")
            .filter(show::Column::StartTime.gt(now.fixed_offset()))
            .group_by(owner);
        if let Some(ids) = ids {
            query = query.filter(owner.is_in(ids.iter().copied()));
        }

        let counts = query.into_model::<UpcomingCount>().all(self.db).await?;

        Ok(counts
            .into_iter()
            .map(|row| (row.owner_id, u64::try_from(row.upcoming).unwrap_or_default()))
            .collect())
    }

    /// Books a show after checking that its artist and venue exist.
    pub async fn create(&self, new_show: NewShow) -> Result<show::Model, RepositoryError> {
        if Artist::find_by_id(new_show.artist_id)
            .one(self.db)
            .await?
            .is_none()
        {
            return Err(RepositoryError::InvalidReference {
                field: "artist_id",
                entity: "Artist",
                id: new_show.artist_id,
            });
        }

        if Venue::find_by_id(new_show.venue_id)
            .one(self.db)
            .await?
            .is_none()
        {
            return Err(RepositoryError::InvalidReference {
                field: "venue_id",
                entity: "Venue",
                id: new_show.venue_id,
            });
        }

        let show = new_show.into_active_model().insert(self.db).await?;
        Ok(show)
    }

    pub async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(Show::find().count(self.db).await?)
    }
}
