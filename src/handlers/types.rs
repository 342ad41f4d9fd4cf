//! # Common API Types
//!
//! Context documents returned by the venue, artist and show handlers, and the
//! helpers that build them from repository rows.

use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{artist, venue};
use crate::repositories::{ShowListingRow, ShowWithArtist, ShowWithVenue};

/// Outcome of a write, carrying the flash message shown to the user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActionResponse<T> {
    /// Flash message describing the outcome
    #[schema(example = "Venue The Musical Hop was successfully listed!")]
    pub message: String,
    pub data: T,
}

impl<T> ActionResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Search submission (`application/x-www-form-urlencoded`)
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct SearchForm {
    /// Substring to look for in names; empty matches everything
    #[serde(default)]
    pub search_term: String,
}

/// One search match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchHit {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: u64,
}

/// Search response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchHit>,
    pub search_term: String,
}

/// Venues in one (city, state) area
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CityVenues {
    #[schema(example = "San Francisco")]
    pub city: String,
    #[schema(example = "CA")]
    pub state: String,
    pub venues: Vec<SearchHit>,
}

/// Artist list entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
}

/// A show on a venue page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VenueShow {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl From<ShowWithArtist> for VenueShow {
    fn from(row: ShowWithArtist) -> Self {
        Self {
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            artist_image_link: row.artist_image_link,
            start_time: row.start_time.with_timezone(&Utc),
        }
    }
}

/// A show on an artist page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArtistShow {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl From<ShowWithVenue> for ArtistShow {
    fn from(row: ShowWithVenue) -> Self {
        Self {
            venue_id: row.venue_id,
            venue_name: row.venue_name,
            venue_image_link: row.venue_image_link,
            start_time: row.start_time.with_timezone(&Utc),
        }
    }
}

/// Shows page entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShowSummary {
    pub show_id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl From<ShowListingRow> for ShowSummary {
    fn from(row: ShowListingRow) -> Self {
        Self {
            show_id: row.show_id,
            venue_id: row.venue_id,
            venue_name: row.venue_name,
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            artist_image_link: row.artist_image_link,
            start_time: row.start_time.with_timezone(&Utc),
        }
    }
}

/// Venue page
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VenueDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: Option<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl VenueDetail {
    pub fn new(venue: venue::Model, shows: Vec<ShowWithArtist>, now: DateTime<Utc>) -> Self {
        let (past_shows, upcoming_shows) = split_by_start(shows, now, |s| &s.start_time);
        let past_shows: Vec<VenueShow> = past_shows.into_iter().map(Into::into).collect();
        let upcoming_shows: Vec<VenueShow> = upcoming_shows.into_iter().map(Into::into).collect();

        Self {
            genres: venue.genre_list(),
            id: venue.id,
            name: venue.name,
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website_link: venue.website_link,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

/// Artist page
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArtistDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ArtistDetail {
    pub fn new(artist: artist::Model, shows: Vec<ShowWithVenue>, now: DateTime<Utc>) -> Self {
        let (past_shows, upcoming_shows) = split_by_start(shows, now, |s| &s.start_time);
        let past_shows: Vec<ArtistShow> = past_shows.into_iter().map(Into::into).collect();
        let upcoming_shows: Vec<ArtistShow> = upcoming_shows.into_iter().map(Into::into).collect();

        Self {
            genres: artist.genre_list(),
            id: artist.id,
            name: artist.name,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website: artist.website,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

/// Edit page: the form prefilled from the stored row
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EditFormDocument<F> {
    pub id: i32,
    pub form: F,
}

/// A removed venue or artist
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedResource {
    pub id: i32,
    pub name: String,
}

/// Recently listed venue or artist on the landing page
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecentListing {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
}

impl From<venue::Model> for RecentListing {
    fn from(venue: venue::Model) -> Self {
        Self {
            id: venue.id,
            name: venue.name,
            city: venue.city,
            state: venue.state,
        }
    }
}

impl From<artist::Model> for RecentListing {
    fn from(artist: artist::Model) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
            city: artist.city,
            state: artist.state,
        }
    }
}

/// Landing page
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LandingPage {
    #[schema(example = "venue-booking")]
    pub service: String,
    #[schema(example = "0.1.0")]
    pub version: String,
    pub venue_count: u64,
    pub artist_count: u64,
    pub show_count: u64,
    pub recent_venues: Vec<RecentListing>,
    pub recent_artists: Vec<RecentListing>,
}

/// Liveness/readiness status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "ok")]
    pub status: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Splits rows into (past, upcoming). A show that starts exactly at `now`
/// counts as past.
pub fn split_by_start<T, F>(rows: Vec<T>, now: DateTime<Utc>, start: F) -> (Vec<T>, Vec<T>)
where
    F: Fn(&T) -> &DateTimeWithTimeZone,
{
    rows.into_iter().partition(|row| *start(row) <= now)
}
