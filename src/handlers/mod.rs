//! # API Handlers
//!
//! This module contains all the HTTP endpoint handlers for the booking service.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::Json,
};

use crate::db;
use crate::error::{ApiError, ErrorType};
use crate::models::ServiceInfo;
use crate::repositories::{ArtistRepository, ShowRepository, VenueRepository};
use crate::server::AppState;

pub mod artists;
pub mod shows;
pub mod types;
pub mod venues;

use types::{HealthStatus, LandingPage, RecentListing};

/// Write response with a `Location` header pointing at the affected page.
pub type Located<T> = (StatusCode, [(header::HeaderName, String); 1], Json<T>);

/// Landing page: service information, totals and recent listings
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Landing page", body = LandingPage),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "root"
)]
pub async fn root(State(state): State<AppState>) -> Result<Json<LandingPage>, ApiError> {
    let ServiceInfo { service, version } = ServiceInfo::default();
    let venues = VenueRepository::new(&state.db);
    let artists = ArtistRepository::new(&state.db);

    Ok(Json(LandingPage {
        service,
        version,
        venue_count: venues.count().await?,
        artist_count: artists.count().await?,
        show_count: ShowRepository::new(&state.db).count().await?,
        recent_venues: venues
            .recent()
            .await?
            .into_iter()
            .map(RecentListing::from)
            .collect(),
        recent_artists: artists
            .recent()
            .await?
            .into_iter()
            .map(RecentListing::from)
            .collect(),
    }))
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/healthz",
    responses((status = 200, description = "Process is up", body = HealthStatus)),
    tag = "operational"
)]
pub async fn healthz() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}

/// Readiness probe; checks the database
#[utoipa::path(
    get,
    path = "/readyz",
    responses(
        (status = 200, description = "Ready to serve", body = HealthStatus),
        (status = 503, description = "Database unreachable", body = ApiError)
    ),
    tag = "operational"
)]
pub async fn readyz(State(state): State<AppState>) -> Result<Json<HealthStatus>, ApiError> {
    db::health_check(&state.db).await.map_err(|err| {
        tracing::warn!(error = ?err, "Readiness check failed");
        ApiError::from(ErrorType::ServiceUnavailable)
    })?;

    Ok(Json(HealthStatus::ok()))
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ErrorType::NotFound.into()
}
