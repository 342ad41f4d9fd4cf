//! # Venue Handlers
//!
//! List, search, detail and write endpoints for venues.

use axum::{
    Form,
    extract::{
        Path, State,
        rejection::{FormRejection, JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::Json,
};
use chrono::Utc;
use metrics::counter;
use sea_orm::TransactionTrait;

use super::Located;
use super::types::{
    ActionResponse, CityVenues, DeletedResource, EditFormDocument, SearchForm, SearchHit,
    SearchResults, VenueDetail,
};
use crate::error::{ApiError, persistence_failure};
use crate::forms::VenueForm;
use crate::repositories::{ShowRepository, VenueRepository};
use crate::server::AppState;

fn detail_location(id: i32) -> String {
    format!("/venues/{}", id)
}

/// List venues grouped by city and state
#[utoipa::path(
    get,
    path = "/venues",
    responses(
        (status = 200, description = "Venues grouped by area", body = Vec<CityVenues>),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "venues"
)]
pub async fn list_venues(State(state): State<AppState>) -> Result<Json<Vec<CityVenues>>, ApiError> {
    let now = Utc::now();
    let groups = VenueRepository::new(&state.db)
        .list_grouped_by_city()
        .await?;

    let upcoming = ShowRepository::new(&state.db)
        .upcoming_counts_for_all_venues(now)
        .await?;

    let areas = groups
        .into_iter()
        .map(|group| CityVenues {
            city: group.city,
            state: group.state,
            venues: group
                .venues
                .into_iter()
                .map(|venue| SearchHit {
                    num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
                    id: venue.id,
                    name: venue.name,
                })
                .collect(),
        })
        .collect();

    Ok(Json(areas))
}

/// Search venues by name (case-insensitive substring)
#[utoipa::path(
    post,
    path = "/venues/search",
    request_body(content = SearchForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Matching venues", body = SearchResults),
        (status = 400, description = "Malformed form body", body = ApiError)
    ),
    tag = "venues"
)]
pub async fn search_venues(
    State(state): State<AppState>,
    form: Result<Form<SearchForm>, FormRejection>,
) -> Result<Json<SearchResults>, ApiError> {
    let Form(SearchForm { search_term }) = form?;
    let now = Utc::now();

    let venues = VenueRepository::new(&state.db)
        .search_by_name(search_term.trim())
        .await?;
    let venue_ids: Vec<i32> = venues.iter().map(|venue| venue.id).collect();
    let upcoming = ShowRepository::new(&state.db)
        .upcoming_counts_by_venue(&venue_ids, now)
        .await?;

    let data: Vec<SearchHit> = venues
        .into_iter()
        .map(|venue| SearchHit {
            num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
            id: venue.id,
            name: venue.name,
        })
        .collect();

    Ok(Json(SearchResults {
        count: data.len(),
        data,
        search_term,
    }))
}

/// Venue page with past and upcoming shows
#[utoipa::path(
    get,
    path = "/venues/{id}",
    params(("id" = i32, Path, description = "Venue id")),
    responses(
        (status = 200, description = "Venue found", body = VenueDetail),
        (status = 404, description = "Venue not found", body = ApiError)
    ),
    tag = "venues"
)]
pub async fn show_venue(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<VenueDetail>, ApiError> {
    let Path(id) = id?;
    let now = Utc::now();

    let venue = VenueRepository::new(&state.db).get(id).await?;
    let shows = ShowRepository::new(&state.db).for_venue(id).await?;

    Ok(Json(VenueDetail::new(venue, shows, now)))
}

/// Blank venue form
#[utoipa::path(
    get,
    path = "/venues/create",
    responses((status = 200, description = "Empty venue form", body = VenueForm)),
    tag = "venues"
)]
pub async fn create_venue_form() -> Json<VenueForm> {
    Json(VenueForm::default())
}

/// List a new venue
#[utoipa::path(
    post,
    path = "/venues/create",
    request_body = VenueForm,
    responses(
        (status = 201, description = "Venue listed", body = ActionResponse<VenueDetail>, headers(
            ("Location", description = "URL of the venue page")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 500, description = "Venue could not be listed", body = ApiError)
    ),
    tag = "venues"
)]
pub async fn create_venue(
    State(state): State<AppState>,
    payload: Result<Json<VenueForm>, JsonRejection>,
) -> Result<Located<ActionResponse<VenueDetail>>, ApiError> {
    let Json(form) = payload?;
    let form = form.validated()?;
    let name = form.name.clone();
    let failure = format!("An error occurred. Venue {} could not be listed.", name);

    let txn = state
        .db
        .begin()
        .await
        .map_err(|e| persistence_failure(e.into(), failure.clone()))?;
    let venue = VenueRepository::new(&txn)
        .create(form)
        .await
        .map_err(|e| persistence_failure(e, failure.clone()))?;
    txn.commit()
        .await
        .map_err(|e| persistence_failure(e.into(), failure.clone()))?;

    counter!("venues_listed_total").increment(1);
    tracing::info!(venue_id = venue.id, "Venue listed");

    let location = detail_location(venue.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ActionResponse::new(
            format!("Venue {} was successfully listed!", name),
            VenueDetail::new(venue, Vec::new(), Utc::now()),
        )),
    ))
}

/// Venue form prefilled from the stored row
#[utoipa::path(
    get,
    path = "/venues/{id}/edit",
    params(("id" = i32, Path, description = "Venue id")),
    responses(
        (status = 200, description = "Prefilled venue form", body = EditFormDocument<VenueForm>),
        (status = 404, description = "Venue not found", body = ApiError)
    ),
    tag = "venues"
)]
pub async fn edit_venue_form(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<EditFormDocument<VenueForm>>, ApiError> {
    let Path(id) = id?;
    let venue = VenueRepository::new(&state.db).get(id).await?;

    Ok(Json(EditFormDocument {
        id,
        form: VenueForm::from(&venue),
    }))
}

/// Update the venue named in the path
#[utoipa::path(
    post,
    path = "/venues/{id}/edit",
    params(("id" = i32, Path, description = "Venue id")),
    request_body = VenueForm,
    responses(
        (status = 200, description = "Venue updated", body = ActionResponse<EditFormDocument<VenueForm>>, headers(
            ("Location", description = "URL of the venue page")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Venue not found", body = ApiError),
        (status = 500, description = "Venue could not be updated", body = ApiError)
    ),
    tag = "venues"
)]
pub async fn edit_venue(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<VenueForm>, JsonRejection>,
) -> Result<Located<ActionResponse<EditFormDocument<VenueForm>>>, ApiError> {
    let Path(id) = id?;
    let Json(form) = payload?;
    let form = form.validated()?;
    let failure = format!("An error occurred. Venue {} could not be updated.", form.name);

    let txn = state
        .db
        .begin()
        .await
        .map_err(|e| persistence_failure(e.into(), failure.clone()))?;
    let venue = VenueRepository::new(&txn)
        .update(id, form)
        .await
        .map_err(|e| persistence_failure(e, failure.clone()))?;
    txn.commit()
        .await
        .map_err(|e| persistence_failure(e.into(), failure.clone()))?;

    counter!("venues_updated_total").increment(1);
    tracing::info!(venue_id = venue.id, "Venue updated");

    Ok((
        StatusCode::OK,
        [(header::LOCATION, detail_location(venue.id))],
        Json(ActionResponse::new(
            format!("Venue {} was successfully updated!", venue.name),
            EditFormDocument {
                id: venue.id,
                form: VenueForm::from(&venue),
            },
        )),
    ))
}

/// Delete a venue and its shows
#[utoipa::path(
    post,
    path = "/venues/{id}/delete",
    params(("id" = i32, Path, description = "Venue id")),
    responses(
        (status = 200, description = "Venue deleted", body = ActionResponse<DeletedResource>),
        (status = 404, description = "Venue not found", body = ApiError),
        (status = 500, description = "Venue could not be deleted", body = ApiError)
    ),
    tag = "venues"
)]
pub async fn delete_venue(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ActionResponse<DeletedResource>>, ApiError> {
    let Path(id) = id?;
    let name = VenueRepository::new(&state.db).get(id).await?.name;
    let failure = format!("An error occurred. Venue {} could not be deleted.", name);

    let txn = state
        .db
        .begin()
        .await
        .map_err(|e| persistence_failure(e.into(), failure.clone()))?;
    let venue = VenueRepository::new(&txn)
        .delete(id)
        .await
        .map_err(|e| persistence_failure(e, failure.clone()))?;
    txn.commit()
        .await
        .map_err(|e| persistence_failure(e.into(), failure.clone()))?;

    counter!("venues_deleted_total").increment(1);
    tracing::info!(venue_id = id, "Venue deleted");

    Ok(Json(ActionResponse::new(
        format!("Venue {} was successfully deleted.", venue.name),
        DeletedResource {
            id: venue.id,
            name: venue.name,
        },
    )))
}
