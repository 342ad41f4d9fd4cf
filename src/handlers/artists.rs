//! # Artist Handlers
//!
//! List, search, detail and write endpoints for artists.

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
    ActionResponse, ArtistDetail, ArtistSummary, DeletedResource, EditFormDocument, SearchForm,
    SearchHit, SearchResults,
};
use crate::error::{ApiError, persistence_failure};
use crate::forms::ArtistForm;
use crate::repositories::{ArtistRepository, ShowRepository};
use crate::server::AppState;

fn detail_location(id: i32) -> String {
    format!("/artists/{}", id)
}

/// List artists
#[utoipa::path(
    get,
    path = "/artists",
    responses(
        (status = 200, description = "All artists ordered by name", body = Vec<ArtistSummary>),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "artists"
)]
pub async fn list_artists(
    State(state): State<AppState>,
) -> Result<Json<Vec<ArtistSummary>>, ApiError> {
    let artists = ArtistRepository::new(&state.db).list().await?;

    Ok(Json(
        artists
            .into_iter()
            .map(|artist| ArtistSummary {
                id: artist.id,
                name: artist.name,
            })
            .collect(),
    ))
}

/// Search artists by name (case-insensitive substring)
#[utoipa::path(
    post,
    path = "/artists/search",
    request_body(content = SearchForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Matching artists", body = SearchResults),
        (status = 400, description = "Malformed form body", body = ApiError)
    ),
    tag = "artists"
)]
pub async fn search_artists(
    State(state): State<AppState>,
    form: Result<Form<SearchForm>, FormRejection>,
) -> Result<Json<SearchResults>, ApiError> {
    let Form(SearchForm { search_term }) = form?;
    let now = Utc::now();

    let artists = ArtistRepository::new(&state.db)
        .search_by_name(search_term.trim())
        .await?;
    let artist_ids: Vec<i32> = artists.iter().map(|artist| artist.id).collect();
    let upcoming = ShowRepository::new(&state.db)
        .upcoming_counts_by_artist(&artist_ids, now)
        .await?;

    let data: Vec<SearchHit> = artists
        .into_iter()
        .map(|artist| SearchHit {
            num_upcoming_shows: upcoming.get(&artist.id).copied().unwrap_or(0),
            id: artist.id,
            name: artist.name,
        })
        .collect();

    Ok(Json(SearchResults {
        count: data.len(),
        data,
        search_term,
    }))
}

/// Artist page with past and upcoming shows
#[utoipa::path(
    get,
    path = "/artists/{id}",
    params(("id" = i32, Path, description = "Artist id")),
    responses(
        (status = 200, description = "Artist found", body = ArtistDetail),
        (status = 404, description = "Artist not found", body = ApiError)
    ),
    tag = "artists"
)]
pub async fn show_artist(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ArtistDetail>, ApiError> {
    let Path(id) = id?;
    let now = Utc::now();

    let artist = ArtistRepository::new(&state.db).get(id).await?;
    let shows = ShowRepository::new(&state.db).for_artist(id).await?;

    Ok(Json(ArtistDetail::new(artist, shows, now)))
}

/// Blank artist form
#[utoipa::path(
    get,
    path = "/artists/create",
    responses((status = 200, description = "Empty artist form", body = ArtistForm)),
    tag = "artists"
)]
pub async fn create_artist_form() -> Json<ArtistForm> {
    Json(ArtistForm::default())
}

/// List a new artist
#[utoipa::path(
    post,
    path = "/artists/create",
    request_body = ArtistForm,
    responses(
        (status = 201, description = "Artist listed", body = ActionResponse<ArtistDetail>, headers(
            ("Location", description = "URL of the artist page")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 500, description = "Artist could not be listed", body = ApiError)
    ),
    tag = "artists"
)]
pub async fn create_artist(
    State(state): State<AppState>,
    payload: Result<Json<ArtistForm>, JsonRejection>,
) -> Result<Located<ActionResponse<ArtistDetail>>, ApiError> {
    let Json(form) = payload?;
    let form = form.validated()?;
    let name = form.name.clone();
    let failure = format!("An error occurred. Artist {} could not be listed.", name);

    let txn = state
        .db
        .begin()
        .await
        .map_err(|e| persistence_failure(e.into(), failure.clone()))?;
    let artist = ArtistRepository::new(&txn)
        .create(form)
        .await
        .map_err(|e| persistence_failure(e, failure.clone()))?;
    txn.commit()
        .await
        .map_err(|e| persistence_failure(e.into(), failure.clone()))?;

    counter!("artists_listed_total").increment(1);
    tracing::info!(artist_id = artist.id, "Artist listed");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, detail_location(artist.id))],
        Json(ActionResponse::new(
            format!("Artist {} was successfully listed!", name),
            ArtistDetail::new(artist, Vec::new(), Utc::now()),
        )),
    ))
}

/// Artist form prefilled from the stored row
#[utoipa::path(
    get,
    path = "/artists/{id}/edit",
    params(("id" = i32, Path, description = "Artist id")),
    responses(
        (status = 200, description = "Prefilled artist form", body = EditFormDocument<ArtistForm>),
        (status = 404, description = "Artist not found", body = ApiError)
    ),
    tag = "artists"
)]
pub async fn edit_artist_form(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<EditFormDocument<ArtistForm>>, ApiError> {
    let Path(id) = id?;
    let artist = ArtistRepository::new(&state.db).get(id).await?;

    Ok(Json(EditFormDocument {
        id,
        form: ArtistForm::from(&artist),
    }))
}

/// Update the artist named in the path
#[utoipa::path(
    post,
    path = "/artists/{id}/edit",
    params(("id" = i32, Path, description = "Artist id")),
    request_body = ArtistForm,
    responses(
        (status = 200, description = "Artist updated", body = ActionResponse<EditFormDocument<ArtistForm>>, headers(
            ("Location", description = "URL of the artist page")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Artist not found", body = ApiError),
        (status = 500, description = "Artist could not be updated", body = ApiError)
    ),
    tag = "artists"
)]
pub async fn edit_artist(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ArtistForm>, JsonRejection>,
) -> Result<Located<ActionResponse<EditFormDocument<ArtistForm>>>, ApiError> {
    let Path(id) = id?;
    let Json(form) = payload?;
    let form = form.validated()?;
    let failure = format!("An error occurred. Artist {} could not be updated.", form.name);

    let txn = state
        .db
        .begin()
        .await
        .map_err(|e| persistence_failure(e.into(), failure.clone()))?;
    let artist = ArtistRepository::new(&txn)
        .update(id, form)
        .await
        .map_err(|e| persistence_failure(e, failure.clone()))?;
    txn.commit()
        .await
        .map_err(|e| persistence_failure(e.into(), failure.clone()))?;

    counter!("artists_updated_total").increment(1);
    tracing::info!(artist_id = artist.id, "Artist updated");

    Ok((
        StatusCode::OK,
        [(header::LOCATION, detail_location(artist.id))],
        Json(ActionResponse::new(
            format!("Artist {} was successfully updated!", artist.name),
            EditFormDocument {
                id: artist.id,
                form: ArtistForm::from(&artist),
            },
        )),
    ))
}

/// Delete an artist and their shows
#[utoipa::path(
    post,
    path = "/artists/{id}/delete",
    params(("id" = i32, Path, description = "Artist id")),
    responses(
        (status = 200, description = "Artist deleted", body = ActionResponse<DeletedResource>),
        (status = 404, description = "Artist not found", body = ApiError),
        (status = 500, description = "Artist could not be deleted", body = ApiError)
    ),
    tag = "artists"
)]
pub async fn delete_artist(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ActionResponse<DeletedResource>>, ApiError> {
    let Path(id) = id?;
    let name = ArtistRepository::new(&state.db).get(id).await?.name;
    let failure = format!("An error occurred. Artist {} could not be deleted.", name);

    let txn = state
        .db
        .begin()
        .await
        .map_err(|e| persistence_failure(e.into(), failure.clone()))?;
    let artist = ArtistRepository::new(&txn)
        .delete(id)
        .await
        .map_err(|e| persistence_failure(e, failure.clone()))?;
    txn.commit()
        .await
        .map_err(|e| persistence_failure(e.into(), failure.clone()))?;

    counter!("artists_deleted_total").increment(1);
    tracing::info!(artist_id = id, "Artist deleted");

    Ok(Json(ActionResponse::new(
        format!("Artist {} was successfully deleted.", artist.name),
        DeletedResource {
            id: artist.id,
            name: artist.name,
        },
    )))
}
