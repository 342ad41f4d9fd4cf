//! # Show Handlers

use axum::{
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::Json,
};
use chrono::Utc;
use metrics::counter;
use sea_orm::TransactionTrait;

use super::Located;
use super::types::{ActionResponse, ShowSummary};
use crate::error::{ApiError, persistence_failure};
use crate::forms::ShowForm;
use crate::repositories::ShowRepository;
use crate::server::AppState;

const LISTING_FAILED: &str = "An error occurred. Show could not be listed.";

/// List every show with its venue and artist
#[utoipa::path(
    get,
    path = "/shows",
    responses(
        (status = 200, description = "Shows, newest first", body = Vec<ShowSummary>),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "shows"
)]
pub async fn list_shows(State(state): State<AppState>) -> Result<Json<Vec<ShowSummary>>, ApiError> {
    let shows = ShowRepository::new(&state.db).list().await?;

    Ok(Json(shows.into_iter().map(ShowSummary::from).collect()))
}

/// Show form with the start time set to now
#[utoipa::path(
    get,
    path = "/shows/create",
    responses((status = 200, description = "Prefilled show form", body = ShowForm)),
    tag = "shows"
)]
pub async fn create_show_form() -> Json<ShowForm> {
    Json(ShowForm::prefilled(Utc::now()))
}

/// Book a show
#[utoipa::path(
    post,
    path = "/shows/create",
    request_body = ShowForm,
    responses(
        (status = 201, description = "Show listed", body = ActionResponse<ShowSummary>, headers(
            ("Location", description = "URL of the shows page")
        )),
        (status = 400, description = "Validation failed or unknown artist/venue", body = ApiError),
        (status = 500, description = "Show could not be listed", body = ApiError)
    ),
    tag = "shows"
)]
pub async fn create_show(
    State(state): State<AppState>,
    payload: Result<Json<ShowForm>, JsonRejection>,
) -> Result<Located<ActionResponse<ShowSummary>>, ApiError> {
    let Json(form) = payload?;
    let new_show = form.validated()?;

    let txn = state
        .db
        .begin()
        .await
        .map_err(|e| persistence_failure(e.into(), LISTING_FAILED))?;
    let repo = ShowRepository::new(&txn);
    let show = repo
        .create(new_show)
        .await
        .map_err(|e| persistence_failure(e, LISTING_FAILED))?;
    let listing = repo
        .get_listing(show.show_id)
        .await
        .map_err(|e| persistence_failure(e, LISTING_FAILED))?;
    txn.commit()
        .await
        .map_err(|e| persistence_failure(e.into(), LISTING_FAILED))?;

    counter!("shows_listed_total").increment(1);
    tracing::info!(
        show_id = show.show_id,
        artist_id = show.artist_id,
        venue_id = show.venue_id,
        "Show listed"
    );

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, "/shows".to_string())],
        Json(ActionResponse::new(
            "Show was successfully listed!",
            ShowSummary::from(listing),
        )),
    ))
}
