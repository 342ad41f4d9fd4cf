//! # Server Configuration
//!
//! This module contains the router, shared state and server loop for the
//! booking service.

use anyhow::Context;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::error::panic_response;
use crate::handlers::{self, artists, shows, venues};
use crate::telemetry::trace_context_middleware;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz))
        .route("/venues", get(venues::list_venues))
        .route("/venues/search", post(venues::search_venues))
        .route(
            "/venues/create",
            get(venues::create_venue_form).post(venues::create_venue),
        )
        .route(
            "/venues/{id}",
            get(venues::show_venue).delete(venues::delete_venue),
        )
        .route(
            "/venues/{id}/edit",
            get(venues::edit_venue_form).post(venues::edit_venue),
        )
        .route("/venues/{id}/delete", post(venues::delete_venue))
        .route("/artists", get(artists::list_artists))
        .route("/artists/search", post(artists::search_artists))
        .route(
            "/artists/create",
            get(artists::create_artist_form).post(artists::create_artist),
        )
        .route(
            "/artists/{id}",
            get(artists::show_artist).delete(artists::delete_artist),
        )
        .route(
            "/artists/{id}/edit",
            get(artists::edit_artist_form).post(artists::edit_artist),
        )
        .route("/artists/{id}/delete", post(artists::delete_artist))
        .route("/shows", get(shows::list_shows))
        .route(
            "/shows/create",
            get(shows::create_show_form).post(shows::create_show),
        )
        .fallback(handlers::not_found)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_context_middleware))
}

/// Starts the server with the given configuration
pub async fn run_server(config: AppConfig, db: DatabaseConnection) -> anyhow::Result<()> {
    let state = AppState { db };
    let app = create_app(state);

    let addr = config
        .bind_addr()
        .with_context(|| format!("Invalid server address: {}", config.api_bind_addr))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, profile = %config.profile, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz,
        crate::handlers::readyz,
        crate::handlers::venues::list_venues,
        crate::handlers::venues::search_venues,
        crate::handlers::venues::show_venue,
        crate::handlers::venues::create_venue_form,
        crate::handlers::venues::create_venue,
        crate::handlers::venues::edit_venue_form,
        crate::handlers::venues::edit_venue,
        crate::handlers::venues::delete_venue,
        crate::handlers::artists::list_artists,
        crate::handlers::artists::search_artists,
        crate::handlers::artists::show_artist,
        crate::handlers::artists::create_artist_form,
        crate::handlers::artists::create_artist,
        crate::handlers::artists::edit_artist_form,
        crate::handlers::artists::edit_artist,
        crate::handlers::artists::delete_artist,
        crate::handlers::shows::list_shows,
        crate::handlers::shows::create_show_form,
        crate::handlers::shows::create_show,
    ),
    components(
        schemas(
            crate::error::ApiError,
            crate::forms::VenueForm,
            crate::forms::ArtistForm,
            crate::forms::ShowForm,
            crate::handlers::types::LandingPage,
            crate::handlers::types::RecentListing,
            crate::handlers::types::HealthStatus,
            crate::handlers::types::SearchForm,
            crate::handlers::types::SearchHit,
            crate::handlers::types::SearchResults,
            crate::handlers::types::CityVenues,
            crate::handlers::types::ArtistSummary,
            crate::handlers::types::VenueDetail,
            crate::handlers::types::VenueShow,
            crate::handlers::types::ArtistDetail,
            crate::handlers::types::ArtistShow,
            crate::handlers::types::ShowSummary,
            crate::handlers::types::DeletedResource,
        )
    ),
    tags(
        (name = "root", description = "Landing page"),
        (name = "venues", description = "Venue listing and management"),
        (name = "artists", description = "Artist listing and management"),
        (name = "shows", description = "Show bookings"),
        (name = "operational", description = "Health and readiness probes")
    ),
    info(
        title = "Venue Booking API",
        description = "Venues, artists and the shows that bring them together",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
