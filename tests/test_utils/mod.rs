//! Test utilities for database and router testing.
//!
//! This module provides utilities for setting up in-memory SQLite databases
//! with migrations applied, inserting fixture rows, and driving the router.

use anyhow::Result;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use chrono::{DateTime, Duration, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, Database, DatabaseConnection};
use serde_json::{Value, json};
use tower::ServiceExt;
use venue_booking::models::{artist, search_key, show, venue};
use venue_booking::server::{AppState, create_app};

/// Sets up an in-memory SQLite database with all migrations applied.
///
/// SQLite enforces the show foreign keys here, so fixtures must reference
/// real rows.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Builds the full router over a fresh database, returning both.
#[allow(dead_code)]
pub async fn setup_test_app() -> Result<(DatabaseConnection, Router)> {
    let db = setup_test_db().await?;
    let app = create_app(AppState { db: db.clone() });
    Ok((db, app))
}

/// Response status, headers and JSON body (`Value::Null` when empty).
#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| json!(String::from_utf8_lossy(&bytes)))
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

#[allow(dead_code)]
pub async fn post_json(app: &Router, uri: &str, body: Value) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Posts a URL-encoded search form.
#[allow(dead_code)]
pub async fn post_search(app: &Router, uri: &str, search_term: &str) -> TestResponse {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("search_term", search_term)
        .finish();
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

#[allow(dead_code)]
pub async fn post_empty(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

#[allow(dead_code)]
pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Inserts a venue row directly, bypassing form validation.
#[allow(dead_code)]
pub async fn insert_venue(
    db: &DatabaseConnection,
    name: &str,
    city: &str,
    state: &str,
) -> Result<venue::Model> {
    let venue = venue::ActiveModel {
        name: Set(name.to_string()),
        name_search: Set(search_key(name)),
        city: Set(city.to_string()),
        state: Set(state.to_string()),
        address: Set(None),
        phone: Set(None),
        genres: Set(json!([])),
        image_link: Set(None),
        facebook_link: Set(None),
        website_link: Set(None),
        seeking_talent: Set(false),
        seeking_description: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(venue)
}

/// Inserts an artist row directly, bypassing form validation.
#[allow(dead_code)]
pub async fn insert_artist(
    db: &DatabaseConnection,
    name: &str,
    city: &str,
    state: &str,
) -> Result<artist::Model> {
    let artist = artist::ActiveModel {
        name: Set(name.to_string()),
        name_search: Set(search_key(name)),
        city: Set(city.to_string()),
        state: Set(state.to_string()),
        phone: Set(None),
        genres: Set(json!([])),
        image_link: Set(Some(format!("https://images.example.com/{}.png", name.len()))),
        facebook_link: Set(None),
        website: Set(None),
        seeking_venue: Set(false),
        seeking_description: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(artist)
}

/// Inserts a show row directly.
#[allow(dead_code)]
pub async fn insert_show(
    db: &DatabaseConnection,
    artist_id: i32,
    venue_id: i32,
    start_time: DateTime<Utc>,
) -> Result<show::Model> {
    let show = show::ActiveModel {
        start_time: Set(start_time.fixed_offset()),
        artist_id: Set(artist_id),
        venue_id: Set(venue_id),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(show)
}

/// Whole-second instants well clear of the test's own clock.
#[allow(dead_code)]
pub fn days_from_now(days: i64) -> DateTime<Utc> {
    let now = Utc::now() + Duration::days(days);
    DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now)
}
