//! Route-level tests for show listing and booking.

mod test_utils;

use axum::http::StatusCode;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use test_utils::*;
use venue_booking::models::Show;

#[tokio::test]
async fn show_list_resolves_each_rows_own_venue() {
    let (db, app) = setup_test_app().await.unwrap();
    let hop = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await.unwrap();
    let pianos = insert_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await.unwrap();
    let guns = insert_artist(&db, "Guns N Petals", "San Francisco", "CA").await.unwrap();
    let matt = insert_artist(&db, "Matt Quevedo", "New York", "NY").await.unwrap();
    insert_show(&db, guns.id, hop.id, days_from_now(-5)).await.unwrap();
    insert_show(&db, matt.id, pianos.id, days_from_now(5)).await.unwrap();

    let response = get(&app, "/shows").await;
    assert_eq!(response.status, StatusCode::OK);

    let shows = response.body.as_array().unwrap();
    assert_eq!(shows.len(), 2);
    // Newest first
    assert_eq!(shows[0]["venue_id"], pianos.id);
    assert_eq!(shows[0]["venue_name"], "The Dueling Pianos Bar");
    assert_eq!(shows[0]["artist_name"], "Matt Quevedo");
    assert_eq!(shows[1]["venue_id"], hop.id);
    assert_eq!(shows[1]["venue_name"], "The Musical Hop");
    assert_eq!(shows[1]["artist_name"], "Guns N Petals");
}

#[tokio::test]
async fn created_show_lands_in_past_or_upcoming() {
    let (db, app) = setup_test_app().await.unwrap();
    let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await.unwrap();
    let artist = insert_artist(&db, "Guns N Petals", "San Francisco", "CA").await.unwrap();

    let past = days_from_now(-1);
    let response = post_json(
        &app,
        "/shows/create",
        json!({
            "artist_id": artist.id,
            "venue_id": venue.id,
            "start_time": past.to_rfc3339(),
        }),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["message"], "Show was successfully listed!");
    assert_eq!(response.body["data"]["venue_name"], "The Musical Hop");

    let venue_page = get(&app, &format!("/venues/{}", venue.id)).await;
    assert_eq!(venue_page.body["past_shows_count"], 1);
    assert_eq!(venue_page.body["upcoming_shows_count"], 0);
    assert_eq!(venue_page.body["past_shows"][0]["artist_name"], "Guns N Petals");
    let artist_page = get(&app, &format!("/artists/{}", artist.id)).await;
    assert_eq!(artist_page.body["past_shows_count"], 1);
    assert_eq!(artist_page.body["upcoming_shows"], json!([]));

    let future = days_from_now(1).format("%Y-%m-%d %H:%M:%S").to_string();
    let response = post_json(
        &app,
        "/shows/create",
        json!({ "artist_id": artist.id, "venue_id": venue.id, "start_time": future }),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let venue_page = get(&app, &format!("/venues/{}", venue.id)).await;
    assert_eq!(venue_page.body["past_shows_count"], 1);
    assert_eq!(venue_page.body["upcoming_shows_count"], 1);
    let artist_page = get(&app, &format!("/artists/{}", artist.id)).await;
    assert_eq!(artist_page.body["upcoming_shows_count"], 1);
    assert_eq!(
        artist_page.body["upcoming_shows"][0]["venue_name"],
        "The Musical Hop"
    );
}

#[tokio::test]
async fn show_with_unknown_artist_or_venue_is_rejected() {
    let (db, app) = setup_test_app().await.unwrap();
    let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await.unwrap();
    let artist = insert_artist(&db, "Guns N Petals", "San Francisco", "CA").await.unwrap();
    let start_time = days_from_now(3).to_rfc3339();

    let response = post_json(
        &app,
        "/shows/create",
        json!({ "artist_id": 999, "venue_id": venue.id, "start_time": start_time }),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION_FAILED");
    assert!(response.body["details"]["artist_id"].is_array());

    let response = post_json(
        &app,
        "/shows/create",
        json!({ "artist_id": artist.id, "venue_id": 999, "start_time": start_time }),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["venue_id"].is_array());

    assert_eq!(Show::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn show_form_validation_errors() {
    let (_db, app) = setup_test_app().await.unwrap();

    let response = post_json(&app, "/shows/create", json!({ "start_time": "someday" })).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["details"]["artist_id"][0],
        "This field is required."
    );
    assert_eq!(
        response.body["details"]["start_time"][0],
        "Not a valid datetime value."
    );
}

#[tokio::test]
async fn show_create_form_defaults_start_time() {
    let (_db, app) = setup_test_app().await.unwrap();

    let response = get(&app, "/shows/create").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["start_time"].is_string());
    assert_eq!(response.body["artist_id"], serde_json::Value::Null);
}
