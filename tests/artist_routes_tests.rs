//! Route-level tests for the artist pages and write endpoints.

mod test_utils;

use axum::http::StatusCode;
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, Statement};
use serde_json::json;
use test_utils::*;
use venue_booking::models::Show;

fn guns_n_petals() -> serde_json::Value {
    json!({
        "name": "Guns N Petals",
        "city": "San Francisco",
        "state": "CA",
        "phone": "326-123-5000",
        "genres": ["Rock n Roll"],
        "image_link": "https://images.unsplash.com/photo-1549213783-8284d0336c4f",
        "facebook_link": "https://www.facebook.com/GunsNPetals",
        "website": "https://www.gunsnpetalsband.com",
        "seeking_venue": true,
        "seeking_description": "Looking for shows to perform at in the San Francisco Bay Area!"
    })
}

#[tokio::test]
async fn created_artist_detail_returns_submitted_fields() {
    let (_db, app) = setup_test_app().await.unwrap();

    let created = post_json(&app, "/artists/create", guns_n_petals()).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(
        created.body["message"],
        "Artist Guns N Petals was successfully listed!"
    );
    let id = created.body["data"]["id"].as_i64().unwrap();

    let detail = get(&app, &format!("/artists/{}", id)).await;
    assert_eq!(detail.status, StatusCode::OK);
    let submitted = guns_n_petals();
    for field in [
        "name",
        "city",
        "state",
        "phone",
        "genres",
        "image_link",
        "facebook_link",
        "website",
        "seeking_venue",
        "seeking_description",
    ] {
        assert_eq!(detail.body[field], submitted[field], "field {field}");
    }
}

#[tokio::test]
async fn artist_list_is_ordered_by_name() {
    let (db, app) = setup_test_app().await.unwrap();
    insert_artist(&db, "The Wild Sax Band", "San Francisco", "CA").await.unwrap();
    insert_artist(&db, "Guns N Petals", "San Francisco", "CA").await.unwrap();
    insert_artist(&db, "Matt Quevedo", "New York", "NY").await.unwrap();

    let response = get(&app, "/artists").await;
    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"]);
}

#[tokio::test]
async fn artist_search_matches_case_insensitively() {
    let (db, app) = setup_test_app().await.unwrap();
    let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await.unwrap();
    let guns = insert_artist(&db, "Guns N Petals", "San Francisco", "CA").await.unwrap();
    insert_artist(&db, "Matt Quevedo", "New York", "NY").await.unwrap();
    insert_artist(&db, "The Wild Sax Band", "San Francisco", "CA").await.unwrap();
    insert_show(&db, guns.id, venue.id, days_from_now(7)).await.unwrap();

    let response = post_search(&app, "/artists/search", "A").await;
    assert_eq!(response.body["count"], 3);

    let response = post_search(&app, "/artists/search", "band").await;
    assert_eq!(response.body["count"], 1);
    assert_eq!(response.body["data"][0]["name"], "The Wild Sax Band");

    let response = post_search(&app, "/artists/search", "PETALS").await;
    assert_eq!(response.body["count"], 1);
    assert_eq!(response.body["data"][0]["num_upcoming_shows"], 1);
}

#[tokio::test]
async fn artist_search_folds_case_beyond_ascii() {
    let (_db, app) = setup_test_app().await.unwrap();
    let created = post_json(
        &app,
        "/artists/create",
        json!({ "name": "ÅSA Trio", "city": "Oslo", "state": "OS" }),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let response = post_search(&app, "/artists/search", "åsa").await;
    assert_eq!(response.body["count"], 1);
    assert_eq!(response.body["data"][0]["name"], "ÅSA Trio");

    let response = post_search(&app, "/artists/search", "TRIO").await;
    assert_eq!(response.body["count"], 1);
}

#[tokio::test]
async fn artist_detail_partitions_only_their_shows() {
    let (db, app) = setup_test_app().await.unwrap();
    let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await.unwrap();
    let artist = insert_artist(&db, "Guns N Petals", "San Francisco", "CA").await.unwrap();
    let other = insert_artist(&db, "Matt Quevedo", "New York", "NY").await.unwrap();
    insert_show(&db, artist.id, venue.id, days_from_now(-30)).await.unwrap();
    insert_show(&db, artist.id, venue.id, days_from_now(14)).await.unwrap();
    insert_show(&db, other.id, venue.id, days_from_now(-2)).await.unwrap();
    insert_show(&db, other.id, venue.id, days_from_now(2)).await.unwrap();

    let detail = get(&app, &format!("/artists/{}", artist.id)).await;

    assert_eq!(detail.body["past_shows_count"], 1);
    assert_eq!(detail.body["upcoming_shows_count"], 1);
    assert_eq!(detail.body["past_shows"][0]["venue_id"], venue.id);
    assert_eq!(detail.body["past_shows"][0]["venue_name"], "The Musical Hop");
}

#[tokio::test]
async fn edit_updates_only_the_named_artist() {
    let (db, app) = setup_test_app().await.unwrap();
    let first = insert_artist(&db, "First Act", "Austin", "TX").await.unwrap();
    let second = insert_artist(&db, "Second Act", "Austin", "TX").await.unwrap();

    let mut form = guns_n_petals();
    form["name"] = json!("Second Act Reunited");
    let response = post_json(&app, &format!("/artists/{}/edit", second.id), form).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["message"],
        "Artist Second Act Reunited was successfully updated!"
    );

    let first_detail = get(&app, &format!("/artists/{}", first.id)).await;
    assert_eq!(first_detail.body["name"], "First Act");
    assert_eq!(first_detail.body["city"], "Austin");
    let second_detail = get(&app, &format!("/artists/{}", second.id)).await;
    assert_eq!(second_detail.body["name"], "Second Act Reunited");
    assert_eq!(second_detail.body["city"], "San Francisco");
}

#[tokio::test]
async fn invalid_edit_leaves_artist_untouched() {
    let (db, app) = setup_test_app().await.unwrap();
    let artist = insert_artist(&db, "Guns N Petals", "San Francisco", "CA").await.unwrap();

    let mut form = guns_n_petals();
    form["facebook_link"] = json!("facebook dot com");
    let response = post_json(&app, &format!("/artists/{}/edit", artist.id), form).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["facebook_link"].is_array());

    let detail = get(&app, &format!("/artists/{}", artist.id)).await;
    assert_eq!(detail.body["phone"], serde_json::Value::Null);
}

#[tokio::test]
async fn deleting_an_artist_removes_their_shows() {
    let (db, app) = setup_test_app().await.unwrap();
    let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await.unwrap();
    let artist = insert_artist(&db, "Guns N Petals", "San Francisco", "CA").await.unwrap();
    insert_show(&db, artist.id, venue.id, days_from_now(1)).await.unwrap();

    let response = delete(&app, &format!("/artists/{}", artist.id)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "Guns N Petals");

    assert_eq!(get(&app, "/artists").await.body, json!([]));
    assert_eq!(Show::find().count(&db).await.unwrap(), 0);
    assert_eq!(
        get(&app, &format!("/venues/{}", venue.id)).await.body["upcoming_shows_count"],
        0
    );
}

#[tokio::test]
async fn failed_delete_names_the_artist_and_keeps_their_shows() {
    let (db, app) = setup_test_app().await.unwrap();
    let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await.unwrap();
    let artist = insert_artist(&db, "Guns N Petals", "San Francisco", "CA").await.unwrap();
    insert_show(&db, artist.id, venue.id, days_from_now(3)).await.unwrap();
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE TRIGGER artist_locked BEFORE DELETE ON artist \
         BEGIN SELECT RAISE(ABORT, 'artist is locked'); END"
            .to_string(),
    ))
    .await
    .unwrap();

    let response = post_empty(&app, &format!("/artists/{}/delete", artist.id)).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body["message"],
        "An error occurred. Artist Guns N Petals could not be deleted."
    );
    assert_eq!(Show::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn missing_artist_is_not_found() {
    let (_db, app) = setup_test_app().await.unwrap();

    let response = get(&app, "/artists/7").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Artist 7 not found");
    assert_eq!(
        post_empty(&app, "/artists/7/delete").await.status,
        StatusCode::NOT_FOUND
    );
}
