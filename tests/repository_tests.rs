//! Repository behaviour against an in-memory database, including
//! transaction rollback.

mod test_utils;

use sea_orm::TransactionTrait;
use test_utils::*;
use venue_booking::error::RepositoryError;
use venue_booking::forms::{ShowForm, VenueForm};
use venue_booking::repositories::{ArtistRepository, ShowRepository, VenueRepository};

fn venue_form(name: &str) -> VenueForm {
    VenueForm {
        name: name.to_string(),
        city: "Chicago".to_string(),
        state: "IL".to_string(),
        genres: vec!["Blues".to_string()],
        ..Default::default()
    }
}

#[tokio::test]
async fn dropped_transaction_discards_the_write() {
    let db = setup_test_db().await.unwrap();

    {
        let txn = db.begin().await.unwrap();
        VenueRepository::new(&txn)
            .create(venue_form("Ghost Hall"))
            .await
            .unwrap();
        // dropped without commit
    }

    assert_eq!(VenueRepository::new(&db).count().await.unwrap(), 0);
}

#[tokio::test]
async fn committed_transaction_keeps_the_write() {
    let db = setup_test_db().await.unwrap();

    let txn = db.begin().await.unwrap();
    let venue = VenueRepository::new(&txn)
        .create(venue_form("Blue Note"))
        .await
        .unwrap();
    txn.commit().await.unwrap();

    let stored = VenueRepository::new(&db).get(venue.id).await.unwrap();
    assert_eq!(stored.name, "Blue Note");
    assert_eq!(stored.genre_list(), vec!["Blues"]);
}

#[tokio::test]
async fn update_missing_row_is_not_found() {
    let db = setup_test_db().await.unwrap();

    let err = VenueRepository::new(&db)
        .update(41, venue_form("Nowhere"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RepositoryError::NotFound {
            entity: "Venue",
            id: 41
        }
    ));
}

#[tokio::test]
async fn grouped_upcoming_counts_skip_past_and_other_owners() {
    let db = setup_test_db().await.unwrap();
    let hop = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await.unwrap();
    let bar = insert_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await.unwrap();
    let quiet = insert_venue(&db, "Quiet Room", "New York", "NY").await.unwrap();
    let artist = insert_artist(&db, "Guns N Petals", "San Francisco", "CA").await.unwrap();
    insert_show(&db, artist.id, hop.id, days_from_now(1)).await.unwrap();
    insert_show(&db, artist.id, hop.id, days_from_now(2)).await.unwrap();
    insert_show(&db, artist.id, bar.id, days_from_now(-2)).await.unwrap();
    insert_show(&db, artist.id, bar.id, days_from_now(9)).await.unwrap();

    let shows = ShowRepository::new(&db);
    let counts = shows
        .upcoming_counts_by_venue(&[hop.id, bar.id, quiet.id], chrono::Utc::now())
        .await
        .unwrap();

    assert_eq!(counts.get(&hop.id), Some(&2));
    assert_eq!(counts.get(&bar.id), Some(&1));
    assert_eq!(counts.get(&quiet.id), None);

    let by_artist = shows
        .upcoming_counts_by_artist(&[artist.id], chrono::Utc::now())
        .await
        .unwrap();
    assert_eq!(by_artist.get(&artist.id), Some(&3));

    assert!(shows
        .upcoming_counts_by_venue(&[], chrono::Utc::now())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn upcoming_counts_span_more_ids_than_one_statement_binds() {
    let db = setup_test_db().await.unwrap();
    let hop = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await.unwrap();
    let bar = insert_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await.unwrap();
    let artist = insert_artist(&db, "Guns N Petals", "San Francisco", "CA").await.unwrap();
    insert_show(&db, artist.id, hop.id, days_from_now(1)).await.unwrap();
    insert_show(&db, artist.id, bar.id, days_from_now(3)).await.unwrap();
    insert_show(&db, artist.id, bar.id, days_from_now(4)).await.unwrap();

    // Far past SQLite's 32766 bind-parameter ceiling; unknown ids count nothing
    let mut venue_ids: Vec<i32> = (1_000..41_000).collect();
    venue_ids.push(hop.id);
    venue_ids.push(bar.id);

    let shows = ShowRepository::new(&db);
    let counts = shows
        .upcoming_counts_by_venue(&venue_ids, chrono::Utc::now())
        .await
        .unwrap();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts.get(&hop.id), Some(&1));
    assert_eq!(counts.get(&bar.id), Some(&2));

    let all = shows
        .upcoming_counts_for_all_venues(chrono::Utc::now())
        .await
        .unwrap();
    assert_eq!(all, counts);
}

#[tokio::test]
async fn show_create_checks_references() {
    let db = setup_test_db().await.unwrap();
    let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await.unwrap();
    let artist = insert_artist(&db, "Guns N Petals", "San Francisco", "CA").await.unwrap();

    let new_show = ShowForm {
        artist_id: Some(artist.id + 100),
        venue_id: Some(venue.id),
        start_time: Some("2035-06-01T20:00:00Z".to_string()),
    }
    .validated()
    .unwrap();
    let err = ShowRepository::new(&db).create(new_show).await.unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::InvalidReference {
            field: "artist_id",
            ..
        }
    ));

    let new_show = ShowForm {
        artist_id: Some(artist.id),
        venue_id: Some(venue.id),
        start_time: Some("2035-06-01T20:00:00Z".to_string()),
    }
    .validated()
    .unwrap();
    let show = ShowRepository::new(&db).create(new_show).await.unwrap();

    let listing = ShowRepository::new(&db).get_listing(show.show_id).await.unwrap();
    assert_eq!(listing.venue_name, "The Musical Hop");
    assert_eq!(listing.artist_name, "Guns N Petals");
}

#[tokio::test]
async fn recent_listings_are_newest_first_and_capped() {
    let db = setup_test_db().await.unwrap();
    for i in 0..12 {
        insert_artist(&db, &format!("Artist {i:02}"), "Austin", "TX")
            .await
            .unwrap();
    }

    let recent = ArtistRepository::new(&db).recent().await.unwrap();

    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0].name, "Artist 11");
    assert_eq!(recent[9].name, "Artist 02");
}
