//! API integration tests
//! Tests complete HTTP request/response cycles with real database
mod common;

use axum::http::{Method, StatusCode};
use common::{fixtures, seed_album, seed_lyric, TestApp};
use lyrics_core::DownvoteScoring;
use serde_json::json;

// ============================================================================
// Health and auth
// ============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("ok"));
}

#[tokio::test]
async fn test_login_flow() {
    let app = TestApp::new().await;
    app.login_token().await;

    let (status, body) = app
        .post(
            "/auth/login",
            json!({"username": fixtures::TEST_USERNAME, "password": fixtures::TEST_PASSWORD}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    let refresh_token = body["refresh_token"].as_str().unwrap().to_string();

    let (status, body) = app
        .post("/auth/refresh", json!({"refresh_token": refresh_token}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());

    let (status, _) = app
        .post(
            "/auth/login",
            json!({"username": fixtures::TEST_USERNAME, "password": "wrong"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let app = TestApp::new().await;

    let (status, _) = app
        .request(Method::GET, "/artists", None, Some("not-a-jwt"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Artists
// ============================================================================

#[tokio::test]
async fn test_artist_crud() {
    let app = TestApp::new().await;

    let (status, artist) = app
        .post("/artists", json!({"name": "Adele", "first_year_active": 2006}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = artist["id"].as_i64().unwrap();

    let (status, body) = app
        .patch(&format!("/artists/{id}"), json!({"first_year_active": null}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Adele");
    assert!(body["first_year_active"].is_null());

    let (status, body) = app.get(&format!("/artists/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["albums"], json!([]));

    let (status, _) = app.delete(&format!("/artists/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&format!("/artists/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_artist_validation_errors_are_field_scoped() {
    let app = TestApp::new().await;

    let (status, body) = app.post("/artists", json!({"first_year_active": -1})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["name"].is_array());
    assert!(body["first_year_active"].is_array());

    app.post("/artists", json!({"name": "Adele"})).await;
    let (status, body) = app.post("/artists", json!({"name": "Adele"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["name"].is_array());
}

#[tokio::test]
async fn test_artist_list_filters_and_pagination() {
    let app = TestApp::new().await;
    for (name, year) in [("Adele", 2006), ("Taylor Swift", 2004), ("The Beatles", 1960)] {
        app.post("/artists", json!({"name": name, "first_year_active": year}))
            .await;
    }

    let (status, body) = app
        .get("/artists?first_year_active__gt=2000&ordering=-name")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["results"][0]["name"], "Taylor Swift");
    // List view has no nested albums
    assert!(body["results"][0].get("albums").is_none());

    let (_, body) = app.get("/artists?name__contains=Beat").await;
    assert_eq!(body["count"], 1);

    let (_, body) = app.get("/artists?size=2&page=2").await;
    assert_eq!(body["count"], 3);
    assert_eq!(body["results"].as_array().unwrap().len(), 1);

    let (status, _) = app.get("/artists?first_year_active__lt=soon").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_numeric_id_is_not_found() {
    let app = TestApp::new().await;

    let (status, _) = app.get("/artists/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Albums
// ============================================================================

#[tokio::test]
async fn test_album_without_year_or_artist_is_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app.post("/albums", json!({"name": "Thriller"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["year"].is_array());
    assert!(body["artist"].is_array());
}

#[tokio::test]
async fn test_inline_artist_is_reused_on_second_album() {
    let app = TestApp::new().await;

    let (status, first) = app
        .post(
            "/albums",
            json!({"name": "Fearless", "year": 2008,
                   "artist": {"name": "Taylor Swift", "first_year_active": 2004}}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, second) = app
        .post(
            "/albums",
            json!({"name": "Red", "year": 2012, "artist": {"name": "Taylor Swift"}}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["artist"]["id"], second["artist"]["id"]);
    assert_eq!(second["artist"]["first_year_active"], 2004);
    assert_eq!(second["songs"], json!([]));

    let (_, artists) = app.get("/artists").await;
    assert_eq!(artists["count"], 1);
}

#[tokio::test]
async fn test_new_inline_artist_requires_first_year_active() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/albums",
            json!({"name": "25", "year": 2015, "artist": {"name": "Adele"}}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["artist.first_year_active"].is_array());

    let (_, artists) = app.get("/artists").await;
    assert_eq!(artists["count"], 0);
}

#[tokio::test]
async fn test_album_with_unknown_artist_id_is_not_found() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post("/albums", json!({"name": "25", "year": 2015, "artist": 404}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_album_detail_lists_songs() {
    let app = TestApp::new().await;
    let (_, album_id) = seed_album(&app).await;
    seed_lyric(&app, album_id, "Style", "Midnight, you come and pick me up").await;

    let (status, body) = app.get(&format!("/albums/{album_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["artist"]["name"], "Taylor Swift");
    assert_eq!(body["songs"][0]["name"], "Style");

    let (_, list) = app.get("/albums").await;
    assert_eq!(list["results"][0], json!({"id": album_id, "name": "1989", "year": 2014}));
}

// ============================================================================
// Songs
// ============================================================================

#[tokio::test]
async fn test_song_views() {
    let app = TestApp::new().await;
    let (_, album_id) = seed_album(&app).await;
    let lyric = seed_lyric(&app, album_id, "Style", "Midnight").await;
    let song_id = lyric["song"]["id"].as_i64().unwrap();

    let (_, list) = app.get("/songs").await;
    assert_eq!(list["count"], 1);
    assert_eq!(list["results"][0]["album"]["id"], album_id);

    let (status, detail) = app.get(&format!("/songs/{song_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["artist"]["name"], "Taylor Swift");
    assert_eq!(detail["lyrics"][0], json!({"id": lyric["id"], "text": "Midnight", "votes": 0}));

    let (status, _) = app.delete(&format!("/songs/{song_id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.get(&format!("/lyrics/{}", lyric["id"])).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Lyrics
// ============================================================================

#[tokio::test]
async fn test_lyric_with_song_id_nests_traversed_entities() {
    let app = TestApp::new().await;
    let (artist_id, album_id) = seed_album(&app).await;
    let first = seed_lyric(&app, album_id, "Style", "Midnight").await;
    let song_id = first["song"]["id"].as_i64().unwrap();

    let (status, body) = app
        .post("/lyrics", json!({"text": "You come and pick me up", "song": song_id}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["song"]["id"], song_id);
    assert_eq!(body["album"]["id"], album_id);
    assert_eq!(body["artist"]["id"], artist_id);
    assert_eq!(body["votes"], 0);
    assert_eq!(body["upvotes"], 0);
    assert_eq!(body["downvotes"], 0);
}

#[tokio::test]
async fn test_inline_song_is_reused() {
    let app = TestApp::new().await;
    let (_, album_id) = seed_album(&app).await;

    let first = seed_lyric(&app, album_id, "Style", "Midnight").await;
    let second = seed_lyric(&app, album_id, "Style", "No headlights").await;
    assert_eq!(first["song"]["id"], second["song"]["id"]);
}

#[tokio::test]
async fn test_inline_song_without_album_is_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/lyrics", json!({"text": "la la la", "song": {"name": "X"}}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["song.album"].is_array());

    let (status, body) = app
        .post("/lyrics", json!({"text": "la la la", "song": "X"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["song"].is_array());

    let (status, body) = app
        .post("/lyrics", json!({"text": "la la la", "song": {"name": "X", "album": 99}}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["song.album"].is_array());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::POST, "/artists", Some(json!("not an object")), None)
        .await;
    assert_eq!(response.0, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_read_only_fields_are_ignored_on_write() {
    let app = TestApp::new().await;
    let (_, album_id) = seed_album(&app).await;

    let (status, body) = app
        .post(
            "/lyrics",
            json!({"text": "Midnight", "song": {"name": "Style", "album": album_id},
                   "votes": 99, "upvotes": 99, "artist": 5}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["votes"], 0);
    assert_eq!(body["upvotes"], 0);
}

#[tokio::test]
async fn test_lyric_patch_and_search() {
    let app = TestApp::new().await;
    let (_, album_id) = seed_album(&app).await;
    let lyric = seed_lyric(&app, album_id, "Style", "Midnight").await;
    seed_lyric(&app, album_id, "Wildest Dreams", "Say you'll remember me").await;
    let id = lyric["id"].as_i64().unwrap();

    let (status, body) = app
        .patch(&format!("/lyrics/{id}"), json!({"text": "Midnight, you come and pick me up"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["song"]["name"], "Style");

    let (_, page) = app.get("/lyrics?search=PICK%20style").await;
    assert_eq!(page["count"], 1);
    assert_eq!(page["results"][0]["id"], id);

    let (_, page) = app.get("/lyrics?search=1989&ordering=-song__name").await;
    assert_eq!(page["count"], 2);
    assert_eq!(page["results"][0]["song"]["name"], "Wildest Dreams");

    let (status, _) = app.delete(&format!("/lyrics/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.delete(&format!("/lyrics/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Votes
// ============================================================================

#[tokio::test]
async fn test_votes_require_authentication() {
    let app = TestApp::new().await;
    let (_, album_id) = seed_album(&app).await;
    let lyric = seed_lyric(&app, album_id, "Style", "Midnight").await;
    let id = lyric["id"].as_i64().unwrap();

    let (status, _) = app
        .request(Method::POST, &format!("/lyrics/{id}/vote-up"), None, None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = app.get(&format!("/lyrics/{id}")).await;
    assert_eq!(body["votes"], 0);
    assert_eq!(body["upvotes"], 0);
}

#[tokio::test]
async fn test_votes_are_monotonic() {
    let app = TestApp::new().await;
    let token = app.login_token().await;
    let (_, album_id) = seed_album(&app).await;
    let lyric = seed_lyric(&app, album_id, "Style", "Midnight").await;
    let id = lyric["id"].as_i64().unwrap();

    let (status, body) = app
        .request(Method::POST, &format!("/lyrics/{id}/vote-up"), None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["votes"], 1);
    assert_eq!(body["upvotes"], 1);

    let (status, body) = app
        .request(Method::POST, &format!("/lyrics/{id}/vote-down"), None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["votes"], 2);
    assert_eq!(body["upvotes"], 1);
    assert_eq!(body["downvotes"], 1);

    let (status, _) = app
        .request(Method::POST, "/lyrics/999/vote-up", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_downvote_can_lower_score_when_configured() {
    let app = TestApp::with_catalog(|db| db.with_downvote_scoring(DownvoteScoring::Decrement)).await;
    let token = app.login_token().await;
    let (_, album_id) = seed_album(&app).await;
    let lyric = seed_lyric(&app, album_id, "Style", "Midnight").await;
    let id = lyric["id"].as_i64().unwrap();

    let (_, body) = app
        .request(Method::POST, &format!("/lyrics/{id}/vote-down"), None, Some(&token))
        .await;
    assert_eq!(body["votes"], -1);
    assert_eq!(body["downvotes"], 1);
}

// ============================================================================
// Random
// ============================================================================

#[tokio::test]
async fn test_random_lyric() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/lyrics/random").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (artist_id, album_id) = seed_album(&app).await;
    let lyric = seed_lyric(&app, album_id, "Style", "Midnight").await;

    let (status, body) = app.get("/lyrics/random?artist=SWIFT").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], lyric["id"]);

    let (status, body) = app.get(&format!("/lyrics/random?artist_id={artist_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["artist"]["id"], artist_id);

    let (status, body) = app.get("/lyrics/random?artist=doesnotexist").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (status, _) = app.get("/lyrics/random?artist_id=abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Cascade
// ============================================================================

#[tokio::test]
async fn test_deleting_artist_cascades() {
    let app = TestApp::new().await;
    let (artist_id, album_id) = seed_album(&app).await;
    let lyric = seed_lyric(&app, album_id, "Style", "Midnight").await;

    let (status, _) = app.delete(&format!("/artists/{artist_id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&format!("/albums/{album_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get(&format!("/songs/{}", lyric["song"]["id"])).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, lyrics) = app.get("/lyrics").await;
    assert_eq!(lyrics["count"], 0);
}
