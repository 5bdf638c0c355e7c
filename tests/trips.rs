mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn create_trip_with_dates() {
    let app = TestApp::new();

    let resp = app
        .post_json(
            "/api/trips",
            json!({
                "title": "Jeju in spring",
                "party": "family",
                "dates": [
                    { "start_date": "2026-04-01", "end_date": "2026-04-05" },
                    { "start_date": "2026-04-10", "end_date": "2026-04-12" },
                ],
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    let body = resp.json();
    assert_eq!(body["id"], 1);
    assert_eq!(body["title"], "Jeju in spring");
    assert_eq!(body["party"], "family");

    let dates = body["dates"].as_array().unwrap();
    assert_eq!(dates.len(), 2);
    assert_eq!(dates[0]["start_date"], "2026-04-01");
    assert_eq!(dates[0]["end_date"], "2026-04-05");
    assert_eq!(dates[1]["start_date"], "2026-04-10");
}

#[tokio::test]
async fn create_trip_rejects_blank_title() {
    let app = TestApp::new();

    let resp = app
        .post_json("/api/trips", json!({ "title": "  ", "party": "solo", "dates": [] }))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_trip_rejects_inverted_date_range() {
    let app = TestApp::new();

    let resp = app
        .post_json(
            "/api/trips",
            json!({
                "title": "Backwards trip",
                "party": "solo",
                "dates": [{ "start_date": "2026-04-05", "end_date": "2026-04-01" }],
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_trip_round_trips() {
    let app = TestApp::new();

    let created = app
        .post_json(
            "/api/trips",
            json!({
                "title": "Weekend away",
                "party": "couple",
                "dates": [{ "start_date": "2026-06-06", "end_date": "2026-06-07" }],
            }),
        )
        .await;
    let id = created.json()["id"].as_i64().unwrap();

    let fetched = app.get(&format!("/api/trips/{}", id)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    let body = fetched.json();
    assert_eq!(body["title"], "Weekend away");
    assert_eq!(body["dates"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_trip_removes_it_and_its_dates() {
    let app = TestApp::new();

    let created = app
        .post_json(
            "/api/trips",
            json!({
                "title": "Short lived",
                "party": "solo",
                "dates": [{ "start_date": "2026-05-01", "end_date": "2026-05-02" }],
            }),
        )
        .await;
    let id = created.json()["id"].as_i64().unwrap();

    let deleted = app.delete(&format!("/api/trips/{}", id)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let fetched = app.get(&format!("/api/trips/{}", id)).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);

    let again = app.delete(&format!("/api/trips/{}", id)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_clip_and_fetch_it() {
    let app = TestApp::new();

    let resp = app
        .post_json(
            "/api/clips",
            json!({
                "title": "Sunset at the pier",
                "url": "https://clips.example.com/sunset.mp4",
                "is_opened": true,
                "user_id": 4,
                "trip_id": 1,
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let id = resp.json()["id"].as_i64().unwrap();

    let fetched = app.get(&format!("/api/clips/{}", id)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    let body = fetched.json();
    assert_eq!(body["title"], "Sunset at the pier");
    assert_eq!(body["url"], "https://clips.example.com/sunset.mp4");
    assert_eq!(body["user_id"], 4);
    assert!(body["uploaded_at"].is_string());
}

#[tokio::test]
async fn create_clip_rejects_blank_fields() {
    let app = TestApp::new();

    let no_title = app
        .post_json(
            "/api/clips",
            json!({
                "title": " ",
                "url": "https://clips.example.com/a.mp4",
                "is_opened": true,
                "user_id": 1,
                "trip_id": 1,
            }),
        )
        .await;
    assert_eq!(no_title.status, StatusCode::BAD_REQUEST);

    let no_url = app
        .post_json(
            "/api/clips",
            json!({
                "title": "Untitled clip",
                "url": "",
                "is_opened": true,
                "user_id": 1,
                "trip_id": 1,
            }),
        )
        .await;
    assert_eq!(no_url.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn clips_by_user_lists_only_theirs() {
    let app = TestApp::new();

    for (user_id, title) in [(4, "First clip"), (4, "Second clip"), (5, "Someone else's")] {
        let resp = app
            .post_json(
                "/api/clips",
                json!({
                    "title": title,
                    "url": "https://clips.example.com/v.mp4",
                    "is_opened": true,
                    "user_id": user_id,
                    "trip_id": 1,
                }),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED);
    }

    let listing = app.get("/api/clips/user/4").await.json();
    let clips = listing.as_array().unwrap();
    assert_eq!(clips.len(), 2);
    assert!(clips.iter().all(|clip| clip["user_id"] == 4));
}

#[tokio::test]
async fn missing_clip_returns_not_found() {
    let app = TestApp::new();
    let resp = app.get("/api/clips/31").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = TestApp::new();
    let resp = app.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["status"], "ok");
}
