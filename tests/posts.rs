mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn create_post_returns_id_and_persists() {
    let app = TestApp::new();

    let resp = app
        .post_json(
            "/api/posts",
            json!({
                "title": "First trip",
                "content": "We finally made it to the coast.",
                "is_opened": true,
                "user_id": 7,
                "trip_id": 3,
                "clip_id": null,
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.json()["id"], 1);

    let fetched = app.get("/api/posts/1").await;
    assert_eq!(fetched.status, StatusCode::OK);
    let body = fetched.json();
    assert_eq!(body["title"], "First trip");
    assert_eq!(body["content"], "We finally made it to the coast.");
    assert_eq!(body["is_opened"], true);
    assert_eq!(body["user_id"], 7);
    assert_eq!(body["trip_id"], 3);
    assert!(body["clip_id"].is_null());
    assert!(body["created_at"].is_string());

    assert_eq!(app.event_kinds(), vec!["post_created"]);
}

#[tokio::test]
async fn create_post_ids_are_sequential() {
    let app = TestApp::new();
    let first = app.create_post("First one", "long enough content", 1).await;
    let second = app.create_post("Second one", "long enough content", 1).await;
    assert_eq!(first, 1);
    assert_eq!(second, 2);
}

#[tokio::test]
async fn create_post_rejects_short_content() {
    let app = TestApp::new();

    let resp = app
        .post_json(
            "/api/posts",
            json!({
                "title": "Valid title",
                "content": "too short",
                "is_opened": true,
                "user_id": 1,
                "trip_id": 1,
                "clip_id": null,
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.error_message().contains("content"));

    // Nothing was persisted and nothing was published.
    let listing = app.get("/api/posts?page=0&size=10").await;
    assert_eq!(listing.json()["total_elements"], 0);
    assert!(app.event_kinds().is_empty());
}

#[tokio::test]
async fn create_post_rejects_short_title() {
    let app = TestApp::new();

    let resp = app
        .post_json(
            "/api/posts",
            json!({
                "title": "ab",
                "content": "content that is long enough",
                "is_opened": true,
                "user_id": 1,
                "trip_id": 1,
                "clip_id": null,
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.error_message().contains("title"));
}

#[tokio::test]
async fn content_is_checked_before_title() {
    let app = TestApp::new();

    // Both fields are invalid; the content rule wins.
    let resp = app
        .post_json(
            "/api/posts",
            json!({
                "title": "x",
                "content": "short",
                "is_opened": true,
                "user_id": 1,
                "trip_id": 1,
                "clip_id": null,
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.error_message().contains("content"));
}

#[tokio::test]
async fn update_post_by_owner_succeeds() {
    let app = TestApp::new();
    let id = app.create_post("Old Title", "Old Content!", 1).await;
    app.clear_events();

    let resp = app
        .put_json(
            &format!("/api/posts/{}", id),
            json!({
                "title": "New Title",
                "content": "New Content, rewritten",
                "is_opened": false,
                "user_id": 1,
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let body = app.get(&format!("/api/posts/{}", id)).await.json();
    assert_eq!(body["title"], "New Title");
    assert_eq!(body["content"], "New Content, rewritten");
    assert_eq!(body["is_opened"], false);

    assert_eq!(app.event_kinds(), vec!["post_updated"]);
}

#[tokio::test]
async fn update_post_by_other_user_is_forbidden() {
    let app = TestApp::new();
    let id = app.create_post("Old Title", "Old Content!", 1).await;
    app.clear_events();

    let resp = app
        .put_json(
            &format!("/api/posts/{}", id),
            json!({
                "title": "Hijacked",
                "content": "someone else's words",
                "is_opened": true,
                "user_id": 2,
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);

    // The post is untouched and no event went out.
    let body = app.get(&format!("/api/posts/{}", id)).await.json();
    assert_eq!(body["title"], "Old Title");
    assert_eq!(body["content"], "Old Content!");
    assert!(app.event_kinds().is_empty());
}

#[tokio::test]
async fn update_missing_post_returns_not_found() {
    let app = TestApp::new();

    let resp = app
        .put_json(
            "/api/posts/42",
            json!({
                "title": "Whatever title",
                "content": "whatever content here",
                "is_opened": true,
                "user_id": 1,
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_rejects_invalid_replacement_content() {
    let app = TestApp::new();
    let id = app.create_post("Old Title", "Old Content!", 1).await;

    let resp = app
        .put_json(
            &format!("/api/posts/{}", id),
            json!({
                "title": "New Title",
                "content": "short",
                "is_opened": true,
                "user_id": 1,
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let body = app.get(&format!("/api/posts/{}", id)).await.json();
    assert_eq!(body["content"], "Old Content!");
}

#[tokio::test]
async fn delete_post_by_owner_succeeds() {
    let app = TestApp::new();
    let id = app.create_post("Doomed post", "this one will not last", 5).await;
    app.clear_events();

    let resp = app
        .delete(&format!("/api/posts/{}?user_id=5", id))
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let fetched = app.get(&format!("/api/posts/{}", id)).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);

    assert_eq!(app.event_kinds(), vec!["post_deleted"]);
}

#[tokio::test]
async fn delete_post_by_other_user_is_forbidden() {
    let app = TestApp::new();
    let id = app.create_post("Sturdy post", "still standing afterwards", 5).await;
    app.clear_events();

    let resp = app
        .delete(&format!("/api/posts/{}?user_id=6", id))
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);

    let fetched = app.get(&format!("/api/posts/{}", id)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert!(app.event_kinds().is_empty());
}

#[tokio::test]
async fn delete_missing_post_publishes_nothing() {
    let app = TestApp::new();

    let resp = app.delete("/api/posts/99?user_id=1").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(app.event_kinds().is_empty());
}

#[tokio::test]
async fn report_post_returns_id() {
    let app = TestApp::new();
    let post_id = app.create_post("Reported post", "questionable material", 1).await;
    app.clear_events();

    let resp = app
        .post_json(
            &format!("/api/posts/{}/reports", post_id),
            json!({
                "content": "spam in the comments",
                "report_category_id": 2,
                "user_id": 9,
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let report_id = resp.json()["id"].as_i64().unwrap();

    let fetched = app.get(&format!("/api/reports/{}", report_id)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    let body = fetched.json();
    assert_eq!(body["post_id"], post_id);
    assert_eq!(body["report_category_id"], 2);
    assert_eq!(body["user_id"], 9);

    // Reports do not publish events.
    assert!(app.event_kinds().is_empty());
}

#[tokio::test]
async fn report_missing_post_returns_not_found() {
    let app = TestApp::new();

    let resp = app
        .post_json(
            "/api/posts/404/reports",
            json!({
                "content": "reporting the void",
                "report_category_id": 1,
                "user_id": 1,
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reports_by_user_lists_only_theirs() {
    let app = TestApp::new();
    let post_id = app.create_post("Reported post", "questionable material", 1).await;

    for (user_id, content) in [(9, "first report body"), (9, "second report body"), (3, "unrelated report")] {
        let resp = app
            .post_json(
                &format!("/api/posts/{}/reports", post_id),
                json!({
                    "content": content,
                    "report_category_id": 1,
                    "user_id": user_id,
                }),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED);
    }

    let listing = app.get("/api/reports/user/9").await.json();
    let reports = listing.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|report| report["user_id"] == 9));
}
