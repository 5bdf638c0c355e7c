mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn register_user_returns_profile() {
    let app = TestApp::new();

    let resp = app
        .post_json(
            "/api/users",
            json!({
                "name": "Mina",
                "nickname": "wanderer",
                "email": "mina@example.com",
                "profile_url": null,
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    let body = resp.json();
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Mina");
    assert_eq!(body["nickname"], "wanderer");
    assert_eq!(body["email"], "mina@example.com");
    assert_eq!(body["is_available"], true);
    assert!(body["registered_at"].is_string());
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let app = TestApp::new();
    app.register_user("Mina", "mina@example.com").await;

    let resp = app
        .post_json(
            "/api/users",
            json!({
                "name": "Other Mina",
                "nickname": "other",
                "email": "mina@example.com",
                "profile_url": null,
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
    assert!(resp.error_message().contains("mina@example.com"));
}

#[tokio::test]
async fn register_rejects_blank_email() {
    let app = TestApp::new();

    let resp = app
        .post_json(
            "/api/users",
            json!({
                "name": "Nobody",
                "nickname": "nobody",
                "email": "  ",
                "profile_url": null,
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_missing_user_returns_not_found() {
    let app = TestApp::new();
    let resp = app.get("/api/users/404").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_profile_merges_only_given_fields() {
    let app = TestApp::new();
    let id = app.register_user("Mina", "mina@example.com").await;

    let resp = app
        .patch_json(
            &format!("/api/users/{}", id),
            json!({ "nickname": "globetrotter", "profile_url": "https://img.example.com/mina.png" }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);

    let body = resp.json();
    assert_eq!(body["name"], "Mina");
    assert_eq!(body["nickname"], "globetrotter");
    assert_eq!(body["profile_url"], "https://img.example.com/mina.png");

    // Persisted, not just echoed.
    let fetched = app.get(&format!("/api/users/{}", id)).await.json();
    assert_eq!(fetched["nickname"], "globetrotter");
}

#[tokio::test]
async fn follow_and_unfollow_round_trip() {
    let app = TestApp::new();
    let follower = app.register_user("Mina", "mina@example.com").await;
    let followee = app.register_user("Jun", "jun@example.com").await;

    let resp = app
        .post_json(
            &format!("/api/users/{}/follow", followee),
            json!({ "follower_id": follower }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let followers = app.get(&format!("/api/users/{}/followers", followee)).await.json();
    assert_eq!(followers, json!([follower]));
    let following = app.get(&format!("/api/users/{}/following", follower)).await.json();
    assert_eq!(following, json!([followee]));

    let resp = app
        .delete(&format!("/api/users/{}/follow?follower_id={}", followee, follower))
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let followers = app.get(&format!("/api/users/{}/followers", followee)).await.json();
    assert!(followers.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn following_twice_is_a_no_op() {
    let app = TestApp::new();
    let follower = app.register_user("Mina", "mina@example.com").await;
    let followee = app.register_user("Jun", "jun@example.com").await;

    for _ in 0..2 {
        let resp = app
            .post_json(
                &format!("/api/users/{}/follow", followee),
                json!({ "follower_id": follower }),
            )
            .await;
        assert_eq!(resp.status, StatusCode::NO_CONTENT);
    }

    let followers = app.get(&format!("/api/users/{}/followers", followee)).await.json();
    assert_eq!(followers.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn self_follow_is_rejected() {
    let app = TestApp::new();
    let id = app.register_user("Mina", "mina@example.com").await;

    let resp = app
        .post_json(&format!("/api/users/{}/follow", id), json!({ "follower_id": id }))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn following_a_missing_user_is_rejected() {
    let app = TestApp::new();
    let follower = app.register_user("Mina", "mina@example.com").await;

    let resp = app
        .post_json("/api/users/99/follow", json!({ "follower_id": follower }))
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unfollow_without_follow_is_idempotent() {
    let app = TestApp::new();
    let follower = app.register_user("Mina", "mina@example.com").await;
    let followee = app.register_user("Jun", "jun@example.com").await;

    let resp = app
        .delete(&format!("/api/users/{}/follow?follower_id={}", followee, follower))
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
}
