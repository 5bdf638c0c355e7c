#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use wayfarer::events::{DomainEvent, EventBus, EventListener};
use wayfarer::store::Store;
use wayfarer::{http, AppState};

// ---------------------------------------------------------------------------
// TestApp — a fresh in-memory backend per test
// ---------------------------------------------------------------------------

pub struct TestApp {
    router: Router,
    pub store: Store,
    recorded: Arc<Mutex<Vec<DomainEvent>>>,
}

pub struct TestResponse {
    pub status: StatusCode,
    body_bytes: bytes::Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body_bytes).unwrap_or(Value::Null)
    }

    pub fn error_message(&self) -> String {
        self.json()["error"].as_str().unwrap_or("").to_string()
    }
}

/// Captures every published event so tests can assert on the write path's
/// side effects.
struct RecordingListener(Arc<Mutex<Vec<DomainEvent>>>);

impl EventListener for RecordingListener {
    fn on_event(&self, event: &DomainEvent) {
        self.0.lock().unwrap().push(event.clone());
    }
}

impl TestApp {
    pub fn new() -> Self {
        let store = Store::memory();
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let events = EventBus::new(vec![Arc::new(RecordingListener(recorded.clone()))]);
        let state = AppState {
            store: store.clone(),
            events,
        };
        let router = http::router(state);
        TestApp {
            router,
            store,
            recorded,
        }
    }

    /// Kinds of every event published so far, in publication order.
    pub fn event_kinds(&self) -> Vec<&'static str> {
        self.recorded
            .lock()
            .unwrap()
            .iter()
            .map(|event| event.kind())
            .collect()
    }

    pub fn clear_events(&self) {
        self.recorded.lock().unwrap().clear();
    }

    // ------------------------------------------------------------------
    // Low-level request helper
    // ------------------------------------------------------------------
    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder()
            .method(method)
            .uri(path)
            .header("host", "localhost");

        let request = if let Some(body) = body {
            builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap()
        } else {
            builder.body(Body::empty()).unwrap()
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot failed");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to collect body")
            .to_bytes();

        TestResponse { status, body_bytes }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path, None).await
    }

    pub async fn post_json(&self, path: &str, body: Value) -> TestResponse {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put_json(&self, path: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn patch_json(&self, path: &str, body: Value) -> TestResponse {
        self.request(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request(Method::DELETE, path, None).await
    }

    // ------------------------------------------------------------------
    // Test data helpers
    // ------------------------------------------------------------------

    /// Create a post through the API and return its id.
    pub async fn create_post(&self, title: &str, content: &str, user_id: i64) -> i64 {
        let resp = self
            .post_json(
                "/api/posts",
                json!({
                    "title": title,
                    "content": content,
                    "is_opened": true,
                    "user_id": user_id,
                    "trip_id": 1,
                    "clip_id": null,
                }),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "create_post failed");
        resp.json()["id"].as_i64().expect("missing post id")
    }

    /// Create a comment on `post_id` through the API and return its id.
    pub async fn create_comment(&self, post_id: i64, content: &str, user_id: i64) -> i64 {
        let resp = self
            .post_json(
                &format!("/api/posts/{}/comments", post_id),
                json!({ "content": content, "user_id": user_id }),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "create_comment failed");
        resp.json()["id"].as_i64().expect("missing comment id")
    }

    /// Create a co-comment on `comment_id` through the API and return its id.
    pub async fn create_co_comment(&self, comment_id: i64, content: &str, user_id: i64) -> i64 {
        let resp = self
            .post_json(
                &format!("/api/comments/{}/co-comments", comment_id),
                json!({ "content": content, "user_id": user_id }),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "create_co_comment failed");
        resp.json()["id"].as_i64().expect("missing co-comment id")
    }

    /// Register a user through the API and return their id.
    pub async fn register_user(&self, name: &str, email: &str) -> i64 {
        let resp = self
            .post_json(
                "/api/users",
                json!({
                    "name": name,
                    "nickname": name,
                    "email": email,
                    "profile_url": null,
                }),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "register_user failed");
        resp.json()["id"].as_i64().expect("missing user id")
    }
}
