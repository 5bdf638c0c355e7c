use axum::{routing::delete, routing::get, routing::patch, routing::post, routing::put, Router};

use crate::http::handlers;
use crate::AppState;

pub fn health() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health))
}

pub fn posts() -> Router<AppState> {
    Router::new()
        .route("/api/posts", post(handlers::create_post))
        .route("/api/posts", get(handlers::list_posts))
        .route("/api/posts/search", get(handlers::search_posts))
        .route("/api/posts/user/:user_id", get(handlers::posts_by_user))
        .route("/api/posts/:id", get(handlers::get_post))
        .route("/api/posts/:id", put(handlers::update_post))
        .route("/api/posts/:id", delete(handlers::delete_post))
        .route("/api/posts/:id/full", get(handlers::get_post_full))
        .route("/api/posts/:id/comments", post(handlers::create_comment))
        .route("/api/posts/:id/reports", post(handlers::report_post))
}

pub fn comments() -> Router<AppState> {
    Router::new()
        .route("/api/comments/user/:user_id", get(handlers::comments_by_user))
        .route("/api/comments/:id", get(handlers::get_comment))
        .route("/api/comments/:id", put(handlers::update_comment))
        .route("/api/comments/:id", delete(handlers::delete_comment))
        .route(
            "/api/comments/:id/co-comments",
            post(handlers::create_co_comment),
        )
}

pub fn co_comments() -> Router<AppState> {
    Router::new()
        .route(
            "/api/co-comments/user/:user_id",
            get(handlers::co_comments_by_user),
        )
        .route("/api/co-comments/:id", get(handlers::get_co_comment))
        .route("/api/co-comments/:id", put(handlers::update_co_comment))
        .route("/api/co-comments/:id", delete(handlers::delete_co_comment))
}

pub fn reports() -> Router<AppState> {
    Router::new()
        .route("/api/reports/user/:user_id", get(handlers::reports_by_user))
        .route("/api/reports/:id", get(handlers::get_report))
}

pub fn trips() -> Router<AppState> {
    Router::new()
        .route("/api/trips", post(handlers::create_trip))
        .route("/api/trips/:id", get(handlers::get_trip))
        .route("/api/trips/:id", delete(handlers::delete_trip))
}

pub fn clips() -> Router<AppState> {
    Router::new()
        .route("/api/clips", post(handlers::create_clip))
        .route("/api/clips/user/:user_id", get(handlers::clips_by_user))
        .route("/api/clips/:id", get(handlers::get_clip))
}

pub fn users() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(handlers::register_user))
        .route("/api/users/:id", get(handlers::get_user))
        .route("/api/users/:id", patch(handlers::update_profile))
        .route("/api/users/:id/follow", post(handlers::follow_user))
        .route("/api/users/:id/follow", delete(handlers::unfollow_user))
        .route("/api/users/:id/followers", get(handlers::list_followers))
        .route("/api/users/:id/following", get(handlers::list_following))
}
