use axum::Router;

use crate::AppState;

mod error;
mod handlers;
mod routes;

pub use error::AppError;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health())
        .merge(routes::posts())
        .merge(routes::comments())
        .merge(routes::co_comments())
        .merge(routes::reports())
        .merge(routes::trips())
        .merge(routes::clips())
        .merge(routes::users())
        .with_state(state)
}
