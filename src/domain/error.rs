use thiserror::Error;

/// Failure taxonomy for command and query services.
///
/// Everything except `Store` maps to a 4xx at the HTTP boundary; `Store`
/// wraps an underlying persistence failure and surfaces as a 500.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("post {0} not found")]
    PostNotFound(i64),
    #[error("post comment {0} not found")]
    CommentNotFound(i64),
    #[error("post co-comment {0} not found")]
    CoCommentNotFound(i64),
    #[error("post report {0} not found")]
    ReportNotFound(i64),
    #[error("trip {0} not found")]
    TripNotFound(i64),
    #[error("clip {0} not found")]
    ClipNotFound(i64),
    #[error("user {0} not found")]
    UserNotFound(i64),
    #[error("{0}")]
    Validation(String),
    #[error("user {user_id} is not the owner of {kind} {id}")]
    NotOwner {
        kind: &'static str,
        user_id: i64,
        id: i64,
    },
    #[error("{0}")]
    UnsupportedFilter(String),
    #[error("email {0} is already registered")]
    EmailTaken(String),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unsupported_filter(message: impl Into<String>) -> Self {
        Self::UnsupportedFilter(message.into())
    }
}
