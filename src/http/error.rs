use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::error::DomainError;

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::PostNotFound(_)
            | DomainError::CommentNotFound(_)
            | DomainError::CoCommentNotFound(_)
            | DomainError::ReportNotFound(_)
            | DomainError::TripNotFound(_)
            | DomainError::ClipNotFound(_)
            | DomainError::UserNotFound(_) => Self::not_found(err.to_string()),
            DomainError::Validation(_) | DomainError::UnsupportedFilter(_) => {
                Self::bad_request(err.to_string())
            }
            DomainError::NotOwner { .. } => Self::forbidden(err.to_string()),
            DomainError::EmailTaken(_) => Self::conflict(err.to_string()),
            DomainError::Store(inner) => {
                tracing::error!(error = ?inner, "store failure");
                Self::internal("internal error")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}
