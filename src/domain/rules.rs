//! Pure business rules over in-memory aggregates. Nothing here touches the
//! store; command services call these before persisting.

use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostCoComment, PostComment};

pub const MIN_TITLE_CHARS: usize = 3;
pub const MIN_CONTENT_CHARS: usize = 10;

pub fn validate_post_content(title: &str, content: &str) -> Result<(), DomainError> {
    if content.chars().count() < MIN_CONTENT_CHARS {
        return Err(DomainError::validation(format!(
            "post content must be at least {} characters",
            MIN_CONTENT_CHARS
        )));
    }
    if title.chars().count() < MIN_TITLE_CHARS {
        return Err(DomainError::validation(format!(
            "post title must be at least {} characters",
            MIN_TITLE_CHARS
        )));
    }
    Ok(())
}

pub fn validate_comment_content(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::validation("comment content must not be empty"));
    }
    Ok(())
}

pub fn ensure_post_owner(post: &Post, user_id: i64) -> Result<(), DomainError> {
    ensure_owner("post", post.id, post.user_id, user_id)
}

pub fn ensure_comment_owner(comment: &PostComment, user_id: i64) -> Result<(), DomainError> {
    ensure_owner("post comment", comment.id, comment.user_id, user_id)
}

pub fn ensure_co_comment_owner(co_comment: &PostCoComment, user_id: i64) -> Result<(), DomainError> {
    ensure_owner("post co-comment", co_comment.id, co_comment.user_id, user_id)
}

/// True when `user_id` may delete an aggregate owned by `owner_id`.
///
/// The predicate is deliberately positive ("is authorized"); delete handlers
/// deny on `false`.
pub fn is_authorized_to_delete(owner_id: i64, user_id: i64) -> bool {
    owner_id == user_id
}

fn ensure_owner(kind: &'static str, id: i64, owner_id: i64, user_id: i64) -> Result<(), DomainError> {
    if owner_id != user_id {
        return Err(DomainError::NotOwner { kind, user_id, id });
    }
    Ok(())
}
