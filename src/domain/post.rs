use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A journal entry tied to a trip, optionally linking a clip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub is_opened: bool,
    pub user_id: i64,
    pub trip_id: i64,
    pub clip_id: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Post {
    /// Applies the mutable fields of an update and stamps `updated_at`.
    pub fn apply_update(&mut self, title: String, content: String, is_opened: bool) {
        self.title = title;
        self.content = content;
        self.is_opened = is_opened;
        self.updated_at = OffsetDateTime::now_utc();
    }
}

/// Fields of a post before the store has assigned identity and timestamps.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub is_opened: bool,
    pub user_id: i64,
    pub trip_id: i64,
    pub clip_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostComment {
    pub id: i64,
    pub content: String,
    pub user_id: i64,
    pub post_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl PostComment {
    pub fn apply_update(&mut self, content: String) {
        self.content = content;
        self.updated_at = OffsetDateTime::now_utc();
    }
}

#[derive(Debug, Clone)]
pub struct PostCommentDraft {
    pub content: String,
    pub user_id: i64,
    pub post_id: i64,
}

/// A reply to a comment, one nesting level below a top-level comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCoComment {
    pub id: i64,
    pub content: String,
    pub user_id: i64,
    pub comment_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl PostCoComment {
    pub fn apply_update(&mut self, content: String) {
        self.content = content;
        self.updated_at = OffsetDateTime::now_utc();
    }
}

#[derive(Debug, Clone)]
pub struct PostCoCommentDraft {
    pub content: String,
    pub user_id: i64,
    pub comment_id: i64,
}

/// An abuse report filed by `user_id` against `post_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostReport {
    pub id: i64,
    pub content: String,
    pub report_category_id: i64,
    pub user_id: i64,
    pub post_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct PostReportDraft {
    pub content: String,
    pub report_category_id: i64,
    pub user_id: i64,
    pub post_id: i64,
}
