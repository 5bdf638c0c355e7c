use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A short video uploaded against a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clip {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub is_opened: bool,
    pub user_id: i64,
    pub trip_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub uploaded_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct ClipDraft {
    pub title: String,
    pub url: String,
    pub is_opened: bool,
    pub user_id: i64,
    pub trip_id: i64,
}
