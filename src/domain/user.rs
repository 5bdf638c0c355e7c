use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub nickname: String,
    pub email: String,
    pub is_available: bool,
    pub profile_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub registered_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct UserDraft {
    pub name: String,
    pub nickname: String,
    pub email: String,
    pub profile_url: Option<String>,
}
