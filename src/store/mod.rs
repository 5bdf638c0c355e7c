//! Persistence gateway: one trait per aggregate, stateless façades over the
//! backing store. Identity and timestamps are assigned on insert.
//!
//! Two backends exist: `postgres` (sqlx) and `memory` (mutex-guarded tables,
//! used by the test harness and for local development via
//! `STORE_BACKEND=memory`).

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::clip::{Clip, ClipDraft};
use crate::domain::follow::Follow;
use crate::domain::post::{
    Post, PostCoComment, PostCoCommentDraft, PostComment, PostCommentDraft, PostDraft, PostReport,
    PostReportDraft,
};
use crate::domain::trip::{Trip, TripDate, TripDraft};
use crate::domain::user::{User, UserDraft};
use crate::infra::db::Db;

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert(&self, draft: PostDraft) -> Result<Post>;
    async fn update(&self, post: &Post) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>>;
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Post>>;
    async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<Post>>;
    async fn count(&self) -> Result<i64>;
    /// Open posts created inside `[start, end]` by any of `user_ids`.
    async fn search_opened(
        &self,
        start: OffsetDateTime,
        end: OffsetDateTime,
        user_ids: &[i64],
    ) -> Result<Vec<Post>>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn insert(&self, draft: PostCommentDraft) -> Result<PostComment>;
    async fn update(&self, comment: &PostComment) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;
    async fn find_by_id(&self, id: i64) -> Result<Option<PostComment>>;
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<PostComment>>;
    async fn find_by_post(&self, post_id: i64) -> Result<Vec<PostComment>>;
}

#[async_trait]
pub trait CoCommentStore: Send + Sync {
    async fn insert(&self, draft: PostCoCommentDraft) -> Result<PostCoComment>;
    async fn update(&self, co_comment: &PostCoComment) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;
    async fn find_by_id(&self, id: i64) -> Result<Option<PostCoComment>>;
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<PostCoComment>>;
    /// Batched lookup for the comment-tree query: one call for the whole set
    /// of parent comment ids.
    async fn find_by_comments(&self, comment_ids: &[i64]) -> Result<Vec<PostCoComment>>;
}

#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn insert(&self, draft: PostReportDraft) -> Result<PostReport>;
    async fn find_by_id(&self, id: i64) -> Result<Option<PostReport>>;
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<PostReport>>;
}

#[async_trait]
pub trait ClipStore: Send + Sync {
    async fn insert(&self, draft: ClipDraft) -> Result<Clip>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Clip>>;
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Clip>>;
}

#[async_trait]
pub trait TripStore: Send + Sync {
    async fn insert(&self, draft: TripDraft) -> Result<(Trip, Vec<TripDate>)>;
    async fn find_by_id(&self, id: i64) -> Result<Option<(Trip, Vec<TripDate>)>>;
    /// Deletes the trip and its dates.
    async fn delete(&self, id: i64) -> Result<()>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, draft: UserDraft) -> Result<User>;
    async fn update(&self, user: &User) -> Result<()>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

#[async_trait]
pub trait FollowStore: Send + Sync {
    /// Inserting an existing pair is a no-op.
    async fn insert(&self, follow: Follow) -> Result<()>;
    async fn delete(&self, follow: Follow) -> Result<()>;
    async fn followers_of(&self, user_id: i64) -> Result<Vec<i64>>;
    async fn following_of(&self, user_id: i64) -> Result<Vec<i64>>;
}

/// The full gateway handed to application services.
#[derive(Clone)]
pub struct Store {
    pub posts: Arc<dyn PostStore>,
    pub comments: Arc<dyn CommentStore>,
    pub co_comments: Arc<dyn CoCommentStore>,
    pub reports: Arc<dyn ReportStore>,
    pub clips: Arc<dyn ClipStore>,
    pub trips: Arc<dyn TripStore>,
    pub users: Arc<dyn UserStore>,
    pub follows: Arc<dyn FollowStore>,
}

impl Store {
    pub fn postgres(db: Db) -> Self {
        let pg = Arc::new(postgres::PgStore::new(db));
        Self {
            posts: pg.clone(),
            comments: pg.clone(),
            co_comments: pg.clone(),
            reports: pg.clone(),
            clips: pg.clone(),
            trips: pg.clone(),
            users: pg.clone(),
            follows: pg,
        }
    }

    pub fn memory() -> Self {
        let mem = Arc::new(memory::MemoryStore::default());
        Self {
            posts: mem.clone(),
            comments: mem.clone(),
            co_comments: mem.clone(),
            reports: mem.clone(),
            clips: mem.clone(),
            trips: mem.clone(),
            users: mem.clone(),
            follows: mem,
        }
    }
}
