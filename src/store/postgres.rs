//! sqlx-backed gateway. Every mutation is a single statement, so each call
//! is atomic on its own; cross-call isolation is whatever the database
//! provides (read committed by default).

use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::Row;
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
use crate::store::{
    ClipStore, CoCommentStore, CommentStore, FollowStore, PostStore, ReportStore, TripStore,
    UserStore,
};

pub struct PgStore {
    db: Db,
}

impl PgStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

fn post_from_row(row: &PgRow) -> Post {
    Post {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        is_opened: row.get("is_opened"),
        user_id: row.get("user_id"),
        trip_id: row.get("trip_id"),
        clip_id: row.get("clip_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn comment_from_row(row: &PgRow) -> PostComment {
    PostComment {
        id: row.get("id"),
        content: row.get("content"),
        user_id: row.get("user_id"),
        post_id: row.get("post_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn co_comment_from_row(row: &PgRow) -> PostCoComment {
    PostCoComment {
        id: row.get("id"),
        content: row.get("content"),
        user_id: row.get("user_id"),
        comment_id: row.get("comment_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn report_from_row(row: &PgRow) -> PostReport {
    PostReport {
        id: row.get("id"),
        content: row.get("content"),
        report_category_id: row.get("report_category_id"),
        user_id: row.get("user_id"),
        post_id: row.get("post_id"),
        created_at: row.get("created_at"),
    }
}

fn clip_from_row(row: &PgRow) -> Clip {
    Clip {
        id: row.get("id"),
        title: row.get("title"),
        url: row.get("url"),
        is_opened: row.get("is_opened"),
        user_id: row.get("user_id"),
        trip_id: row.get("trip_id"),
        uploaded_at: row.get("uploaded_at"),
    }
}

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
        nickname: row.get("nickname"),
        email: row.get("email"),
        is_available: row.get("is_available"),
        profile_url: row.get("profile_url"),
        registered_at: row.get("registered_at"),
        updated_at: row.get("updated_at"),
    }
}

fn trip_date_from_row(row: &PgRow) -> TripDate {
    TripDate {
        id: row.get("id"),
        trip_id: row.get("trip_id"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
    }
}

#[async_trait]
impl PostStore for PgStore {
    async fn insert(&self, draft: PostDraft) -> Result<Post> {
        let row = sqlx::query(
            "INSERT INTO posts (title, content, is_opened, user_id, trip_id, clip_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, title, content, is_opened, user_id, trip_id, clip_id, created_at, updated_at",
        )
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(draft.is_opened)
        .bind(draft.user_id)
        .bind(draft.trip_id)
        .bind(draft.clip_id)
        .fetch_one(self.db.pool())
        .await?;
        Ok(post_from_row(&row))
    }

    async fn update(&self, post: &Post) -> Result<()> {
        sqlx::query(
            "UPDATE posts SET title = $2, content = $3, is_opened = $4, updated_at = $5 \
             WHERE id = $1",
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.is_opened)
        .bind(post.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>> {
        let row = sqlx::query(
            "SELECT id, title, content, is_opened, user_id, trip_id, clip_id, created_at, updated_at \
             FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(row.as_ref().map(post_from_row))
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Post>> {
        let rows = sqlx::query(
            "SELECT id, title, content, is_opened, user_id, trip_id, clip_id, created_at, updated_at \
             FROM posts WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(rows.iter().map(post_from_row).collect())
    }

    async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<Post>> {
        let rows = sqlx::query(
            "SELECT id, title, content, is_opened, user_id, trip_id, clip_id, created_at, updated_at \
             FROM posts ORDER BY id OFFSET $1 LIMIT $2",
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(self.db.pool())
        .await?;
        Ok(rows.iter().map(post_from_row).collect())
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }

    async fn search_opened(
        &self,
        start: OffsetDateTime,
        end: OffsetDateTime,
        user_ids: &[i64],
    ) -> Result<Vec<Post>> {
        let rows = sqlx::query(
            "SELECT id, title, content, is_opened, user_id, trip_id, clip_id, created_at, updated_at \
             FROM posts \
             WHERE is_opened AND created_at BETWEEN $1 AND $2 AND user_id = ANY($3) \
             ORDER BY id",
        )
        .bind(start)
        .bind(end)
        .bind(user_ids)
        .fetch_all(self.db.pool())
        .await?;
        Ok(rows.iter().map(post_from_row).collect())
    }
}

#[async_trait]
impl CommentStore for PgStore {
    async fn insert(&self, draft: PostCommentDraft) -> Result<PostComment> {
        let row = sqlx::query(
            "INSERT INTO post_comments (content, user_id, post_id) VALUES ($1, $2, $3) \
             RETURNING id, content, user_id, post_id, created_at, updated_at",
        )
        .bind(&draft.content)
        .bind(draft.user_id)
        .bind(draft.post_id)
        .fetch_one(self.db.pool())
        .await?;
        Ok(comment_from_row(&row))
    }

    async fn update(&self, comment: &PostComment) -> Result<()> {
        sqlx::query("UPDATE post_comments SET content = $2, updated_at = $3 WHERE id = $1")
            .bind(comment.id)
            .bind(&comment.content)
            .bind(comment.updated_at)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM post_comments WHERE id = $1")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PostComment>> {
        let row = sqlx::query(
            "SELECT id, content, user_id, post_id, created_at, updated_at \
             FROM post_comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(row.as_ref().map(comment_from_row))
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<PostComment>> {
        let rows = sqlx::query(
            "SELECT id, content, user_id, post_id, created_at, updated_at \
             FROM post_comments WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(rows.iter().map(comment_from_row).collect())
    }

    async fn find_by_post(&self, post_id: i64) -> Result<Vec<PostComment>> {
        let rows = sqlx::query(
            "SELECT id, content, user_id, post_id, created_at, updated_at \
             FROM post_comments WHERE post_id = $1 ORDER BY id",
        )
        .bind(post_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(rows.iter().map(comment_from_row).collect())
    }
}

#[async_trait]
impl CoCommentStore for PgStore {
    async fn insert(&self, draft: PostCoCommentDraft) -> Result<PostCoComment> {
        let row = sqlx::query(
            "INSERT INTO post_co_comments (content, user_id, comment_id) VALUES ($1, $2, $3) \
             RETURNING id, content, user_id, comment_id, created_at, updated_at",
        )
        .bind(&draft.content)
        .bind(draft.user_id)
        .bind(draft.comment_id)
        .fetch_one(self.db.pool())
        .await?;
        Ok(co_comment_from_row(&row))
    }

    async fn update(&self, co_comment: &PostCoComment) -> Result<()> {
        sqlx::query("UPDATE post_co_comments SET content = $2, updated_at = $3 WHERE id = $1")
            .bind(co_comment.id)
            .bind(&co_comment.content)
            .bind(co_comment.updated_at)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM post_co_comments WHERE id = $1")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PostCoComment>> {
        let row = sqlx::query(
            "SELECT id, content, user_id, comment_id, created_at, updated_at \
             FROM post_co_comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(row.as_ref().map(co_comment_from_row))
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<PostCoComment>> {
        let rows = sqlx::query(
            "SELECT id, content, user_id, comment_id, created_at, updated_at \
             FROM post_co_comments WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(rows.iter().map(co_comment_from_row).collect())
    }

    async fn find_by_comments(&self, comment_ids: &[i64]) -> Result<Vec<PostCoComment>> {
        let rows = sqlx::query(
            "SELECT id, content, user_id, comment_id, created_at, updated_at \
             FROM post_co_comments WHERE comment_id = ANY($1) ORDER BY id",
        )
        .bind(comment_ids)
        .fetch_all(self.db.pool())
        .await?;
        Ok(rows.iter().map(co_comment_from_row).collect())
    }
}

#[async_trait]
impl ReportStore for PgStore {
    async fn insert(&self, draft: PostReportDraft) -> Result<PostReport> {
        let row = sqlx::query(
            "INSERT INTO post_reports (content, report_category_id, user_id, post_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, content, report_category_id, user_id, post_id, created_at",
        )
        .bind(&draft.content)
        .bind(draft.report_category_id)
        .bind(draft.user_id)
        .bind(draft.post_id)
        .fetch_one(self.db.pool())
        .await?;
        Ok(report_from_row(&row))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PostReport>> {
        let row = sqlx::query(
            "SELECT id, content, report_category_id, user_id, post_id, created_at \
             FROM post_reports WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(row.as_ref().map(report_from_row))
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<PostReport>> {
        let rows = sqlx::query(
            "SELECT id, content, report_category_id, user_id, post_id, created_at \
             FROM post_reports WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(rows.iter().map(report_from_row).collect())
    }
}

#[async_trait]
impl ClipStore for PgStore {
    async fn insert(&self, draft: ClipDraft) -> Result<Clip> {
        let row = sqlx::query(
            "INSERT INTO clips (title, url, is_opened, user_id, trip_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, title, url, is_opened, user_id, trip_id, uploaded_at",
        )
        .bind(&draft.title)
        .bind(&draft.url)
        .bind(draft.is_opened)
        .bind(draft.user_id)
        .bind(draft.trip_id)
        .fetch_one(self.db.pool())
        .await?;
        Ok(clip_from_row(&row))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Clip>> {
        let row = sqlx::query(
            "SELECT id, title, url, is_opened, user_id, trip_id, uploaded_at \
             FROM clips WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(row.as_ref().map(clip_from_row))
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Clip>> {
        let rows = sqlx::query(
            "SELECT id, title, url, is_opened, user_id, trip_id, uploaded_at \
             FROM clips WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(rows.iter().map(clip_from_row).collect())
    }
}

#[async_trait]
impl TripStore for PgStore {
    async fn insert(&self, draft: TripDraft) -> Result<(Trip, Vec<TripDate>)> {
        let mut tx = self.db.pool().begin().await?;

        let row = sqlx::query(
            "INSERT INTO trips (title, party) VALUES ($1, $2) RETURNING id, title, party",
        )
        .bind(&draft.title)
        .bind(&draft.party)
        .fetch_one(&mut *tx)
        .await?;
        let trip = Trip {
            id: row.get("id"),
            title: row.get("title"),
            party: row.get("party"),
        };

        let mut dates = Vec::with_capacity(draft.dates.len());
        for (start_date, end_date) in &draft.dates {
            let row = sqlx::query(
                "INSERT INTO trip_dates (trip_id, start_date, end_date) VALUES ($1, $2, $3) \
                 RETURNING id, trip_id, start_date, end_date",
            )
            .bind(trip.id)
            .bind(start_date)
            .bind(end_date)
            .fetch_one(&mut *tx)
            .await?;
            dates.push(trip_date_from_row(&row));
        }

        tx.commit().await?;
        Ok((trip, dates))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<(Trip, Vec<TripDate>)>> {
        let row = sqlx::query("SELECT id, title, party FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let trip = Trip {
            id: row.get("id"),
            title: row.get("title"),
            party: row.get("party"),
        };
        let rows = sqlx::query(
            "SELECT id, trip_id, start_date, end_date FROM trip_dates \
             WHERE trip_id = $1 ORDER BY start_date, id",
        )
        .bind(id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(Some((trip, rows.iter().map(trip_date_from_row).collect())))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;
        sqlx::query("DELETE FROM trip_dates WHERE trip_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert(&self, draft: UserDraft) -> Result<User> {
        let row = sqlx::query(
            "INSERT INTO users (name, nickname, email, profile_url) VALUES ($1, $2, $3, $4) \
             RETURNING id, name, nickname, email, is_available, profile_url, registered_at, updated_at",
        )
        .bind(&draft.name)
        .bind(&draft.nickname)
        .bind(&draft.email)
        .bind(&draft.profile_url)
        .fetch_one(self.db.pool())
        .await?;
        Ok(user_from_row(&row))
    }

    async fn update(&self, user: &User) -> Result<()> {
        sqlx::query(
            "UPDATE users SET name = $2, nickname = $3, is_available = $4, profile_url = $5, \
             updated_at = $6 WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.nickname)
        .bind(user.is_available)
        .bind(&user.profile_url)
        .bind(user.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, name, nickname, email, is_available, profile_url, registered_at, updated_at \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, name, nickname, email, is_available, profile_url, registered_at, updated_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(row.as_ref().map(user_from_row))
    }
}

#[async_trait]
impl FollowStore for PgStore {
    async fn insert(&self, follow: Follow) -> Result<()> {
        sqlx::query(
            "INSERT INTO follows (follower_id, followee_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(follow.follower_id)
        .bind(follow.followee_id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete(&self, follow: Follow) -> Result<()> {
        sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followee_id = $2")
            .bind(follow.follower_id)
            .bind(follow.followee_id)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    async fn followers_of(&self, user_id: i64) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar(
            "SELECT follower_id FROM follows WHERE followee_id = $1 ORDER BY follower_id",
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(ids)
    }

    async fn following_of(&self, user_id: i64) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar(
            "SELECT followee_id FROM follows WHERE follower_id = $1 ORDER BY followee_id",
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(ids)
    }
}
