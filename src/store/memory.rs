//! Mutex-guarded tables mirroring the relational schema. Each method takes
//! the lock once and never awaits while holding it.

use std::collections::HashSet;
use std::sync::Mutex;

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
use crate::store::{
    ClipStore, CoCommentStore, CommentStore, FollowStore, PostStore, ReportStore, TripStore,
    UserStore,
};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    posts: Vec<Post>,
    comments: Vec<PostComment>,
    co_comments: Vec<PostCoComment>,
    reports: Vec<PostReport>,
    clips: Vec<Clip>,
    trips: Vec<Trip>,
    trip_dates: Vec<TripDate>,
    users: Vec<User>,
    follows: HashSet<Follow>,
    next_id: NextId,
}

#[derive(Default)]
struct NextId {
    post: i64,
    comment: i64,
    co_comment: i64,
    report: i64,
    clip: i64,
    trip: i64,
    trip_date: i64,
    user: i64,
}

fn bump(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn insert(&self, draft: PostDraft) -> Result<Post> {
        let now = OffsetDateTime::now_utc();
        let mut tables = self.inner.lock().unwrap();
        let post = Post {
            id: bump(&mut tables.next_id.post),
            title: draft.title,
            content: draft.content,
            is_opened: draft.is_opened,
            user_id: draft.user_id,
            trip_id: draft.trip_id,
            clip_id: draft.clip_id,
            created_at: now,
            updated_at: now,
        };
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: &Post) -> Result<()> {
        let mut tables = self.inner.lock().unwrap();
        if let Some(row) = tables.posts.iter_mut().find(|row| row.id == post.id) {
            *row = post.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut tables = self.inner.lock().unwrap();
        tables.posts.retain(|row| row.id != id);
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.posts.iter().find(|row| row.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Post>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .posts
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<Post>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .posts
            .iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.posts.len() as i64)
    }

    async fn search_opened(
        &self,
        start: OffsetDateTime,
        end: OffsetDateTime,
        user_ids: &[i64],
    ) -> Result<Vec<Post>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .posts
            .iter()
            .filter(|row| {
                row.is_opened
                    && row.created_at >= start
                    && row.created_at <= end
                    && user_ids.contains(&row.user_id)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn insert(&self, draft: PostCommentDraft) -> Result<PostComment> {
        let now = OffsetDateTime::now_utc();
        let mut tables = self.inner.lock().unwrap();
        let comment = PostComment {
            id: bump(&mut tables.next_id.comment),
            content: draft.content,
            user_id: draft.user_id,
            post_id: draft.post_id,
            created_at: now,
            updated_at: now,
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn update(&self, comment: &PostComment) -> Result<()> {
        let mut tables = self.inner.lock().unwrap();
        if let Some(row) = tables.comments.iter_mut().find(|row| row.id == comment.id) {
            *row = comment.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut tables = self.inner.lock().unwrap();
        tables.comments.retain(|row| row.id != id);
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PostComment>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.comments.iter().find(|row| row.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<PostComment>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .comments
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_post(&self, post_id: i64) -> Result<Vec<PostComment>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .comments
            .iter()
            .filter(|row| row.post_id == post_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CoCommentStore for MemoryStore {
    async fn insert(&self, draft: PostCoCommentDraft) -> Result<PostCoComment> {
        let now = OffsetDateTime::now_utc();
        let mut tables = self.inner.lock().unwrap();
        let co_comment = PostCoComment {
            id: bump(&mut tables.next_id.co_comment),
            content: draft.content,
            user_id: draft.user_id,
            comment_id: draft.comment_id,
            created_at: now,
            updated_at: now,
        };
        tables.co_comments.push(co_comment.clone());
        Ok(co_comment)
    }

    async fn update(&self, co_comment: &PostCoComment) -> Result<()> {
        let mut tables = self.inner.lock().unwrap();
        if let Some(row) = tables
            .co_comments
            .iter_mut()
            .find(|row| row.id == co_comment.id)
        {
            *row = co_comment.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut tables = self.inner.lock().unwrap();
        tables.co_comments.retain(|row| row.id != id);
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PostCoComment>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.co_comments.iter().find(|row| row.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<PostCoComment>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .co_comments
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_comments(&self, comment_ids: &[i64]) -> Result<Vec<PostCoComment>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .co_comments
            .iter()
            .filter(|row| comment_ids.contains(&row.comment_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn insert(&self, draft: PostReportDraft) -> Result<PostReport> {
        let mut tables = self.inner.lock().unwrap();
        let report = PostReport {
            id: bump(&mut tables.next_id.report),
            content: draft.content,
            report_category_id: draft.report_category_id,
            user_id: draft.user_id,
            post_id: draft.post_id,
            created_at: OffsetDateTime::now_utc(),
        };
        tables.reports.push(report.clone());
        Ok(report)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PostReport>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.reports.iter().find(|row| row.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<PostReport>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .reports
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ClipStore for MemoryStore {
    async fn insert(&self, draft: ClipDraft) -> Result<Clip> {
        let mut tables = self.inner.lock().unwrap();
        let clip = Clip {
            id: bump(&mut tables.next_id.clip),
            title: draft.title,
            url: draft.url,
            is_opened: draft.is_opened,
            user_id: draft.user_id,
            trip_id: draft.trip_id,
            uploaded_at: OffsetDateTime::now_utc(),
        };
        tables.clips.push(clip.clone());
        Ok(clip)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Clip>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.clips.iter().find(|row| row.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Clip>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .clips
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TripStore for MemoryStore {
    async fn insert(&self, draft: TripDraft) -> Result<(Trip, Vec<TripDate>)> {
        let mut tables = self.inner.lock().unwrap();
        let trip = Trip {
            id: bump(&mut tables.next_id.trip),
            title: draft.title,
            party: draft.party,
        };
        let mut dates = Vec::with_capacity(draft.dates.len());
        for (start_date, end_date) in draft.dates {
            let date = TripDate {
                id: bump(&mut tables.next_id.trip_date),
                trip_id: trip.id,
                start_date,
                end_date,
            };
            tables.trip_dates.push(date.clone());
            dates.push(date);
        }
        tables.trips.push(trip.clone());
        Ok((trip, dates))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<(Trip, Vec<TripDate>)>> {
        let tables = self.inner.lock().unwrap();
        let Some(trip) = tables.trips.iter().find(|row| row.id == id).cloned() else {
            return Ok(None);
        };
        let dates = tables
            .trip_dates
            .iter()
            .filter(|row| row.trip_id == id)
            .cloned()
            .collect();
        Ok(Some((trip, dates)))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut tables = self.inner.lock().unwrap();
        tables.trips.retain(|row| row.id != id);
        tables.trip_dates.retain(|row| row.trip_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, draft: UserDraft) -> Result<User> {
        let now = OffsetDateTime::now_utc();
        let mut tables = self.inner.lock().unwrap();
        let user = User {
            id: bump(&mut tables.next_id.user),
            name: draft.name,
            nickname: draft.nickname,
            email: draft.email,
            is_available: true,
            profile_url: draft.profile_url,
            registered_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<()> {
        let mut tables = self.inner.lock().unwrap();
        if let Some(row) = tables.users.iter_mut().find(|row| row.id == user.id) {
            *row = user.clone();
        }
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.users.iter().find(|row| row.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.users.iter().find(|row| row.email == email).cloned())
    }
}

#[async_trait]
impl FollowStore for MemoryStore {
    async fn insert(&self, follow: Follow) -> Result<()> {
        let mut tables = self.inner.lock().unwrap();
        tables.follows.insert(follow);
        Ok(())
    }

    async fn delete(&self, follow: Follow) -> Result<()> {
        let mut tables = self.inner.lock().unwrap();
        tables.follows.remove(&follow);
        Ok(())
    }

    async fn followers_of(&self, user_id: i64) -> Result<Vec<i64>> {
        let tables = self.inner.lock().unwrap();
        let mut ids: Vec<i64> = tables
            .follows
            .iter()
            .filter(|f| f.followee_id == user_id)
            .map(|f| f.follower_id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn following_of(&self, user_id: i64) -> Result<Vec<i64>> {
        let tables = self.inner.lock().unwrap();
        let mut ids: Vec<i64> = tables
            .follows
            .iter()
            .filter(|f| f.follower_id == user_id)
            .map(|f| f.followee_id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
