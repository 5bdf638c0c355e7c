//! Read side of the post aggregate: no mutation, no ownership checks.

use std::collections::HashMap;

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostCoComment, PostComment, PostReport};
use crate::store::Store;

#[derive(Clone)]
pub struct PostQueries {
    store: Store,
}

/// One page of an offset listing, with the metadata a pager needs.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
    pub first: bool,
    pub last: bool,
}

/// A post with its full two-level comment tree.
#[derive(Debug, Serialize)]
pub struct PostTree {
    #[serde(flatten)]
    pub post: Post,
    pub comments: Vec<CommentTree>,
}

#[derive(Debug, Serialize)]
pub struct CommentTree {
    #[serde(flatten)]
    pub comment: PostComment,
    pub co_comments: Vec<PostCoComment>,
}

impl PostQueries {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.store
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PostNotFound(id))
    }

    pub async fn posts_by_user(&self, user_id: i64) -> Result<Vec<Post>, DomainError> {
        Ok(self.store.posts.find_by_user(user_id).await?)
    }

    /// Zero-based page over all posts in store order.
    pub async fn post_page(&self, page: i64, size: i64) -> Result<Page<Post>, DomainError> {
        if page < 0 {
            return Err(DomainError::validation("page must not be negative"));
        }
        if size < 1 {
            return Err(DomainError::validation("size must be at least 1"));
        }

        let offset = page
            .checked_mul(size)
            .ok_or_else(|| DomainError::validation("page is out of range"))?;

        let total_elements = self.store.posts.count().await?;
        let items = self.store.posts.list_page(offset, size).await?;
        let total_pages = (total_elements + size - 1) / size;

        Ok(Page {
            items,
            page,
            size,
            total_elements,
            total_pages,
            first: page == 0,
            last: page + 1 >= total_pages,
        })
    }

    /// Assembles the three-level tree with two batched lookups: one for the
    /// comments of the post, one for the co-comments of all those comments.
    /// Comment order follows the comment lookup; each comment's co-comments
    /// keep the co-comment lookup's relative order.
    pub async fn post_with_comments(&self, post_id: i64) -> Result<PostTree, DomainError> {
        let post = self.get_post(post_id).await?;
        let comments = self.store.comments.find_by_post(post_id).await?;

        let comment_ids: Vec<i64> = comments.iter().map(|comment| comment.id).collect();
        let co_comments = self.store.co_comments.find_by_comments(&comment_ids).await?;

        let mut grouped: HashMap<i64, Vec<PostCoComment>> = HashMap::new();
        for co_comment in co_comments {
            grouped
                .entry(co_comment.comment_id)
                .or_default()
                .push(co_comment);
        }

        let comments = comments
            .into_iter()
            .map(|comment| {
                let co_comments = grouped.remove(&comment.id).unwrap_or_default();
                CommentTree {
                    comment,
                    co_comments,
                }
            })
            .collect();

        Ok(PostTree { post, comments })
    }

    /// Open posts created inside `[start, end]` by any of `user_ids`.
    /// Searching closed posts is not supported and fails before any store
    /// call.
    pub async fn search_posts(
        &self,
        start: OffsetDateTime,
        end: OffsetDateTime,
        user_ids: &[i64],
        opened_only: bool,
    ) -> Result<Vec<Post>, DomainError> {
        if !opened_only {
            return Err(DomainError::unsupported_filter(
                "searching closed posts is not supported",
            ));
        }
        Ok(self.store.posts.search_opened(start, end, user_ids).await?)
    }

    pub async fn get_comment(&self, id: i64) -> Result<PostComment, DomainError> {
        self.store
            .comments
            .find_by_id(id)
            .await?
            .ok_or(DomainError::CommentNotFound(id))
    }

    pub async fn comments_by_user(&self, user_id: i64) -> Result<Vec<PostComment>, DomainError> {
        Ok(self.store.comments.find_by_user(user_id).await?)
    }

    pub async fn get_co_comment(&self, id: i64) -> Result<PostCoComment, DomainError> {
        self.store
            .co_comments
            .find_by_id(id)
            .await?
            .ok_or(DomainError::CoCommentNotFound(id))
    }

    pub async fn co_comments_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<PostCoComment>, DomainError> {
        Ok(self.store.co_comments.find_by_user(user_id).await?)
    }

    pub async fn get_report(&self, id: i64) -> Result<PostReport, DomainError> {
        self.store
            .reports
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ReportNotFound(id))
    }

    pub async fn reports_by_user(&self, user_id: i64) -> Result<Vec<PostReport>, DomainError> {
        Ok(self.store.reports.find_by_user(user_id).await?)
    }
}
