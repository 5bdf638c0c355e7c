//! Write side of the post aggregate. Every handler follows the same shape:
//! load, authorize/validate, mutate, persist, publish.

use crate::domain::error::DomainError;
use crate::domain::post::{PostCoCommentDraft, PostCommentDraft, PostDraft, PostReportDraft};
use crate::domain::rules;
use crate::events::{DomainEvent, EventBus};
use crate::store::Store;

#[derive(Clone)]
pub struct PostCommands {
    store: Store,
    events: EventBus,
}

#[derive(Debug, Clone)]
pub struct UpdatePost {
    pub title: String,
    pub content: String,
    pub is_opened: bool,
    pub user_id: i64,
}

impl PostCommands {
    pub fn new(store: Store, events: EventBus) -> Self {
        Self { store, events }
    }

    /// Returns the id the store assigned to the new post.
    pub async fn create_post(&self, draft: PostDraft) -> Result<i64, DomainError> {
        rules::validate_post_content(&draft.title, &draft.content)?;

        let post = self.store.posts.insert(draft).await?;
        let id = post.id;
        self.events.publish(DomainEvent::PostCreated(post));
        Ok(id)
    }

    pub async fn update_post(&self, post_id: i64, cmd: UpdatePost) -> Result<(), DomainError> {
        let mut post = self
            .store
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        rules::ensure_post_owner(&post, cmd.user_id)?;

        post.apply_update(cmd.title, cmd.content, cmd.is_opened);
        rules::validate_post_content(&post.title, &post.content)?;

        self.store.posts.update(&post).await?;
        self.events.publish(DomainEvent::PostUpdated(post));
        Ok(())
    }

    pub async fn delete_post(&self, post_id: i64, user_id: i64) -> Result<(), DomainError> {
        let post = self
            .store
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        if !rules::is_authorized_to_delete(post.user_id, user_id) {
            return Err(DomainError::NotOwner {
                kind: "post",
                user_id,
                id: post_id,
            });
        }

        self.store.posts.delete(post_id).await?;
        self.events.publish(DomainEvent::PostDeleted(post));
        Ok(())
    }

    pub async fn create_comment(&self, draft: PostCommentDraft) -> Result<i64, DomainError> {
        rules::validate_comment_content(&draft.content)?;

        let comment = self.store.comments.insert(draft).await?;
        let id = comment.id;
        self.events.publish(DomainEvent::CommentCreated(comment));
        Ok(id)
    }

    pub async fn update_comment(
        &self,
        comment_id: i64,
        content: String,
        user_id: i64,
    ) -> Result<(), DomainError> {
        let mut comment = self
            .store
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;

        rules::ensure_comment_owner(&comment, user_id)?;

        comment.apply_update(content);
        rules::validate_comment_content(&comment.content)?;

        self.store.comments.update(&comment).await?;
        self.events.publish(DomainEvent::CommentUpdated(comment));
        Ok(())
    }

    pub async fn delete_comment(&self, comment_id: i64, user_id: i64) -> Result<(), DomainError> {
        let comment = self
            .store
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;

        if !rules::is_authorized_to_delete(comment.user_id, user_id) {
            return Err(DomainError::NotOwner {
                kind: "post comment",
                user_id,
                id: comment_id,
            });
        }

        self.store.comments.delete(comment_id).await?;
        self.events.publish(DomainEvent::CommentDeleted(comment));
        Ok(())
    }

    pub async fn create_co_comment(&self, draft: PostCoCommentDraft) -> Result<i64, DomainError> {
        rules::validate_comment_content(&draft.content)?;

        let co_comment = self.store.co_comments.insert(draft).await?;
        let id = co_comment.id;
        self.events
            .publish(DomainEvent::CoCommentCreated(co_comment));
        Ok(id)
    }

    pub async fn update_co_comment(
        &self,
        co_comment_id: i64,
        content: String,
        user_id: i64,
    ) -> Result<(), DomainError> {
        let mut co_comment = self
            .store
            .co_comments
            .find_by_id(co_comment_id)
            .await?
            .ok_or(DomainError::CoCommentNotFound(co_comment_id))?;

        rules::ensure_co_comment_owner(&co_comment, user_id)?;

        co_comment.apply_update(content);
        rules::validate_comment_content(&co_comment.content)?;

        self.store.co_comments.update(&co_comment).await?;
        self.events
            .publish(DomainEvent::CoCommentUpdated(co_comment));
        Ok(())
    }

    pub async fn delete_co_comment(
        &self,
        co_comment_id: i64,
        user_id: i64,
    ) -> Result<(), DomainError> {
        let co_comment = self
            .store
            .co_comments
            .find_by_id(co_comment_id)
            .await?
            .ok_or(DomainError::CoCommentNotFound(co_comment_id))?;

        if !rules::is_authorized_to_delete(co_comment.user_id, user_id) {
            return Err(DomainError::NotOwner {
                kind: "post co-comment",
                user_id,
                id: co_comment_id,
            });
        }

        self.store.co_comments.delete(co_comment_id).await?;
        self.events
            .publish(DomainEvent::CoCommentDeleted(co_comment));
        Ok(())
    }

    /// Reports are append-only; there is no update or delete and no event.
    pub async fn report_post(&self, draft: PostReportDraft) -> Result<i64, DomainError> {
        rules::validate_comment_content(&draft.content)?;

        let post_id = draft.post_id;
        self.store
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        let report = self.store.reports.insert(draft).await?;
        Ok(report.id)
    }
}
