//! In-process event fan-out for aggregate state changes.
//!
//! Publication is synchronous and best-effort: listeners run on the calling
//! task after a successful persist, and a listener has no way to roll the
//! write back. Delivery is at-most-once.

use std::sync::Arc;

use crate::domain::post::{Post, PostCoComment, PostComment};

#[derive(Debug, Clone)]
pub enum DomainEvent {
    PostCreated(Post),
    PostUpdated(Post),
    PostDeleted(Post),
    CommentCreated(PostComment),
    CommentUpdated(PostComment),
    CommentDeleted(PostComment),
    CoCommentCreated(PostCoComment),
    CoCommentUpdated(PostCoComment),
    CoCommentDeleted(PostCoComment),
}

impl DomainEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PostCreated(_) => "post_created",
            Self::PostUpdated(_) => "post_updated",
            Self::PostDeleted(_) => "post_deleted",
            Self::CommentCreated(_) => "comment_created",
            Self::CommentUpdated(_) => "comment_updated",
            Self::CommentDeleted(_) => "comment_deleted",
            Self::CoCommentCreated(_) => "co_comment_created",
            Self::CoCommentUpdated(_) => "co_comment_updated",
            Self::CoCommentDeleted(_) => "co_comment_deleted",
        }
    }
}

pub trait EventListener: Send + Sync {
    fn on_event(&self, event: &DomainEvent);
}

/// The listener set is fixed at composition time; there is no runtime
/// registry to mutate.
#[derive(Clone)]
pub struct EventBus {
    listeners: Arc<[Arc<dyn EventListener>]>,
}

impl EventBus {
    pub fn new(listeners: Vec<Arc<dyn EventListener>>) -> Self {
        Self {
            listeners: listeners.into(),
        }
    }

    pub fn publish(&self, event: DomainEvent) {
        for listener in self.listeners.iter() {
            listener.on_event(&event);
        }
    }
}

/// The only listener shipped with the service: structured logging of every
/// aggregate change.
pub struct LogListener;

impl EventListener for LogListener {
    fn on_event(&self, event: &DomainEvent) {
        match event {
            DomainEvent::PostCreated(post)
            | DomainEvent::PostUpdated(post)
            | DomainEvent::PostDeleted(post) => {
                tracing::info!(kind = event.kind(), post_id = post.id, title = %post.title, "post event");
            }
            DomainEvent::CommentCreated(comment)
            | DomainEvent::CommentUpdated(comment)
            | DomainEvent::CommentDeleted(comment) => {
                tracing::info!(
                    kind = event.kind(),
                    comment_id = comment.id,
                    post_id = comment.post_id,
                    "comment event"
                );
            }
            DomainEvent::CoCommentCreated(co_comment)
            | DomainEvent::CoCommentUpdated(co_comment)
            | DomainEvent::CoCommentDeleted(co_comment) => {
                tracing::info!(
                    kind = event.kind(),
                    co_comment_id = co_comment.id,
                    comment_id = co_comment.comment_id,
                    "co-comment event"
                );
            }
        }
    }
}
