use crate::domain::clip::{Clip, ClipDraft};
use crate::domain::error::DomainError;
use crate::store::Store;

#[derive(Clone)]
pub struct ClipService {
    store: Store,
}

impl ClipService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn create_clip(&self, draft: ClipDraft) -> Result<Clip, DomainError> {
        if draft.title.trim().is_empty() {
            return Err(DomainError::validation("clip title must not be empty"));
        }
        if draft.url.trim().is_empty() {
            return Err(DomainError::validation("clip url must not be empty"));
        }
        Ok(self.store.clips.insert(draft).await?)
    }

    pub async fn get_clip(&self, id: i64) -> Result<Clip, DomainError> {
        self.store
            .clips
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ClipNotFound(id))
    }

    pub async fn clips_by_user(&self, user_id: i64) -> Result<Vec<Clip>, DomainError> {
        Ok(self.store.clips.find_by_user(user_id).await?)
    }
}
