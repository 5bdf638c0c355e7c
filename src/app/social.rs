use crate::domain::error::DomainError;
use crate::domain::follow::Follow;
use crate::store::Store;

#[derive(Clone)]
pub struct SocialService {
    store: Store,
}

impl SocialService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Following an already-followed user is a no-op.
    pub async fn follow(&self, follower_id: i64, followee_id: i64) -> Result<(), DomainError> {
        if follower_id == followee_id {
            return Err(DomainError::validation("users cannot follow themselves"));
        }
        self.store
            .users
            .find_by_id(followee_id)
            .await?
            .ok_or(DomainError::UserNotFound(followee_id))?;

        self.store
            .follows
            .insert(Follow {
                follower_id,
                followee_id,
            })
            .await?;
        Ok(())
    }

    pub async fn unfollow(&self, follower_id: i64, followee_id: i64) -> Result<(), DomainError> {
        self.store
            .follows
            .delete(Follow {
                follower_id,
                followee_id,
            })
            .await?;
        Ok(())
    }

    pub async fn followers(&self, user_id: i64) -> Result<Vec<i64>, DomainError> {
        Ok(self.store.follows.followers_of(user_id).await?)
    }

    pub async fn following(&self, user_id: i64) -> Result<Vec<i64>, DomainError> {
        Ok(self.store.follows.following_of(user_id).await?)
    }
}
