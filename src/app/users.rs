use time::OffsetDateTime;

use crate::domain::error::DomainError;
use crate::domain::user::{User, UserDraft};
use crate::store::Store;

#[derive(Clone)]
pub struct UserService {
    store: Store,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub profile_url: Option<String>,
}

impl UserService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Email is the login identity and must be unique.
    pub async fn register(&self, draft: UserDraft) -> Result<User, DomainError> {
        if draft.email.trim().is_empty() {
            return Err(DomainError::validation("email must not be empty"));
        }
        if let Some(_existing) = self.store.users.find_by_email(&draft.email).await? {
            return Err(DomainError::EmailTaken(draft.email));
        }
        Ok(self.store.users.insert(draft).await?)
    }

    pub async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        self.store
            .users
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound(id))
    }

    pub async fn update_profile(
        &self,
        id: i64,
        update: ProfileUpdate,
    ) -> Result<User, DomainError> {
        let mut user = self.get_user(id).await?;

        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(nickname) = update.nickname {
            user.nickname = nickname;
        }
        if let Some(profile_url) = update.profile_url {
            user.profile_url = Some(profile_url);
        }
        user.updated_at = OffsetDateTime::now_utc();

        self.store.users.update(&user).await?;
        Ok(user)
    }
}
