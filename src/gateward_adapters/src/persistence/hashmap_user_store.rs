use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use gateward_core::{
    Email, NewUser, Password, ResetToken, Role, User, UserStore, UserStoreError,
};
use secrecy::Secret;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::compute_password_hash;

/// In-memory user store for tests and local development.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<Email, StoredUser>>>,
}

#[derive(Clone)]
struct StoredUser {
    id: Uuid,
    password_hash: Secret<String>,
    role: Role,
    reset_token: Option<ResetToken>,
    reset_token_expiry: Option<DateTime<Utc>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(new_user.password.clone())
            .await
            .map_err(UserStoreError::HashingError)?;

        let mut users = self.users.write().await;
        if users.contains_key(&new_user.email) {
            return Err(UserStoreError::UserAlreadyExists);
        }

        let id = Uuid::new_v4();
        users.insert(
            new_user.email.clone(),
            StoredUser {
                id,
                password_hash: password_hash.clone(),
                role: new_user.role,
                reset_token: None,
                reset_token_expiry: None,
            },
        );

        User::parse(id, new_user.email, password_hash, new_user.role, None, None)
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))
    }

    async fn find_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        let stored = users.get(email).ok_or(UserStoreError::UserNotFound)?;

        User::parse(
            stored.id,
            email.clone(),
            stored.password_hash.clone(),
            stored.role,
            stored.reset_token.clone(),
            stored.reset_token_expiry,
        )
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))
    }

    async fn store_reset_token(
        &self,
        email: &Email,
        token: &ResetToken,
        expires_at: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(email).ok_or(UserStoreError::UserNotFound)?;

        stored.reset_token = Some(token.clone());
        stored.reset_token_expiry = Some(expires_at);
        Ok(())
    }

    async fn consume_reset_token(
        &self,
        token: &ResetToken,
        new_password: Password,
        now: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(UserStoreError::HashingError)?;

        // Match and mutate inside a single write-lock section; a second
        // consumer of the same token serializes behind the lock and no
        // longer matches.
        let mut users = self.users.write().await;
        let stored = users
            .values_mut()
            .find(|stored| {
                stored.reset_token.as_ref() == Some(token)
                    && stored.reset_token_expiry.is_some_and(|expiry| expiry >= now)
            })
            .ok_or(UserStoreError::InvalidOrExpiredToken)?;

        stored.password_hash = password_hash;
        stored.reset_token = None;
        stored.reset_token_expiry = None;
        Ok(())
    }
}
