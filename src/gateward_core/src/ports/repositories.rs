use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::Password,
    reset_token::ResetToken,
    user::{NewUser, User},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,
    #[error("Hashing error: {0}")]
    HashingError(String),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserAlreadyExists, Self::UserAlreadyExists) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::InvalidOrExpiredToken, Self::InvalidOrExpiredToken) => true,
            (Self::HashingError(_), Self::HashingError(_)) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Persistence collaborator for user records.
///
/// The store is the sole synchronization point for the reset lifecycle:
/// `consume_reset_token` must check the token, its expiry, and the user's
/// existence in one atomic step relative to concurrent writers, so two
/// racing consumptions of the same live token cannot both succeed.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError>;

    async fn find_user_by_email(&self, email: &Email) -> Result<User, UserStoreError>;

    /// Persist a pending reset token onto the user record, overwriting
    /// any earlier unused one. At most one live token per user.
    async fn store_reset_token(
        &self,
        email: &Email,
        token: &ResetToken,
        expires_at: DateTime<Utc>,
    ) -> Result<(), UserStoreError>;

    /// Atomically consume a live reset token: match on token equality
    /// AND `expiry >= now`, hash the new password, store the hash, and
    /// clear both token fields in the same update. No match (unknown,
    /// expired, or already consumed) is `InvalidOrExpiredToken` -
    /// deliberately indistinguishable.
    async fn consume_reset_token(
        &self,
        token: &ResetToken,
        new_password: Password,
        now: DateTime<Utc>,
    ) -> Result<(), UserStoreError>;
}
