use chrono::{DateTime, Utc};
use secrecy::Secret;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{email::Email, password::Password, reset_token::ResetToken, role::Role};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("Reset token and expiry must be set and cleared together")]
    MismatchedResetState,
}

/// A persisted user record as this core sees it. The persistence
/// collaborator owns the record; this type only reads and mutates the
/// fields the gates and the reset lifecycle care about.
#[derive(Debug, Clone)]
pub struct User {
    id: Uuid,
    email: Email,
    password_hash: Secret<String>,
    role: Role,
    reset_token: Option<ResetToken>,
    reset_token_expiry: Option<DateTime<Utc>>,
}

impl User {
    /// Rehydrate a user from storage.
    ///
    /// Enforces the pairing invariant: a reset token without an expiry
    /// (or the reverse) is corrupt state and is rejected.
    pub fn parse(
        id: Uuid,
        email: Email,
        password_hash: Secret<String>,
        role: Role,
        reset_token: Option<ResetToken>,
        reset_token_expiry: Option<DateTime<Utc>>,
    ) -> Result<Self, UserError> {
        if reset_token.is_some() != reset_token_expiry.is_some() {
            return Err(UserError::MismatchedResetState);
        }
        Ok(Self {
            id,
            email,
            password_hash,
            role,
            reset_token,
            reset_token_expiry,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &Secret<String> {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn reset_token(&self) -> Option<&ResetToken> {
        self.reset_token.as_ref()
    }

    pub fn reset_token_expiry(&self) -> Option<DateTime<Utc>> {
        self.reset_token_expiry
    }

    /// True while a reset is pending for this user.
    pub fn has_pending_reset(&self) -> bool {
        self.reset_token.is_some()
    }
}

/// A user about to be created; the store hashes the password at insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password: Password,
    pub role: Role,
}

impl NewUser {
    pub fn new(email: Email, password: Password, role: Role) -> Self {
        Self {
            email,
            password,
            role,
        }
    }
}

/// Decoded, verified proof of who is making the current request.
///
/// Lives only for the request being processed; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityClaim {
    pub user_id: Uuid,
    pub role: Role,
}
