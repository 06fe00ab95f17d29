use chrono::Utc;
use gateward_core::{Password, ResetToken, UserStore, UserStoreError};

/// Error types for the set password use case
#[derive(Debug, thiserror::Error)]
pub enum SetPasswordError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Set password use case - consumes a reset token and stores the new
/// password hash.
pub struct SetPasswordUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> SetPasswordUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    /// Execute the set password use case
    ///
    /// The store performs the whole consumption atomically: token match,
    /// expiry check, hash update, and clearing of the token fields happen
    /// in one conditional update, so the token is unusable afterwards.
    #[tracing::instrument(name = "SetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: ResetToken,
        new_password: Password,
    ) -> Result<(), SetPasswordError> {
        self.user_store
            .consume_reset_token(&token, new_password, Utc::now())
            .await?;

        Ok(())
    }
}
