use chrono::{Duration, Utc};
use gateward_core::{
    Email, EmailClient, RESET_TOKEN_TTL_SECONDS, ResetToken, UserStore, UserStoreError,
};

pub const RESET_EMAIL_SUBJECT: &str = "Password reset request";
pub const RESET_EMAIL_TEMPLATE: &str = "password_reset";

/// Error types for the password reset request use case
#[derive(Debug, thiserror::Error)]
pub enum RequestPasswordResetError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Password reset request use case - issues a single-use reset token and
/// notifies the user.
pub struct RequestPasswordResetUseCase<U, E>
where
    U: UserStore,
    E: EmailClient,
{
    user_store: U,
    email_client: E,
}

impl<U, E> RequestPasswordResetUseCase<U, E>
where
    U: UserStore,
    E: EmailClient,
{
    pub fn new(user_store: U, email_client: E) -> Self {
        Self {
            user_store,
            email_client,
        }
    }

    /// Execute the password reset request use case
    ///
    /// Looks the user up by email, persists a fresh token with a one hour
    /// expiry (overwriting any earlier pending token), then dispatches the
    /// notification. The token is persisted before the send: a delivery
    /// failure is logged and swallowed, the token stays valid.
    #[tracing::instrument(name = "RequestPasswordResetUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> Result<(), RequestPasswordResetError> {
        let user = self.user_store.find_user_by_email(&email).await?;

        let token = ResetToken::generate();
        let expires_at = Utc::now() + Duration::seconds(RESET_TOKEN_TTL_SECONDS);

        self.user_store
            .store_reset_token(&email, &token, expires_at)
            .await?;

        if let Err(error) = self
            .email_client
            .send_email(
                user.email(),
                RESET_EMAIL_SUBJECT,
                RESET_EMAIL_TEMPLATE,
                serde_json::json!({ "token": token.as_str() }),
            )
            .await
        {
            tracing::error!(%error, "failed to dispatch password reset email");
        }

        Ok(())
    }
}
