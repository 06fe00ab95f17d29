use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gateward_application::{RequestPasswordResetError, SetPasswordError};
use gateward_core::{AuthzError, EmailError, PasswordError, UserStoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::jwt::TokenAuthError;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Boundary error for every auth route and guard. Handlers and
/// middleware return typed errors; the status/message mapping happens
/// here and nowhere else.
#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("Missing authentication token")]
    MissingToken,

    // Malformed, bad-signature, and expired credentials all share one
    // client-facing message.
    #[error("Invalid or expired authentication token")]
    AuthenticationError(#[source] TokenAuthError),

    #[error("Forbidden")]
    Forbidden,

    #[error("Insufficient permissions")]
    InsufficientPermission,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            AuthApiError::MissingToken | AuthApiError::AuthenticationError(_) => {
                StatusCode::UNAUTHORIZED
            }

            AuthApiError::Forbidden | AuthApiError::InsufficientPermission => {
                StatusCode::FORBIDDEN
            }

            AuthApiError::UserNotFound => StatusCode::NOT_FOUND,

            AuthApiError::InvalidOrExpiredToken | AuthApiError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }

            AuthApiError::UnexpectedError(e) => {
                tracing::error!(error = %e, "request failed unexpectedly");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status_code, body).into_response()
    }
}

impl From<TokenAuthError> for AuthApiError {
    fn from(error: TokenAuthError) -> Self {
        match error {
            TokenAuthError::MissingToken => AuthApiError::MissingToken,
            other => AuthApiError::AuthenticationError(other),
        }
    }
}

impl From<AuthzError> for AuthApiError {
    fn from(error: AuthzError) -> Self {
        match error {
            AuthzError::Forbidden => AuthApiError::Forbidden,
            AuthzError::InsufficientPermission { .. } => AuthApiError::InsufficientPermission,
        }
    }
}

impl From<EmailError> for AuthApiError {
    fn from(error: EmailError) -> Self {
        AuthApiError::InvalidInput(error.to_string())
    }
}

impl From<PasswordError> for AuthApiError {
    fn from(error: PasswordError) -> Self {
        AuthApiError::InvalidInput(error.to_string())
    }
}

impl From<UserStoreError> for AuthApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => AuthApiError::UserNotFound,
            UserStoreError::InvalidOrExpiredToken => AuthApiError::InvalidOrExpiredToken,
            UserStoreError::UserAlreadyExists
            | UserStoreError::HashingError(_)
            | UserStoreError::UnexpectedError(_) => {
                AuthApiError::UnexpectedError(error.to_string())
            }
        }
    }
}

impl From<RequestPasswordResetError> for AuthApiError {
    fn from(error: RequestPasswordResetError) -> Self {
        match error {
            RequestPasswordResetError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<SetPasswordError> for AuthApiError {
    fn from(error: SetPasswordError) -> Self {
        match error {
            SetPasswordError::UserStoreError(e) => e.into(),
        }
    }
}
