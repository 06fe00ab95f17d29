use chrono::Utc;
use gateward_core::{IdentityClaim, Role};
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Clone)]
pub struct JwtAuthConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl JwtAuthConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

#[derive(Debug, Error)]
pub enum TokenAuthError {
    #[error("Missing token")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token error: {0}")]
    TokenError(jsonwebtoken::errors::Error),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Wire form of the identity claim carried inside the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub exp: usize,
}

impl Claims {
    pub fn identity(&self) -> IdentityClaim {
        IdentityClaim {
            user_id: self.sub,
            role: self.role,
        }
    }
}

// Create a signed bearer token for a user
pub fn generate_auth_token(
    user_id: Uuid,
    role: Role,
    config: &JwtAuthConfig,
) -> Result<String, TokenAuthError> {
    let delta = chrono::Duration::try_seconds(config.token_ttl_in_seconds).ok_or(
        TokenAuthError::UnexpectedError("Failed to create auth token duration".to_string()),
    )?;

    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(TokenAuthError::UnexpectedError(
            "Duration out of range".to_string(),
        ))?
        .timestamp();

    // Cast exp to a usize, which is what Claims expects
    let exp: usize = exp
        .try_into()
        .map_err(|_| TokenAuthError::UnexpectedError("Failed to cast i64 to usize".to_string()))?;

    let claims = Claims {
        sub: user_id,
        role,
        exp,
    };

    encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(config.as_bytes()),
    )
    .map_err(TokenAuthError::TokenError)
}

// Check a bearer token's signature and expiry against the shared secret.
// Stateless: a pure function of the credential, the key, and the clock.
pub fn validate_auth_token(token: &str, config: &JwtAuthConfig) -> Result<Claims, TokenAuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(TokenAuthError::TokenError)
}
