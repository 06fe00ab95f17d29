use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters long")]
    TooShort,
}

/// A plaintext password on its way to the one-way hash.
///
/// Only ever held transiently; storage works with the hash.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if value.expose_secret().len() < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort);
        }
        Ok(Self(value))
    }
}

impl TryFrom<String> for Password {
    type Error = PasswordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(Secret::from(value))
    }
}
