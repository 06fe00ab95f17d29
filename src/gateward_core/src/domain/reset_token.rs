use rand::RngCore;
use thiserror::Error;

/// Bytes of CSPRNG entropy behind each token (256 bits).
const TOKEN_BYTES: usize = 32;

/// Hex encoding doubles the byte count.
pub const TOKEN_LENGTH: usize = TOKEN_BYTES * 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResetTokenError {
    #[error("Reset token is empty")]
    Empty,
    #[error("Reset token exceeds the maximum length")]
    TooLong,
}

/// A single-use, time-bounded secret proving authorization to set a new
/// password without prior authentication.
///
/// Generated tokens are always `TOKEN_LENGTH` hex characters. Inbound
/// candidates are accepted more loosely: whether a token matches anything
/// is decided by the store lookup, so an unknown shape fails the same way
/// an expired one does.
#[derive(Clone, PartialEq, Eq)]
pub struct ResetToken(String);

impl ResetToken {
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ResetToken {
    type Error = ResetTokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ResetTokenError::Empty);
        }
        if value.len() > 4 * TOKEN_LENGTH {
            return Err(ResetTokenError::TooLong);
        }
        Ok(Self(value))
    }
}

// Tokens are secrets; keep them out of logs.
impl std::fmt::Debug for ResetToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ResetToken(..)")
    }
}
