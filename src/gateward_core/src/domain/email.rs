use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email address")]
    Invalid,
}

/// A validated email address.
///
/// The inner value is wrapped in `Secret` so it never shows up in
/// `Debug` output or tracing spans.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    pub fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = EmailError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if EMAIL_REGEX.is_match(value.expose_secret()) {
            Ok(Self(value))
        } else {
            Err(EmailError::Invalid)
        }
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(Secret::from(value))
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}
