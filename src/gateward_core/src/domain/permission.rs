use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "delete:item"); the
/// registry decides which roles hold which permissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Permission {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}
