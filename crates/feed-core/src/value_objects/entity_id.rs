//! Entity ID - opaque server-assigned identifier for posts and users
//!
//! IDs are embedded in request paths, so they must be non-empty and free of
//! whitespace and path separators.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Opaque identifier of a server-side entity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create an EntityId without validation
    ///
    /// Use for IDs that come back from the server.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse and validate an ID supplied by a caller
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty()
            || trimmed.contains('/')
            || trimmed.contains('?')
            || trimmed.chars().any(char::is_whitespace)
        {
            return Err(DomainError::InvalidEntityId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the raw ID
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the inner String
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for EntityId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityId::parse(s)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
