//! Presigned URL - a validated, single-use object-storage URL
//!
//! A malformed URL means the backend response was broken, not that the
//! network hiccuped, so it is rejected before any request is made.

use std::fmt;

use super::storage_key::is_absolute_url;
use crate::error::DomainError;

/// Tokens that show up when the backend interpolated a missing value
const PLACEHOLDER_TOKENS: [&str; 3] = ["undefined", "${", "{{"];

/// Storage operation a presigned URL was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresignedOperation {
    Upload,
    Delete,
}

impl fmt::Display for PresignedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upload => write!(f, "upload"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Presigned object-storage URL that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PresignedUrl(String);

impl PresignedUrl {
    /// Validate a raw URL from the application server
    ///
    /// Surrounding whitespace is trimmed. The URL is rejected if it is empty,
    /// contains a placeholder token or embedded whitespace, or is not an
    /// absolute `http(s)` URL.
    pub fn parse(raw: &str, operation: PresignedOperation) -> Result<Self, DomainError> {
        let url = raw.trim();

        let reason = if url.is_empty() {
            Some("empty")
        } else if PLACEHOLDER_TOKENS.iter().any(|token| url.contains(token)) {
            Some("unresolved placeholder")
        } else if url.chars().any(char::is_whitespace) {
            Some("embedded whitespace")
        } else if !is_absolute_url(url) {
            Some("not an http(s) URL")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidPresignedUrl {
                operation,
                url: url.to_string(),
                reason,
            }),
            None => Ok(Self(url.to_string())),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PresignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
