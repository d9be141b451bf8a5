//! Storage keys and their display-URL projection
//!
//! Posts store canonical object keys. The feed shows `base/key` URLs, and
//! every URL must map back to its key before it is sent in a delete request.
//! References that are already absolute `http(s)` URLs (externally hosted
//! images) pass through both directions unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical object-storage key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check for an absolute `http://` or `https://` reference (case-insensitive)
pub(crate) fn is_absolute_url(value: &str) -> bool {
    let lower = value
        .get(..8)
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| value.to_ascii_lowercase());
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Maps storage keys to public URLs and back
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaUrlResolver {
    /// Public base URL without a trailing slash
    public_base_url: Option<String>,
}

impl MediaUrlResolver {
    /// Create a resolver; an empty base means keys are displayed as-is
    pub fn new(public_base_url: Option<&str>) -> Self {
        let public_base_url = public_base_url
            .map(|base| base.trim().trim_end_matches('/').to_string())
            .filter(|base| !base.is_empty());
        Self { public_base_url }
    }

    /// Configured public base URL, if any
    pub fn public_base_url(&self) -> Option<&str> {
        self.public_base_url.as_deref()
    }

    /// Project a stored reference to the URL the feed displays
    ///
    /// Leading `/` characters on a key are dropped, so only keys without
    /// one survive the trip back through [`Self::storage_key`] unchanged.
    pub fn display_url(&self, reference: &str) -> String {
        if reference.is_empty() || is_absolute_url(reference) {
            return reference.to_string();
        }
        match &self.public_base_url {
            Some(base) => format!("{base}/{}", reference.trim_start_matches('/')),
            None => reference.to_string(),
        }
    }

    /// Reverse `display_url`, recovering the canonical key
    pub fn storage_key(&self, reference: &str) -> StorageKey {
        if reference.is_empty() {
            return StorageKey::new("");
        }
        if let Some(base) = &self.public_base_url {
            if let Some(rest) = reference
                .strip_prefix(base.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
            {
                return StorageKey::new(rest);
            }
        }
        StorageKey::new(reference.trim_start_matches('/'))
    }

    /// Display every image reference of a post
    pub fn display_urls(&self, references: &[String]) -> Vec<String> {
        references.iter().map(|r| self.display_url(r)).collect()
    }
}
