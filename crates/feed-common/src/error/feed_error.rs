//! Client error types
//!
//! Unified error surfaced to callers of the synchronizer and the media workflow.

use feed_core::{DomainError, TransportError};
use std::fmt;

/// Coarse error classification callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input or backend response; retrying will not help
    Validation,
    /// Network or storage failure while moving bytes
    Transfer,
    /// Application server rejected or failed a reaction/fetch call
    Sync,
    /// Entity missing server-side
    NotFound,
    /// Local misconfiguration
    Config,
}

/// Client-wide error type
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Transfer failed: {0}")]
    Transfer(String),

    #[error("Sync failed: {0}")]
    Sync(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FeedError {
    /// Classify this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Transfer(_) => ErrorKind::Transfer,
            Self::Sync(_) => ErrorKind::Sync,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Config(_) => ErrorKind::Config,
            Self::Domain(e) => {
                if e.is_not_found() {
                    ErrorKind::NotFound
                } else {
                    ErrorKind::Validation
                }
            }
        }
    }

    /// Get error code for logs and callers
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Transfer(_) => "TRANSFER_ERROR",
            Self::Sync(_) => "SYNC_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Whether the caller may reasonably retry the same operation
    ///
    /// Nothing in this workspace retries on its own.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Transfer | ErrorKind::Sync)
    }

    /// Failure moving bytes to or from object storage
    ///
    /// `context` names the object, e.g. `image 2`. A storage 404 stays a
    /// transfer failure: the presigned URL, not the post, went missing.
    pub fn transfer(context: impl fmt::Display, err: TransportError) -> Self {
        match err {
            TransportError::Decode(_) | TransportError::Encode(_) => {
                Self::Validation(format!("{context}: {err}"))
            }
            _ => Self::Transfer(format!("{context}: {err}")),
        }
    }

    /// Failure talking to the application server
    ///
    /// A 404 becomes `NotFound` and an unreadable body `Validation`,
    /// anything else `Sync`.
    pub fn sync(err: TransportError) -> Self {
        match err {
            _ if err.is_not_found() => Self::NotFound(err.to_string()),
            TransportError::Decode(_) | TransportError::Encode(_) => {
                Self::Validation(err.to_string())
            }
            _ => Self::Sync(err.to_string()),
        }
    }

    /// Create a not found error for a resource
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }
}

/// Result type alias for client operations
pub type FeedResult<T> = Result<T, FeedError>;
