//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{EntityId, PresignedOperation};

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Post not found: {0}")]
    PostNotFound(EntityId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid entity id: {0:?}")]
    InvalidEntityId(String),

    #[error("Invalid presigned {operation} URL ({reason}): {url:?}")]
    InvalidPresignedUrl {
        operation: PresignedOperation,
        url: String,
        reason: &'static str,
    },

    #[error("Expected {expected} presigned URLs, server returned {actual}")]
    UploadCountMismatch { expected: usize, actual: usize },

    #[error("Image {index} has no declared content type")]
    EmptyContentType { index: usize },
}

impl DomainError {
    /// Get an error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEntityId(_) => "INVALID_ENTITY_ID",
            Self::InvalidPresignedUrl { .. } => "INVALID_PRESIGNED_URL",
            Self::UploadCountMismatch { .. } => "UPLOAD_COUNT_MISMATCH",
            Self::EmptyContentType { .. } => "EMPTY_CONTENT_TYPE",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PostNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEntityId(_)
                | Self::InvalidPresignedUrl { .. }
                | Self::UploadCountMismatch { .. }
                | Self::EmptyContentType { .. }
        )
    }
}
