//! # feed-core
//!
//! Domain layer containing entities, value objects, domain errors and the
//! transfer port used to reach the application server and object storage.
//! This crate has zero dependencies on infrastructure (HTTP client, runtime, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    EntityReactions, MediaBlob, PendingToggle, Post, PostDraft, ReactionKind, ReactionState,
    UploadTarget,
};
pub use error::DomainError;
pub use traits::{
    Method, RequestBody, Target, TransferClient, TransferRequest, TransferResponse,
    TransferResult, TransportError,
};
pub use value_objects::{
    EntityId, MediaUrlResolver, PresignedOperation, PresignedUrl, StorageKey,
};
