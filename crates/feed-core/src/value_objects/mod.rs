//! Value objects - immutable types that represent domain concepts

mod entity_id;
mod presigned_url;
mod storage_key;

pub use entity_id::EntityId;
pub use presigned_url::{PresignedOperation, PresignedUrl};
pub use storage_key::{MediaUrlResolver, StorageKey};
