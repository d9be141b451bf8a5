//! Post entities - the record media attaches to, and the local upload state

use chrono::{DateTime, Utc};

use crate::entities::ReactionKind;
use crate::value_objects::{EntityId, PresignedUrl, StorageKey};

/// Post snapshot as returned by the application server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: EntityId,
    pub author_id: Option<EntityId>,
    pub content: String,
    pub parent_id: Option<EntityId>,
    /// Image references: storage keys on the wire, display URLs once resolved
    pub images: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub qty_likes: u64,
    pub qty_retweets: u64,
    pub qty_comments: u64,
}

impl Post {
    /// Authoritative aggregate count for a reaction kind
    #[inline]
    pub fn count_for(&self, kind: ReactionKind) -> u64 {
        match kind {
            ReactionKind::Like => self.qty_likes,
            ReactionKind::Retweet => self.qty_retweets,
        }
    }

    /// Check if the post is a comment on another post
    #[inline]
    pub fn is_comment(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Check if the post references any images
    #[inline]
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}

/// Unsent image bytes with their declared content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBlob {
    pub content_type: String,
    pub data: Vec<u8>,
}

impl MediaBlob {
    /// Create a new MediaBlob
    pub fn new(content_type: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Size in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Input for creating a post
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub content: String,
    pub parent_id: Option<EntityId>,
    pub images: Vec<MediaBlob>,
}

impl PostDraft {
    /// Create a new top-level draft without images
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            parent_id: None,
            images: Vec::new(),
        }
    }

    /// Make this draft a comment on `parent_id`
    pub fn with_parent(mut self, parent_id: EntityId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Attach an image
    pub fn with_image(mut self, image: MediaBlob) -> Self {
        self.images.push(image);
        self
    }
}

/// One image on its way to object storage
///
/// Owned by a single create-post operation. It only counts as settled once
/// the byte transfer to `upload_url` has succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub blob: MediaBlob,
    pub upload_url: PresignedUrl,
    pub key: StorageKey,
    settled: bool,
}

impl UploadTarget {
    /// Pair a blob with the presigned URL and key issued for it
    pub fn new(blob: MediaBlob, upload_url: PresignedUrl, key: StorageKey) -> Self {
        Self {
            blob,
            upload_url,
            key,
            settled: false,
        }
    }

    /// Mark the byte transfer as complete
    pub fn settle(&mut self) {
        self.settled = true;
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.settled
    }
}
