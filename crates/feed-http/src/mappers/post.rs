//! Post entity <-> model mapper

use feed_core::entities::Post;
use feed_core::value_objects::{EntityId, StorageKey};

use crate::models::{CreatePostRequest, PostModel};

/// Convert PostModel to Post entity
impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: EntityId::new(model.id),
            author_id: model.author_id.map(EntityId::new),
            content: model.content,
            parent_id: model.parent_id.map(EntityId::new),
            images: model.images.unwrap_or_default(),
            created_at: model.created_at,
            qty_likes: model.qty_likes,
            qty_retweets: model.qty_retweets,
            qty_comments: model.qty_comments,
        }
    }
}

/// Build the creation body from settled storage keys
pub fn create_post_request(
    content: &str,
    parent_id: Option<&EntityId>,
    keys: &[StorageKey],
) -> CreatePostRequest {
    CreatePostRequest {
        content: content.to_string(),
        parent_id: parent_id.map(|id| id.as_str().to_string()),
        images: keys.iter().map(|key| key.as_str().to_string()).collect(),
    }
}
