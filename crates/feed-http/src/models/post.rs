//! Post wire models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post snapshot as served by `GET /posts/{id}` and `POST /posts`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostModel {
    pub id: String,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Missing and `null` both mean "no images"
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub qty_likes: u64,
    #[serde(default)]
    pub qty_retweets: u64,
    #[serde(default)]
    pub qty_comments: u64,
}

/// Body of `POST /posts`
///
/// `images` holds storage keys, never presigned URLs or bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub images: Vec<String>,
}
