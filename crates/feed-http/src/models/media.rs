//! Presigned URL wire models

use serde::{Deserialize, Serialize};

/// Body of `POST /posts/images/upload-urls`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlsRequest {
    pub content_types: Vec<String>,
}

/// One issued upload slot
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignedPutModel {
    pub upload_url: String,
    pub key: String,
}

/// Response of `POST /posts/images/upload-urls`, one item per content type, in order
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadUrlsResponse {
    pub uploads: Vec<PresignedPutModel>,
}

/// Body of `POST /posts/images/delete-urls`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteUrlsRequest {
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignedDeleteModel {
    pub delete_url: String,
}

/// Response of `POST /posts/images/delete-urls`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteUrlsResponse {
    #[serde(default)]
    pub deletes: Vec<PresignedDeleteModel>,
}
