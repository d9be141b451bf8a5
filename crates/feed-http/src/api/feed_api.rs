//! Typed calls against the application server and object storage
//!
//! Every method performs exactly one request. Status checks and JSON decoding
//! happen here; error classification is left to the service layer, which
//! knows whether a failure is a sync or a transfer problem.

use std::sync::Arc;

use feed_core::{
    EntityId, MediaBlob, Method, PresignedUrl, ReactionKind, StorageKey, TransferClient,
    TransferRequest, TransferResult,
};
use tracing::{debug, instrument};

use crate::models::{
    CreatePostRequest, DeleteUrlsRequest, DeleteUrlsResponse, PostModel, ReactedFlag,
    UploadUrlsRequest, UploadUrlsResponse,
};

/// Application server API
#[derive(Clone)]
pub struct FeedApi {
    transport: Arc<dyn TransferClient>,
}

impl FeedApi {
    pub fn new(transport: Arc<dyn TransferClient>) -> Self {
        Self { transport }
    }

    /// Request to the application server; every endpoint answers in JSON
    fn api_request(method: Method, path: impl Into<String>) -> TransferRequest {
        TransferRequest::api(method, path).header("Accept", "application/json")
    }

    fn reaction_request(
        method: Method,
        entity_id: &EntityId,
        kind: ReactionKind,
    ) -> TransferRequest {
        Self::api_request(method, format!("/reactions/{entity_id}")).param("type", kind.as_str())
    }

    // =========================================================================
    // Reactions
    // =========================================================================

    /// Whether the current actor has reacted to an entity
    ///
    /// An empty body is read as "not reacted".
    #[instrument(skip(self))]
    pub async fn get_reaction(
        &self,
        entity_id: &EntityId,
        kind: ReactionKind,
    ) -> TransferResult<bool> {
        let response = self
            .transport
            .send(Self::reaction_request(Method::Get, entity_id, kind))
            .await?
            .error_for_status()?;

        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(false);
        }
        Ok(response.json::<ReactedFlag>()?.reacted())
    }

    #[instrument(skip(self))]
    pub async fn create_reaction(
        &self,
        entity_id: &EntityId,
        kind: ReactionKind,
    ) -> TransferResult<()> {
        self.transport
            .send(Self::reaction_request(Method::Post, entity_id, kind))
            .await?
            .error_for_status()?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_reaction(
        &self,
        entity_id: &EntityId,
        kind: ReactionKind,
    ) -> TransferResult<()> {
        self.transport
            .send(Self::reaction_request(Method::Delete, entity_id, kind))
            .await?
            .error_for_status()?;
        Ok(())
    }

    // =========================================================================
    // Posts
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: &EntityId) -> TransferResult<PostModel> {
        self.transport
            .send(Self::api_request(Method::Get, format!("/posts/{post_id}")))
            .await?
            .error_for_status()?
            .json()
    }

    #[instrument(skip(self, request), fields(images = request.images.len()))]
    pub async fn create_post(&self, request: &CreatePostRequest) -> TransferResult<PostModel> {
        self.transport
            .send(Self::api_request(Method::Post, "/posts").json(request)?)
            .await?
            .error_for_status()?
            .json()
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: &EntityId) -> TransferResult<()> {
        self.transport
            .send(Self::api_request(Method::Delete, format!("/posts/{post_id}")))
            .await?
            .error_for_status()?;
        Ok(())
    }

    // =========================================================================
    // Presigned URLs
    // =========================================================================

    /// Request one upload slot per content type, in order
    #[instrument(skip(self, content_types), fields(count = content_types.len()))]
    pub async fn request_upload_urls(
        &self,
        content_types: &[String],
    ) -> TransferResult<UploadUrlsResponse> {
        let body = UploadUrlsRequest {
            content_types: content_types.to_vec(),
        };
        self.transport
            .send(Self::api_request(Method::Post, "/posts/images/upload-urls").json(&body)?)
            .await?
            .error_for_status()?
            .json()
    }

    #[instrument(skip(self, keys), fields(count = keys.len()))]
    pub async fn request_delete_urls(
        &self,
        keys: &[StorageKey],
    ) -> TransferResult<DeleteUrlsResponse> {
        let body = DeleteUrlsRequest {
            keys: keys.iter().map(|key| key.as_str().to_string()).collect(),
        };
        self.transport
            .send(Self::api_request(Method::Post, "/posts/images/delete-urls").json(&body)?)
            .await?
            .error_for_status()?
            .json()
    }

    // =========================================================================
    // Object storage
    // =========================================================================

    /// PUT raw bytes to a presigned URL with the blob's declared content type
    #[instrument(skip_all, fields(bytes = blob.len()))]
    pub async fn put_object(&self, url: &PresignedUrl, blob: &MediaBlob) -> TransferResult<()> {
        let request = TransferRequest::absolute(Method::Put, url.as_str())
            .bytes(blob.content_type.clone(), blob.data.clone());
        self.transport.send(request).await?.error_for_status()?;
        debug!("Object stored");
        Ok(())
    }

    #[instrument(skip_all)]
    pub async fn delete_object(&self, url: &PresignedUrl) -> TransferResult<()> {
        self.transport
            .send(TransferRequest::absolute(Method::Delete, url.as_str()))
            .await?
            .error_for_status()?;
        Ok(())
    }
}
