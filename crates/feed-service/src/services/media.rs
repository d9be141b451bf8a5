//! Media service
//!
//! Creating and deleting posts that own images stored in object storage.
//! Bytes never pass through the application server: it hands out presigned
//! URLs and the client moves the bytes itself.

use futures::future::join_all;
use tracing::{debug, info, instrument, warn};

use feed_common::{FeedError, FeedResult};
use feed_core::{
    DomainError, EntityId, MediaBlob, Post, PostDraft, PresignedOperation, PresignedUrl,
    StorageKey, UploadTarget,
};
use feed_http::mappers::create_post_request;
use feed_http::PostModel;

use super::context::ServiceContext;

/// Media service
pub struct MediaService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MediaService<'a> {
    /// Create a new MediaService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fetch a post with its images as display URLs
    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: &EntityId) -> FeedResult<Post> {
        let model = self.ctx.api().get_post(post_id).await.map_err(|e| {
            if e.is_not_found() {
                FeedError::from(DomainError::PostNotFound(post_id.clone()))
            } else {
                FeedError::sync(e)
            }
        })?;
        Ok(self.present(model))
    }

    /// Create a post, uploading its images first
    ///
    /// Every presigned URL is validated before any byte moves. All uploads
    /// are attempted concurrently; if any fails the post is not created.
    ///
    /// Objects that were uploaded before a failure, or before a failed post
    /// creation, are not cleaned up and stay orphaned under keys nothing
    /// references.
    #[instrument(
        skip(self, draft),
        fields(images = draft.images.len(), comment = draft.parent_id.is_some())
    )]
    pub async fn create_post(&self, draft: PostDraft) -> FeedResult<Post> {
        for (index, blob) in draft.images.iter().enumerate() {
            if blob.content_type.trim().is_empty() {
                return Err(DomainError::EmptyContentType { index }.into());
            }
        }

        let keys = if draft.images.is_empty() {
            Vec::new()
        } else {
            self.upload_images(draft.images).await?
        };

        let request = create_post_request(&draft.content, draft.parent_id.as_ref(), &keys);
        let model = self
            .ctx
            .api()
            .create_post(&request)
            .await
            .map_err(|e| {
                if !keys.is_empty() {
                    warn!(orphaned = keys.len(), "Post creation failed after uploads");
                }
                FeedError::sync(e)
            })?;

        let post = self.present(model);
        info!(post_id = %post.id, images = post.images.len(), "Post created");
        Ok(post)
    }

    /// Delete a post and, best effort, the objects it owns
    ///
    /// Storage cleanup never blocks the record deletion: only the final
    /// `DELETE /posts/{id}` can fail this call.
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: &EntityId) -> FeedResult<()> {
        let keys = match self.ctx.api().get_post(post_id).await {
            Ok(model) => self.owned_keys(&model),
            Err(e) => {
                warn!(error = %e, "Could not load post images, skipping storage cleanup");
                Vec::new()
            }
        };

        if !keys.is_empty() {
            self.delete_objects(&keys).await;
        }

        self.ctx
            .api()
            .delete_post(post_id)
            .await
            .map_err(FeedError::sync)?;

        info!(post_id = %post_id, "Post deleted");
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Post with image references projected to display URLs
    fn present(&self, model: PostModel) -> Post {
        let mut post = Post::from(model);
        post.images = self.ctx.resolver().display_urls(&post.images);
        post
    }

    fn owned_keys(&self, model: &PostModel) -> Vec<StorageKey> {
        model
            .images
            .iter()
            .flatten()
            .map(|reference| self.ctx.resolver().storage_key(reference))
            .filter(|key| !key.is_empty())
            .collect()
    }

    /// Acquire one upload slot per image and PUT the bytes
    async fn upload_images(&self, images: Vec<MediaBlob>) -> FeedResult<Vec<StorageKey>> {
        let api = self.ctx.api();
        let content_types: Vec<String> = images.iter().map(|b| b.content_type.clone()).collect();

        let response = api
            .request_upload_urls(&content_types)
            .await
            .map_err(FeedError::sync)?;

        if response.uploads.len() != images.len() {
            return Err(DomainError::UploadCountMismatch {
                expected: images.len(),
                actual: response.uploads.len(),
            }
            .into());
        }

        let mut targets = images
            .into_iter()
            .zip(response.uploads)
            .enumerate()
            .map(|(index, (blob, slot))| {
                let url = PresignedUrl::parse(&slot.upload_url, PresignedOperation::Upload)?;
                let key = slot.key.trim();
                if key.is_empty() {
                    return Err(DomainError::ValidationError(format!(
                        "upload slot {index} has no storage key"
                    )));
                }
                Ok(UploadTarget::new(blob, url, StorageKey::new(key)))
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let results = join_all(
            targets
                .iter()
                .map(|target| api.put_object(&target.upload_url, &target.blob)),
        )
        .await;

        let mut first_failure = None;
        for (index, (target, result)) in targets.iter_mut().zip(results).enumerate() {
            match result {
                Ok(()) => target.settle(),
                Err(e) => {
                    warn!(index, key = %target.key, error = %e, "Image upload failed");
                    first_failure.get_or_insert((index, e));
                }
            }
        }

        if let Some((index, e)) = first_failure {
            let settled = targets.iter().filter(|t| t.is_settled()).count();
            if settled > 0 {
                warn!(settled, "Uploaded objects left orphaned");
            }
            return Err(FeedError::transfer(format!("image {index}"), e));
        }

        debug!(count = targets.len(), "All images uploaded");
        Ok(targets.into_iter().map(|t| t.key).collect())
    }

    /// Best-effort removal of stored objects; failures are logged only
    async fn delete_objects(&self, keys: &[StorageKey]) {
        let api = self.ctx.api();

        let response = match api.request_delete_urls(keys).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    error = %e,
                    keys = keys.len(),
                    "Could not get delete URLs, skipping storage cleanup"
                );
                return;
            }
        };

        let urls: Vec<PresignedUrl> = response
            .deletes
            .iter()
            .filter_map(|item| {
                PresignedUrl::parse(&item.delete_url, PresignedOperation::Delete)
                    .map_err(|e| warn!(error = %e, "Skipping invalid delete URL"))
                    .ok()
            })
            .collect();

        let results = join_all(urls.iter().map(|url| api.delete_object(url))).await;
        let failed = results.iter().filter(|r| r.is_err()).count();
        for e in results.into_iter().filter_map(Result::err) {
            warn!(error = %e, "Object delete failed");
        }

        debug!(deleted = urls.len() - failed, failed, "Storage cleanup finished");
    }
}
