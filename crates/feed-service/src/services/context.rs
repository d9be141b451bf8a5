//! Service context - dependency container for services
//!
//! Holds the typed API, the media URL resolver and the reaction store.

use std::sync::Arc;

use feed_cache::{ReactionStore, SharedReactionStore};
use feed_common::{ClientConfig, FeedError, FeedResult};
use feed_core::{MediaUrlResolver, TransferClient};
use feed_http::{FeedApi, HttpTransferClient};

use super::media::MediaService;
use super::reaction::ReactionSynchronizer;

/// Service context containing all dependencies
///
/// Cheap to clone; clones share the same transport and reaction store.
#[derive(Clone)]
pub struct ServiceContext {
    api: FeedApi,
    resolver: MediaUrlResolver,
    reactions: SharedReactionStore,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(api: FeedApi, resolver: MediaUrlResolver, reactions: SharedReactionStore) -> Self {
        Self {
            api,
            resolver,
            reactions,
        }
    }

    /// Wire up the reqwest transport from configuration
    pub fn from_config(config: &ClientConfig) -> FeedResult<Self> {
        let transport = HttpTransferClient::new(&config.api)
            .map_err(|e| FeedError::Config(e.to_string()))?;

        Ok(Self::new(
            FeedApi::new(Arc::new(transport)),
            MediaUrlResolver::new(config.storage.public_base_url.as_deref()),
            ReactionStore::new_shared(),
        ))
    }

    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === API ===

    /// Get the typed application-server API
    pub fn api(&self) -> &FeedApi {
        &self.api
    }

    /// Get the storage key <-> display URL resolver
    pub fn resolver(&self) -> &MediaUrlResolver {
        &self.resolver
    }

    // === State ===

    /// Get the reaction store
    pub fn reactions(&self) -> &ReactionStore {
        self.reactions.as_ref()
    }

    pub(crate) fn shared_reactions(&self) -> &SharedReactionStore {
        &self.reactions
    }

    // === Services ===

    pub fn reaction_synchronizer(&self) -> ReactionSynchronizer<'_> {
        ReactionSynchronizer::new(self)
    }

    pub fn media(&self) -> MediaService<'_> {
        MediaService::new(self)
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("api", &"FeedApi")
            .field("resolver", &self.resolver)
            .field("tracked_reactions", &self.reactions.len())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom dependencies
#[derive(Default)]
pub struct ServiceContextBuilder {
    transport: Option<Arc<dyn TransferClient>>,
    resolver: Option<MediaUrlResolver>,
    reactions: Option<SharedReactionStore>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transport(mut self, transport: Arc<dyn TransferClient>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn resolver(mut self, resolver: MediaUrlResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn reactions(mut self, reactions: SharedReactionStore) -> Self {
        self.reactions = Some(reactions);
        self
    }

    /// Build the ServiceContext
    ///
    /// The resolver defaults to passthrough and the store to an empty one.
    ///
    /// # Errors
    /// Returns `FeedError::Validation` if no transport was set
    pub fn build(self) -> FeedResult<ServiceContext> {
        let transport = self
            .transport
            .ok_or_else(|| FeedError::validation("transport is required"))?;

        Ok(ServiceContext::new(
            FeedApi::new(transport),
            self.resolver.unwrap_or_default(),
            self.reactions.unwrap_or_else(ReactionStore::new_shared),
        ))
    }
}
