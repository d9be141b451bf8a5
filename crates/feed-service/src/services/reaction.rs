//! Reaction synchronizer
//!
//! Optimistic like/retweet toggling reconciled against the application
//! server. The local store is updated the moment a toggle is issued; the
//! network phase for a pair runs behind that pair's gate, so overlapping
//! toggles reach the server one at a time and in issue order.

use std::future::Future;

use feed_cache::ToggleGuard;
use feed_common::{FeedError, FeedResult};
use feed_core::{EntityId, EntityReactions, Post, ReactionKind, ReactionState};
use feed_http::FeedApi;
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;

/// Reaction synchronizer
pub struct ReactionSynchronizer<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionSynchronizer<'a> {
    /// Create a new ReactionSynchronizer
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fetch the authoritative state of both kinds for an entity
    ///
    /// Reacted flags and the post snapshot are requested concurrently. On
    /// failure the store is left as it was. A kind that was toggled after the
    /// read started keeps its local state.
    #[instrument(skip(self))]
    pub async fn read(&self, entity_id: &EntityId) -> FeedResult<EntityReactions> {
        let store = self.ctx.reactions();
        let api = self.ctx.api();
        let ticket = store.begin_read(entity_id);

        let (post, like, retweet) = futures::try_join!(
            api.get_post(entity_id),
            api.get_reaction(entity_id, ReactionKind::Like),
            api.get_reaction(entity_id, ReactionKind::Retweet),
        )
        .map_err(FeedError::sync)?;

        let post = Post::from(post);
        let fetched = EntityReactions {
            like: ReactionState::new(like, post.qty_likes),
            retweet: ReactionState::new(retweet, post.qty_retweets),
        };

        debug!(
            like = fetched.like.count,
            retweet = fetched.retweet.count,
            "Reaction state fetched"
        );

        Ok(store.apply_read(&ticket, fetched))
    }

    /// Toggle a reaction
    ///
    /// The optimistic state is visible through [`Self::snapshot`] as soon as
    /// this returns, before the future is polled. The future resolves to the
    /// authoritative state the server reported after this toggle. On failure
    /// the toggle's own adjustment is rolled back and the error returned.
    ///
    /// The future owns everything it needs, so it can be spawned. Dropping it
    /// before it resolves takes the optimistic flip back out; if the request
    /// was already sent, the pair is re-fetched before its next mutation.
    pub fn toggle(
        &self,
        entity_id: &EntityId,
        kind: ReactionKind,
    ) -> impl Future<Output = FeedResult<ReactionState>> + Send + 'static {
        let guard = ToggleGuard::begin(self.ctx.shared_reactions(), entity_id, kind);
        let ctx = self.ctx.clone();
        async move { settle(&ctx, guard).await }
    }

    // =========================================================================
    // Local state
    // =========================================================================

    /// Visible state for a pair
    pub fn snapshot(&self, entity_id: &EntityId, kind: ReactionKind) -> ReactionState {
        self.ctx.reactions().snapshot(entity_id, kind)
    }

    /// Visible state for both kinds
    pub fn entity_snapshot(&self, entity_id: &EntityId) -> EntityReactions {
        self.ctx.reactions().entity_snapshot(entity_id)
    }

    pub fn has_reacted(&self, entity_id: &EntityId, kind: ReactionKind) -> bool {
        self.snapshot(entity_id, kind).reacted
    }

    /// Whether a toggle for the pair has not settled yet
    pub fn is_updating(&self, entity_id: &EntityId, kind: ReactionKind) -> bool {
        self.ctx.reactions().is_updating(entity_id, kind)
    }

    /// Drop local state for an entity; results still in flight are ignored
    pub fn release(&self, entity_id: &EntityId) {
        self.ctx.reactions().release(entity_id);
    }
}

/// Network phase of one toggle
#[instrument(
    skip_all,
    fields(
        entity_id = %guard.ticket().entity_id(),
        kind = %guard.ticket().kind(),
        seq = guard.ticket().seq(),
    )
)]
async fn settle(ctx: &ServiceContext, mut guard: ToggleGuard) -> FeedResult<ReactionState> {
    let ticket = guard.ticket().clone();
    let gate = ticket.gate().clone();
    let _gate = gate.lock().await;
    let store = ctx.reactions();
    let api = ctx.api();
    let entity_id = ticket.entity_id();
    let kind = ticket.kind();

    // An earlier toggle was dropped mid-request, so its outcome is unknown
    if store.needs_resync(&ticket) {
        match fetch_state(api, entity_id, kind).await {
            Ok(state) => {
                debug!(reacted = state.reacted, "Resynced after abandoned toggle");
                store.resync(&ticket, state);
            }
            Err(err) => {
                guard.rollback();
                warn!(error = %err, "Resync failed, rolled back");
                return Err(err);
            }
        }
    }

    // A released entry still sends the caller's intent, it just isn't applied
    let turn_on = match store.start_phase(&ticket) {
        Some(confirmed) => !confirmed.reacted,
        None => ticket.optimistic().reacted,
    };

    let mutation = if turn_on {
        api.create_reaction(entity_id, kind).await
    } else {
        api.delete_reaction(entity_id, kind).await
    };

    if let Err(err) = mutation {
        let live = guard.rollback();
        warn!(error = %err, live, "Reaction update rejected, rolled back");
        return Err(FeedError::sync(err));
    }

    if !guard.commit() {
        debug!("Entity released, skipping re-fetch");
        return Ok(ticket.optimistic());
    }

    let state = match fetch_state(api, entity_id, kind).await {
        Ok(state) => state,
        Err(err) => {
            warn!(error = %err, "Reaction accepted but re-fetch failed");
            return Err(err);
        }
    };

    if store.apply_authoritative(&ticket, state).is_none() {
        debug!("Entity released, dropping re-fetched state");
    }

    info!(
        reacted = state.reacted,
        count = state.count,
        "Reaction synchronized"
    );

    Ok(state)
}

/// Authoritative state for one pair: reacted flag plus the post's counter
async fn fetch_state(
    api: &FeedApi,
    entity_id: &EntityId,
    kind: ReactionKind,
) -> FeedResult<ReactionState> {
    let (post, reacted) =
        futures::try_join!(api.get_post(entity_id), api.get_reaction(entity_id, kind))
            .map_err(FeedError::sync)?;
    Ok(ReactionState::new(reacted, Post::from(post).count_for(kind)))
}
