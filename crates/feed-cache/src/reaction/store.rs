//! Reaction store
//!
//! Holds one entry per `(entity, kind)` pair. An entry keeps the last state
//! the server confirmed plus the queue of toggles that were applied locally
//! but have not settled yet. The visible state is always derived from both,
//! never stored, so a late completion can only ever move `confirmed`.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use feed_core::{EntityId, EntityReactions, PendingToggle, ReactionKind, ReactionState};
use tokio::sync::Mutex;

/// Shared store handle
pub type SharedReactionStore = Arc<ReactionStore>;

type Key = (EntityId, ReactionKind);

/// State for one `(entity, kind)` pair
#[derive(Debug)]
struct Entry {
    /// Identifies this incarnation of the entry; bumps after `release`
    generation: u64,
    /// Last state the server accepted or reported
    confirmed: ReactionState,
    /// Toggles in issue order
    pending: VecDeque<PendingToggle>,
    /// Highest sequence number issued for this pair
    issued_seq: u64,
    /// Serializes network phases for this pair in issue order
    gate: Arc<Mutex<()>>,
    /// A toggle was abandoned mid-request; `confirmed` may not match the server
    stale: bool,
}

impl Entry {
    fn new(generation: u64) -> Self {
        Self {
            generation,
            confirmed: ReactionState::default(),
            pending: VecDeque::new(),
            issued_seq: 0,
            gate: Arc::new(Mutex::new(())),
            stale: false,
        }
    }

    /// Confirmed state with every pending flip replayed on top
    fn visible(&self) -> ReactionState {
        self.pending
            .iter()
            .fold(self.confirmed, |state, _| state.toggled())
    }

    fn remove_pending(&mut self, seq: u64) -> bool {
        match self.pending.iter().position(|p| p.seq == seq) {
            Some(index) => {
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Handle for one issued toggle
///
/// Returned by [`ReactionStore::begin_toggle`]. Every later call for the same
/// toggle goes through this ticket, which lets the store ignore results for
/// entries that were released in the meantime.
#[derive(Debug, Clone)]
pub struct ToggleTicket {
    entity_id: EntityId,
    kind: ReactionKind,
    generation: u64,
    seq: u64,
    optimistic: ReactionState,
    gate: Arc<Mutex<()>>,
}

impl ToggleTicket {
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    pub fn kind(&self) -> ReactionKind {
        self.kind
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Visible state right after this toggle was applied
    pub fn optimistic(&self) -> ReactionState {
        self.optimistic
    }

    /// Gate to hold for the whole network phase
    pub fn gate(&self) -> &Arc<Mutex<()>> {
        &self.gate
    }
}

/// Handle for one authoritative read of an entity
#[derive(Debug, Clone)]
pub struct ReadTicket {
    entity_id: EntityId,
    /// `(kind, generation, issued_seq)` observed when the read started
    observed: [(ReactionKind, u64, u64); 2],
}

impl ReadTicket {
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }
}

/// Optimistic reaction state for every entity the client is showing
///
/// Uses `DashMap` for concurrent access; no shard lock is held across an
/// await point.
#[derive(Debug, Default)]
pub struct ReactionStore {
    entries: DashMap<Key, Entry>,
    generations: AtomicU64,
}

impl ReactionStore {
    /// Create a new empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new store wrapped in Arc
    #[must_use]
    pub fn new_shared() -> SharedReactionStore {
        Arc::new(Self::new())
    }

    fn next_generation(&self) -> u64 {
        self.generations.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn key(entity_id: &EntityId, kind: ReactionKind) -> Key {
        (entity_id.clone(), kind)
    }

    // =========================================================================
    // Local reads
    // =========================================================================

    /// Visible state for a pair; unknown pairs read as not reacted, count 0
    pub fn snapshot(&self, entity_id: &EntityId, kind: ReactionKind) -> ReactionState {
        self.entries
            .get(&Self::key(entity_id, kind))
            .map(|entry| entry.visible())
            .unwrap_or_default()
    }

    /// Visible state for both kinds of an entity
    pub fn entity_snapshot(&self, entity_id: &EntityId) -> EntityReactions {
        let mut reactions = EntityReactions::default();
        for kind in ReactionKind::ALL {
            reactions.set(kind, self.snapshot(entity_id, kind));
        }
        reactions
    }

    /// Whether any toggle for the pair has not settled yet
    pub fn is_updating(&self, entity_id: &EntityId, kind: ReactionKind) -> bool {
        self.entries
            .get(&Self::key(entity_id, kind))
            .is_some_and(|entry| !entry.pending.is_empty())
    }

    /// Number of unsettled toggles for the pair
    pub fn pending_count(&self, entity_id: &EntityId, kind: ReactionKind) -> usize {
        self.entries
            .get(&Self::key(entity_id, kind))
            .map_or(0, |entry| entry.pending.len())
    }

    /// Last state the server confirmed for the pair, if it is tracked
    pub fn confirmed(&self, entity_id: &EntityId, kind: ReactionKind) -> Option<ReactionState> {
        self.entries
            .get(&Self::key(entity_id, kind))
            .map(|entry| entry.confirmed)
    }

    /// Number of tracked pairs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // =========================================================================
    // Toggle lifecycle
    // =========================================================================

    /// Apply a toggle optimistically and issue its ticket
    ///
    /// The new visible state is in place when this returns.
    pub fn begin_toggle(&self, entity_id: &EntityId, kind: ReactionKind) -> ToggleTicket {
        let mut entry = self
            .entries
            .entry(Self::key(entity_id, kind))
            .or_insert_with(|| Entry::new(self.next_generation()));

        let previous = entry.visible();
        entry.issued_seq += 1;
        let seq = entry.issued_seq;
        entry
            .pending
            .push_back(PendingToggle::new(kind, previous.reacted, seq));
        let optimistic = entry.visible();

        tracing::debug!(
            entity_id = %entity_id,
            kind = %kind,
            seq,
            reacted = optimistic.reacted,
            count = optimistic.count,
            "Toggle applied optimistically"
        );

        ToggleTicket {
            entity_id: entity_id.clone(),
            kind,
            generation: entry.generation,
            seq,
            optimistic,
            gate: entry.gate.clone(),
        }
    }

    /// Mark the toggle's network phase as started
    ///
    /// Returns the confirmed state the phase should flip, or `None` if the
    /// entry was released.
    pub fn start_phase(&self, ticket: &ToggleTicket) -> Option<ReactionState> {
        let mut entry = self.live_entry(ticket)?;
        if let Some(pending) = entry.pending.iter_mut().find(|p| p.seq == ticket.seq) {
            pending.in_flight = true;
        }
        Some(entry.confirmed)
    }

    /// The server accepted the mutation
    ///
    /// Folds the toggle into the confirmed state as a tentative value until
    /// the authoritative re-fetch lands. Returns `false` if the entry was
    /// released.
    pub fn commit(&self, ticket: &ToggleTicket) -> bool {
        let Some(mut entry) = self.live_entry(ticket) else {
            return false;
        };
        if entry.remove_pending(ticket.seq) {
            entry.confirmed = entry.confirmed.toggled();
        }
        true
    }

    /// The server rejected the mutation
    ///
    /// Drops the toggle from the queue, which reverses exactly its own
    /// adjustment. Returns `false` if the entry was released.
    pub fn rollback(&self, ticket: &ToggleTicket) -> bool {
        let Some(mut entry) = self.live_entry(ticket) else {
            return false;
        };
        let removed = entry.remove_pending(ticket.seq);
        if removed {
            tracing::debug!(
                entity_id = %ticket.entity_id,
                kind = %ticket.kind,
                seq = ticket.seq,
                "Toggle rolled back"
            );
        }
        removed
    }

    /// Overwrite the confirmed state with a re-fetched server state
    ///
    /// Returns the resulting visible state, or `None` if the entry was released.
    pub fn apply_authoritative(
        &self,
        ticket: &ToggleTicket,
        state: ReactionState,
    ) -> Option<ReactionState> {
        let mut entry = self.live_entry(ticket)?;
        entry.confirmed = state;
        entry.stale = false;
        Some(entry.visible())
    }

    /// The toggle's owner went away before it settled
    ///
    /// Removes the toggle's flip from the queue. If its request had already
    /// gone out, the server may or may not have applied it, so the pair is
    /// marked stale until fresh server state arrives. Returns `false` if
    /// nothing was removed.
    pub fn abandon(&self, ticket: &ToggleTicket) -> bool {
        let Some(mut entry) = self.live_entry(ticket) else {
            return false;
        };
        let Some(index) = entry.pending.iter().position(|p| p.seq == ticket.seq) else {
            return false;
        };
        let in_flight = entry.pending.remove(index).is_some_and(|p| p.in_flight);
        if in_flight {
            entry.stale = true;
        }
        tracing::debug!(
            entity_id = %ticket.entity_id,
            kind = %ticket.kind,
            seq = ticket.seq,
            in_flight,
            "Toggle abandoned"
        );
        true
    }

    /// Whether the pair must be re-fetched before the ticket's phase runs
    pub fn needs_resync(&self, ticket: &ToggleTicket) -> bool {
        self.live_entry(ticket).is_some_and(|entry| entry.stale)
    }

    /// Replace a stale confirmed state with a fresh server state
    ///
    /// Returns `false` if the entry was released.
    pub fn resync(&self, ticket: &ToggleTicket, state: ReactionState) -> bool {
        let Some(mut entry) = self.live_entry(ticket) else {
            return false;
        };
        entry.confirmed = state;
        entry.stale = false;
        true
    }

    fn live_entry(
        &self,
        ticket: &ToggleTicket,
    ) -> Option<dashmap::mapref::one::RefMut<'_, Key, Entry>> {
        let entry = self
            .entries
            .get_mut(&Self::key(&ticket.entity_id, ticket.kind))?;
        if entry.generation == ticket.generation {
            Some(entry)
        } else {
            None
        }
    }

    // =========================================================================
    // Authoritative reads
    // =========================================================================

    /// Record what the store looks like before a read goes out
    ///
    /// Creates entries for both kinds so a `release` during the read is
    /// detectable.
    pub fn begin_read(&self, entity_id: &EntityId) -> ReadTicket {
        let observe = |kind: ReactionKind| {
            let entry = self
                .entries
                .entry(Self::key(entity_id, kind))
                .or_insert_with(|| Entry::new(self.next_generation()));
            (kind, entry.generation, entry.issued_seq)
        };

        ReadTicket {
            entity_id: entity_id.clone(),
            observed: [observe(ReactionKind::Like), observe(ReactionKind::Retweet)],
        }
    }

    /// Apply a completed read
    ///
    /// A kind is skipped when it was released, when a toggle was issued after
    /// the read started, or while a toggle is still unsettled. Returns the
    /// visible state afterwards for both kinds.
    pub fn apply_read(&self, ticket: &ReadTicket, fetched: EntityReactions) -> EntityReactions {
        for (kind, generation, seq) in ticket.observed {
            let Some(mut entry) = self.entries.get_mut(&Self::key(&ticket.entity_id, kind)) else {
                continue;
            };
            if entry.generation != generation {
                continue;
            }
            if entry.issued_seq != seq || !entry.pending.is_empty() {
                tracing::debug!(
                    entity_id = %ticket.entity_id,
                    kind = %kind,
                    "Read result superseded by a newer toggle"
                );
                continue;
            }
            entry.confirmed = fetched.get(kind);
            entry.stale = false;
        }
        self.entity_snapshot(&ticket.entity_id)
    }

    // =========================================================================
    // Liveness
    // =========================================================================

    /// Forget an entity; results still in flight for it are discarded
    pub fn release(&self, entity_id: &EntityId) {
        let mut removed = 0;
        for kind in ReactionKind::ALL {
            if self.entries.remove(&Self::key(entity_id, kind)).is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            tracing::debug!(entity_id = %entity_id, "Reaction state released");
        }
    }
}
