//! Ownership of an issued toggle until it settles

use feed_core::{EntityId, ReactionKind};

use super::store::{SharedReactionStore, ToggleTicket};

/// Owns a toggle from the moment it is issued until it settles
///
/// Dropping the guard before [`commit`](Self::commit) or
/// [`rollback`](Self::rollback) abandons the toggle through
/// [`ReactionStore::abandon`](crate::ReactionStore::abandon).
#[derive(Debug)]
pub struct ToggleGuard {
    store: SharedReactionStore,
    ticket: ToggleTicket,
    settled: bool,
}

impl ToggleGuard {
    /// Apply a toggle optimistically and take ownership of its ticket
    pub fn begin(store: &SharedReactionStore, entity_id: &EntityId, kind: ReactionKind) -> Self {
        let ticket = store.begin_toggle(entity_id, kind);
        Self {
            store: store.clone(),
            ticket,
            settled: false,
        }
    }

    pub fn ticket(&self) -> &ToggleTicket {
        &self.ticket
    }

    /// See [`ReactionStore::commit`](crate::ReactionStore::commit)
    pub fn commit(&mut self) -> bool {
        self.settled = true;
        self.store.commit(&self.ticket)
    }

    /// See [`ReactionStore::rollback`](crate::ReactionStore::rollback)
    pub fn rollback(&mut self) -> bool {
        self.settled = true;
        self.store.rollback(&self.ticket)
    }
}

impl Drop for ToggleGuard {
    fn drop(&mut self) {
        if !self.settled && self.store.abandon(&self.ticket) {
            tracing::debug!(
                entity_id = %self.ticket.entity_id(),
                kind = %self.ticket.kind(),
                "Unsettled toggle dropped"
            );
        }
    }
}
