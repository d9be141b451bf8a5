//! Reaction entities - per-entity reacted flag and aggregate counter

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reaction kinds a post can receive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Retweet,
}

impl ReactionKind {
    /// All kinds, in display order
    pub const ALL: [ReactionKind; 2] = [ReactionKind::Like, ReactionKind::Retweet];

    /// Wire name used in the `type` query parameter
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Retweet => "retweet",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "like" => Ok(Self::Like),
            "retweet" => Ok(Self::Retweet),
            _ => Err(format!("Invalid reaction kind: {s}")),
        }
    }
}

/// Reacted flag and aggregate count for one (entity, kind) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReactionState {
    /// Whether the current actor has this reaction active
    pub reacted: bool,
    /// Aggregate count across all actors
    pub count: u64,
}

impl ReactionState {
    /// Create a new ReactionState
    pub const fn new(reacted: bool, count: u64) -> Self {
        Self { reacted, count }
    }

    /// The state after one local toggle: flag flipped, count moved by one.
    ///
    /// Turning a reaction off never takes the count below zero.
    #[must_use]
    pub const fn toggled(self) -> Self {
        if self.reacted {
            Self {
                reacted: false,
                count: self.count.saturating_sub(1),
            }
        } else {
            Self {
                reacted: true,
                count: self.count.saturating_add(1),
            }
        }
    }
}

/// Both reaction kinds for one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityReactions {
    pub like: ReactionState,
    pub retweet: ReactionState,
}

impl EntityReactions {
    /// Get the state for a kind
    pub fn get(&self, kind: ReactionKind) -> ReactionState {
        match kind {
            ReactionKind::Like => self.like,
            ReactionKind::Retweet => self.retweet,
        }
    }

    /// Replace the state for a kind
    pub fn set(&mut self, kind: ReactionKind, state: ReactionState) {
        match kind {
            ReactionKind::Like => self.like = state,
            ReactionKind::Retweet => self.retweet = state,
        }
    }
}

/// A toggle that has been applied optimistically but not yet settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingToggle {
    pub kind: ReactionKind,
    /// Reacted flag the caller saw before this toggle
    pub previous_reacted: bool,
    /// Whether the network phase has started
    pub in_flight: bool,
    /// Sequence number issued for this toggle
    pub seq: u64,
}

impl PendingToggle {
    /// Create a new queued toggle
    pub fn new(kind: ReactionKind, previous_reacted: bool, seq: u64) -> Self {
        Self {
            kind,
            previous_reacted,
            in_flight: false,
            seq,
        }
    }
}
