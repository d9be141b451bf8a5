//! # feed-cache
//!
//! In-memory cache of reaction state, owned by the reaction synchronizer.
//!
//! ## Features
//!
//! - **Optimistic state**: every toggle is visible the moment it is issued
//! - **Projection**: visible state is the confirmed server state with all
//!   still-pending toggles replayed on top
//! - **Ordering**: per-key sequence numbers and a FIFO gate for network phases
//! - **Liveness**: released entities drop late results by generation check
//! - **Abandonment**: a dropped [`ToggleGuard`] takes its optimistic flip
//!   back out of the queue
//!
//! ## Example
//!
//! ```ignore
//! use feed_cache::ReactionStore;
//!
//! let store = ReactionStore::new_shared();
//!
//! let ticket = store.begin_toggle(&post_id, ReactionKind::Like);
//! assert!(store.snapshot(&post_id, ReactionKind::Like).reacted);
//!
//! let _gate = ticket.gate().lock().await;
//! store.start_phase(&ticket);
//! // ... call the server ...
//! store.commit(&ticket);
//! ```

pub mod reaction;

pub use reaction::{ReactionStore, ReadTicket, SharedReactionStore, ToggleGuard, ToggleTicket};
