//! Reaction state storage

mod guard;
mod store;

pub use guard::ToggleGuard;
pub use store::{ReactionStore, ReadTicket, SharedReactionStore, ToggleTicket};
