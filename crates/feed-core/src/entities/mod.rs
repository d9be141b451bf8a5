//! Domain entities - core business objects

mod post;
mod reaction;

pub use post::{MediaBlob, Post, PostDraft, UploadTarget};
pub use reaction::{EntityReactions, PendingToggle, ReactionKind, ReactionState};
