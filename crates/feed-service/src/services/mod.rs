//! Client services
//!
//! Orchestration on top of the typed API and the reaction store.

pub mod context;
pub mod media;
pub mod reaction;


pub use context::{ServiceContext, ServiceContextBuilder};
pub use media::MediaService;
pub use reaction::ReactionSynchronizer;
