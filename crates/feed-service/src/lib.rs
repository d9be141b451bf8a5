//! # feed-service
//!
//! Application layer: the reaction synchronizer and the media upload
//! workflow, wired together through a `ServiceContext`.

pub mod services;

pub use services::{MediaService, ReactionSynchronizer, ServiceContext, ServiceContextBuilder};
