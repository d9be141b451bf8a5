//! # feed-http
//!
//! Transport layer implementing the `TransferClient` port with reqwest.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - `HttpTransferClient`, the reqwest implementation of `TransferClient`
//! - Wire models with serde derives for every application-server payload
//! - Model ↔ entity mappers
//! - `FeedApi`, typed calls for the reaction, post and presigned-URL endpoints
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use feed_common::ClientConfig;
//! use feed_http::{FeedApi, HttpTransferClient};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env()?;
//!     let transport = HttpTransferClient::new(&config.api)?;
//!     let api = FeedApi::new(Arc::new(transport));
//!
//!     let liked = api.get_reaction(&post_id, ReactionKind::Like).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod mappers;
pub mod models;

// Re-export commonly used types
pub use api::FeedApi;
pub use client::HttpTransferClient;
pub use models::{
    CreatePostRequest, DeleteUrlsRequest, DeleteUrlsResponse, PostModel, PresignedDeleteModel,
    PresignedPutModel, ReactedFlag, UploadUrlsRequest, UploadUrlsResponse,
};
