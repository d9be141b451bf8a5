//! Typed application-server and object-storage calls

mod feed_api;

pub use feed_api::FeedApi;
