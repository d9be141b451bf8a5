//! Integration test utilities for the feed client
//!
//! This crate provides a mock application server with an attached mock
//! object store, and helpers for driving the real reqwest transport
//! against it.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
pub use mock::{MockState, ReactedShape};
