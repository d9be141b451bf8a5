//! Model ↔ entity mappers

mod post;

pub use post::create_post_request;
