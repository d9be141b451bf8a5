//! Wire models for application-server payloads
//!
//! All fields use camelCase on the wire.

mod media;
mod post;
mod reaction;

pub use media::{
    DeleteUrlsRequest, DeleteUrlsResponse, PresignedDeleteModel, PresignedPutModel,
    UploadUrlsRequest, UploadUrlsResponse,
};
pub use post::{CreatePostRequest, PostModel};
pub use reaction::ReactedFlag;
