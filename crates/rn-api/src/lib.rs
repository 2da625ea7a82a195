//! # rn-api
//!
//! The boundary between outside callers and the engine: request parsing,
//! validation, and JSON rendering.

pub mod requests;
pub mod responses;

pub use requests::{parse_category_filter, validate_url, CommentRequest, CreatePostRequest, CredentialsRequest};
pub use responses::{render, render_post, render_posts, ErrorBody};
