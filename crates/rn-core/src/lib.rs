//! rusty-news/crates/rn-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Rusty-News.

pub mod comments;
pub mod error;
pub mod ids;
pub mod models;
pub mod ranking;
pub mod traits;
pub mod voting;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
