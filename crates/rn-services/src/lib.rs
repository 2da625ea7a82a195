//! # rn-services
//!
//! The stateless Content & Voting engine. Each service holds only handles
//! to the shared store and identity lookup, so any number of workers can
//! call into it concurrently.

pub mod comments;
pub mod posts;
pub mod votes;

use std::sync::Arc;

use rn_core::{IdentityLookup, PostStore};

pub use comments::CommentService;
pub use posts::PostService;
pub use votes::VoteService;

/// All engine services wired to one store and one identity lookup.
pub struct Engine {
    pub posts: PostService,
    pub votes: VoteService,
    pub comments: CommentService,
}

impl Engine {
    pub fn new(store: Arc<dyn PostStore>, identity: Arc<dyn IdentityLookup>) -> Self {
        Self {
            posts: PostService::new(store.clone(), identity.clone()),
            votes: VoteService::new(store.clone()),
            comments: CommentService::new(store, identity),
        }
    }
}
