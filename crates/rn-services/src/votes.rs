//! # Voting
//!
//! Load, apply the pure vote logic from `rn_core::voting`, replace.
//! The load/replace pair is not atomic: two concurrent votes on the same
//! post can lose one of the updates unless the store serializes them.

use std::sync::Arc;

use log::info;
use rn_core::voting::{apply_vote, remove_vote};
use rn_core::{Post, PostStore, Result, VoteValue};

pub struct VoteService {
    store: Arc<dyn PostStore>,
}

impl VoteService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    pub async fn upvote(&self, post_id: &str, user_id: &str) -> Result<Post> {
        self.vote(post_id, user_id, VoteValue::Up).await
    }

    pub async fn downvote(&self, post_id: &str, user_id: &str) -> Result<Post> {
        self.vote(post_id, user_id, VoteValue::Down).await
    }

    /// Records a vote, replacing any earlier vote by the same user.
    pub async fn vote(&self, post_id: &str, user_id: &str, value: VoteValue) -> Result<Post> {
        let mut post = self.store.get_by_id(post_id).await?;
        apply_vote(&mut post, user_id, value);
        self.store.replace(&post).await?;
        info!("user {user_id} voted {} on post {post_id}", value.delta());
        Ok(post)
    }

    /// Withdraws a vote. Fails with `InvalidVote` if the user has none.
    pub async fn unvote(&self, post_id: &str, user_id: &str) -> Result<Post> {
        let mut post = self.store.get_by_id(post_id).await?;
        remove_vote(&mut post, user_id)?;
        self.store.replace(&post).await?;
        info!("user {user_id} unvoted post {post_id}");
        Ok(post)
    }
}
