//! # Post lifecycle
//!
//! Creation, listing, view counting and deletion.

use std::sync::Arc;

use log::{info, warn};
use rn_core::ids::now_timestamp;
use rn_core::{AppError, Category, IdentityLookup, NewPost, Post, PostStore, Result};

pub struct PostService {
    store: Arc<dyn PostStore>,
    identity: Arc<dyn IdentityLookup>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>, identity: Arc<dyn IdentityLookup>) -> Self {
        Self { store, identity }
    }

    /// Creates a post owned by `user_id`, seeded with the author's +1 vote.
    /// `new_post` is expected to be validated by the caller boundary.
    pub async fn create_post(&self, new_post: NewPost, user_id: &str) -> Result<Post> {
        let author = self.identity.resolve(user_id).await?;
        let post = Post::seeded(author, new_post, now_timestamp());
        let stored = self.store.create(post).await?;
        info!("post {} created by {}", stored.id, stored.author.username);
        Ok(stored)
    }

    pub async fn list_all(&self) -> Result<Vec<Post>> {
        self.store.get_all().await
    }

    pub async fn list_by_category(&self, category: Category) -> Result<Vec<Post>> {
        self.store.get_by_category(category).await
    }

    pub async fn list_by_author(&self, login: &str) -> Result<Vec<Post>> {
        self.store.get_by_author(login).await
    }

    /// Loads a post and records one view against it.
    ///
    /// Every single-post read is a read-then-write so view counts stay exact.
    pub async fn get_post_and_count_view(&self, id: &str) -> Result<Post> {
        let mut post = self.store.get_by_id(id).await?;
        post.views += 1;
        self.store.replace(&post).await?;
        Ok(post)
    }

    /// Deletes a post. Only its author may do so.
    pub async fn delete_post(&self, id: &str, user_id: &str) -> Result<()> {
        let post = self.store.get_by_id(id).await?;
        if post.author.id != user_id {
            warn!("user {user_id} tried to delete post {id} owned by {}", post.author.id);
            return Err(AppError::Forbidden(format!(
                "user {user_id} is not the author of post {id}"
            )));
        }
        // Existence was just confirmed; a concurrent delete is fine too.
        self.store.delete(id).await?;
        info!("post {id} deleted by {user_id}");
        Ok(())
    }
}
