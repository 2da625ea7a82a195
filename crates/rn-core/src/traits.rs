//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.
//! The engine only ever sees `dyn` trait objects and never branches on which
//! backend sits behind them.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Author, Category, Post, User};

/// Durable keyed collection of posts.
///
/// Every list operation returns posts in ranking order (see [`crate::ranking`]).
/// Unmatched filters yield an empty list, never an error.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Assigns a fresh id, persists, and returns the stored post.
    async fn create(&self, post: Post) -> Result<Post>;
    async fn get_all(&self) -> Result<Vec<Post>>;
    async fn get_by_category(&self, category: Category) -> Result<Vec<Post>>;
    async fn get_by_author(&self, login: &str) -> Result<Vec<Post>>;
    /// Fails with `NotFound` if absent.
    async fn get_by_id(&self, id: &str) -> Result<Post>;
    /// Overwrites the stored document at `post.id` in full.
    /// Fails with `NotFound` if the id does not exist.
    async fn replace(&self, post: &Post) -> Result<()>;
    /// Returns whether a document was removed. Absence is not an error.
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// Resolves an authenticated user id to an author snapshot.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    /// Fails with `NotFound` if the user is unknown.
    async fn resolve(&self, user_id: &str) -> Result<Author>;
}

/// Account storage used by registration and login.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Assigns a fresh id. Fails with `Conflict` if the login is taken.
    async fn insert_user(&self, user: User) -> Result<User>;
    async fn get_user(&self, id: &str) -> Result<User>;
    async fn find_by_login(&self, login: &str) -> Result<Option<User>>;
}

/// Registration and credential checks.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Creates an account. Fails with `Conflict` if the login is taken.
    async fn register(&self, login: &str, password: &str) -> Result<User>;
    /// Returns the account on matching credentials, `Unauthorized` otherwise.
    async fn login(&self, login: &str, password: &str) -> Result<User>;
}
