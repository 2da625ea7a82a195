//! # rn-store-memory
//!
//! Reference in-memory implementations of `PostStore` and `UserRepo`.
//! Default backend and the one used by tests.
//!
//! Each collection sits behind a single `RwLock`: reads run concurrently,
//! any write excludes everything else, including writes to unrelated posts.
//! Ids are generated before taking the lock and sorting happens after the
//! lock is released.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use log::debug;
use rn_core::ids::new_id;
use rn_core::ranking::rank;
use rn_core::{AppError, Author, Category, IdentityLookup, Post, PostStore, Result, User, UserRepo};

fn read_lock<'a, T>(lock: &'a RwLock<T>, op: &'static str, target: &str) -> Result<RwLockReadGuard<'a, T>> {
    lock.read()
        .map_err(|e| AppError::storage(op, target, anyhow::anyhow!("lock poisoned: {e}")))
}

fn write_lock<'a, T>(lock: &'a RwLock<T>, op: &'static str, target: &str) -> Result<RwLockWriteGuard<'a, T>> {
    lock.write()
        .map_err(|e| AppError::storage(op, target, anyhow::anyhow!("lock poisoned: {e}")))
}

/// Posts keyed by id. Data is lost when the store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryPostStore {
    posts: RwLock<HashMap<String, Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies out every post matching `keep`, then ranks them unlocked.
    fn scan(&self, op: &'static str, target: &str, keep: impl Fn(&Post) -> bool) -> Result<Vec<Post>> {
        let mut found: Vec<Post> = {
            let posts = read_lock(&self.posts, op, target)?;
            posts.values().filter(|p| keep(p)).cloned().collect()
        };
        rank(&mut found);
        Ok(found)
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn create(&self, mut post: Post) -> Result<Post> {
        post.id = new_id()?;
        let mut posts = write_lock(&self.posts, "create", &post.id)?;
        posts.insert(post.id.clone(), post.clone());
        debug!("stored post {}", post.id);
        Ok(post)
    }

    async fn get_all(&self) -> Result<Vec<Post>> {
        self.scan("get_all", "*", |_| true)
    }

    async fn get_by_category(&self, category: Category) -> Result<Vec<Post>> {
        self.scan("get_by_category", category.as_str(), |p| p.category == category)
    }

    async fn get_by_author(&self, login: &str) -> Result<Vec<Post>> {
        self.scan("get_by_author", login, |p| p.author.username == login)
    }

    async fn get_by_id(&self, id: &str) -> Result<Post> {
        let posts = read_lock(&self.posts, "get_by_id", id)?;
        posts
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found("post", id))
    }

    async fn replace(&self, post: &Post) -> Result<()> {
        let mut posts = write_lock(&self.posts, "replace", &post.id)?;
        match posts.get_mut(&post.id) {
            Some(slot) => {
                *slot = post.clone();
                Ok(())
            }
            None => Err(AppError::not_found("post", &post.id)),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut posts = write_lock(&self.posts, "delete", id)?;
        Ok(posts.remove(id).is_some())
    }
}

/// Accounts keyed by id. Logins are unique.
#[derive(Debug, Default)]
pub struct InMemoryUserRepo {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn insert_user(&self, mut user: User) -> Result<User> {
        user.id = new_id()?;
        let mut users = write_lock(&self.users, "insert_user", &user.login)?;
        if users.values().any(|u| u.login == user.login) {
            return Err(AppError::Conflict(format!("login '{}' is taken", user.login)));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: &str) -> Result<User> {
        let users = read_lock(&self.users, "get_user", id)?;
        users
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found("user", id))
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>> {
        let users = read_lock(&self.users, "find_by_login", login)?;
        Ok(users.values().find(|u| u.login == login).cloned())
    }
}

#[async_trait]
impl IdentityLookup for InMemoryUserRepo {
    async fn resolve(&self, user_id: &str) -> Result<Author> {
        Ok(self.get_user(user_id).await?.author())
    }
}
