//! Shared fixtures for the integration tests.
//!
//! Every property test runs once per Content Store backend so the external
//! contract is checked identically across implementations.

use std::sync::Arc;

use rn_api::CreatePostRequest;
use rn_core::{IdentityLookup, NewPost, PostStore, User, UserRepo};
use rn_db_sqlite::SqlitePostStore;
use rn_services::Engine;
use rn_store_memory::{InMemoryPostStore, InMemoryUserRepo};

pub struct Backend {
    pub name: &'static str,
    pub store: Arc<dyn PostStore>,
    pub users: Arc<dyn UserRepo>,
    pub identity: Arc<dyn IdentityLookup>,
}

impl Backend {
    pub fn engine(&self) -> Engine {
        Engine::new(self.store.clone(), self.identity.clone())
    }

    /// Registers `login` directly in the user directory and returns its id.
    pub async fn user(&self, login: &str) -> String {
        self.users
            .insert_user(User {
                id: String::new(),
                login: login.into(),
                password_hash: String::new(),
            })
            .await
            .expect("insert user")
            .id
    }
}

pub async fn memory_backend() -> Backend {
    let users = Arc::new(InMemoryUserRepo::new());
    Backend {
        name: "memory",
        store: Arc::new(InMemoryPostStore::new()),
        users: users.clone(),
        identity: users,
    }
}

pub async fn sqlite_backend() -> Backend {
    let store = SqlitePostStore::new("sqlite::memory:")
        .await
        .expect("open sqlite");
    let users = Arc::new(store.users());
    Backend {
        name: "sqlite",
        store: Arc::new(store),
        users: users.clone(),
        identity: users,
    }
}

pub async fn backends() -> Vec<Backend> {
    vec![memory_backend().await, sqlite_backend().await]
}

pub fn text_post(category: &str, title: &str) -> NewPost {
    CreatePostRequest {
        category: category.into(),
        kind: "text".into(),
        title: title.into(),
        text: Some(format!("{title} body")),
        url: None,
    }
    .validate()
    .expect("valid request")
}
