//! # rn-auth-simple
//!
//! Argon2-based implementation of `AuthProvider`.
//! Handles account registration and password verification on top of any
//! `UserRepo`. Session or token issuance is left to the caller.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use log::{info, warn};
use rn_core::traits::AuthProvider;
use rn_core::{AppError, Result, User, UserRepo};

pub struct SimpleAuthProvider {
    users: Arc<dyn UserRepo>,
}

impl SimpleAuthProvider {
    pub fn new(users: Arc<dyn UserRepo>) -> Self {
        Self { users }
    }

    /// Hashes with a fresh random salt. Output is a PHC string.
    pub fn hash_password(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
    }

    /// Verifies if a provided password matches a stored Argon2 hash.
    pub fn verify_password(password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(p) => p,
            Err(_) => return false,
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[async_trait]
impl AuthProvider for SimpleAuthProvider {
    async fn register(&self, login: &str, password: &str) -> Result<User> {
        if login.trim().is_empty() || password.is_empty() {
            return Err(AppError::ValidationError(
                "login and password are required".into(),
            ));
        }
        let user = User {
            id: String::new(),
            login: login.to_string(),
            password_hash: Self::hash_password(password)?,
        };
        let user = self.users.insert_user(user).await?;
        info!("registered user {} ({})", user.login, user.id);
        Ok(user)
    }

    async fn login(&self, login: &str, password: &str) -> Result<User> {
        let user = self.users.find_by_login(login).await?;
        match user {
            Some(user) if Self::verify_password(password, &user.password_hash) => Ok(user),
            _ => {
                warn!("failed login for {login}");
                Err(AppError::Unauthorized("invalid login or password".into()))
            }
        }
    }
}
