//! # rn-db-sqlite Implementation
//!
//! Relational backend for `PostStore` and `UserRepo`.
//!
//! A post is stored whole as a JSON document, next to the few columns the
//! engine filters and ranks on. Those columns are rewritten on every
//! `replace` so they never drift from the document.

use std::str::FromStr;

use async_trait::async_trait;
use log::{debug, info};
use rn_core::ids::new_id;
use rn_core::{AppError, Author, Category, IdentityLookup, Post, PostStore, Result, User, UserRepo};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS posts (
        id           TEXT PRIMARY KEY,
        category     TEXT NOT NULL,
        author_login TEXT NOT NULL,
        score        INTEGER NOT NULL,
        created_at   TEXT NOT NULL,
        document     TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS posts_ranking ON posts (score DESC, created_at ASC)",
    "CREATE TABLE IF NOT EXISTS users (
        id            TEXT PRIMARY KEY,
        login         TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL
    )",
];

const RANKING: &str = "ORDER BY score DESC, created_at ASC";

/// In-memory databases live and die with their connection, so they get one
/// connection that is never recycled.
fn pool_options(url: &str) -> SqlitePoolOptions {
    if url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    }
}

pub struct SqlitePostStore {
    pool: SqlitePool,
}

impl SqlitePostStore {
    /// Connects and creates the schema if needed.
    pub async fn new(url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = pool_options(url).connect_with(options).await?;
        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }
        info!("sqlite store ready at {url}");
        Ok(Self { pool })
    }

    /// A user directory sharing this store's connection pool.
    pub fn users(&self) -> SqliteUserRepo {
        SqliteUserRepo {
            pool: self.pool.clone(),
        }
    }

    async fn fetch_ranked(&self, op: &'static str, target: &str, sql: &str, arg: Option<&str>) -> Result<Vec<Post>> {
        let mut query = sqlx::query(sql);
        if let Some(arg) = arg {
            query = query.bind(arg);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::storage(op, target, e))?;
        rows.iter().map(|row| decode_post(row, op, target)).collect()
    }
}

fn decode_post(row: &SqliteRow, op: &'static str, target: &str) -> Result<Post> {
    let document: String = row
        .try_get("document")
        .map_err(|e| AppError::storage(op, target, e))?;
    serde_json::from_str(&document).map_err(|e| AppError::storage(op, target, e))
}

fn encode_post(post: &Post, op: &'static str) -> Result<String> {
    serde_json::to_string(post).map_err(|e| AppError::storage(op, &post.id, e))
}

#[async_trait]
impl PostStore for SqlitePostStore {
    async fn create(&self, mut post: Post) -> Result<Post> {
        post.id = new_id()?;
        let document = encode_post(&post, "create")?;
        sqlx::query(
            "INSERT INTO posts (id, category, author_login, score, created_at, document) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&post.id)
        .bind(post.category.as_str())
        .bind(&post.author.username)
        .bind(post.score)
        .bind(&post.created_at)
        .bind(document)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::storage("create", &post.id, e))?;
        debug!("inserted post {}", post.id);
        Ok(post)
    }

    async fn get_all(&self) -> Result<Vec<Post>> {
        let sql = format!("SELECT document FROM posts {RANKING}");
        self.fetch_ranked("get_all", "*", &sql, None).await
    }

    async fn get_by_category(&self, category: Category) -> Result<Vec<Post>> {
        let sql = format!("SELECT document FROM posts WHERE category = ? {RANKING}");
        self.fetch_ranked("get_by_category", category.as_str(), &sql, Some(category.as_str()))
            .await
    }

    async fn get_by_author(&self, login: &str) -> Result<Vec<Post>> {
        let sql = format!("SELECT document FROM posts WHERE author_login = ? {RANKING}");
        self.fetch_ranked("get_by_author", login, &sql, Some(login)).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Post> {
        let row = sqlx::query("SELECT document FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::storage("get_by_id", id, e))?;
        match row {
            Some(row) => decode_post(&row, "get_by_id", id),
            None => Err(AppError::not_found("post", id)),
        }
    }

    async fn replace(&self, post: &Post) -> Result<()> {
        let document = encode_post(post, "replace")?;
        let result = sqlx::query(
            "UPDATE posts SET category = ?, author_login = ?, score = ?, created_at = ?, document = ? WHERE id = ?",
        )
        .bind(post.category.as_str())
        .bind(&post.author.username)
        .bind(post.score)
        .bind(&post.created_at)
        .bind(document)
        .bind(&post.id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::storage("replace", &post.id, e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("post", &post.id));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::storage("delete", id, e))?;
        Ok(result.rows_affected() > 0)
    }
}

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

fn decode_user(row: &SqliteRow, op: &'static str, target: &str) -> Result<User> {
    let field = |name: &str| -> Result<String> {
        row.try_get(name).map_err(|e| AppError::storage(op, target, e))
    };
    Ok(User {
        id: field("id")?,
        login: field("login")?,
        password_hash: field("password_hash")?,
    })
}

#[async_trait]
impl UserRepo for SqliteUserRepo {
    async fn insert_user(&self, mut user: User) -> Result<User> {
        user.id = new_id()?;
        let inserted = sqlx::query("INSERT INTO users (id, login, password_hash) VALUES (?, ?, ?)")
            .bind(&user.id)
            .bind(&user.login)
            .bind(&user.password_hash)
            .execute(&self.pool)
            .await;

        match inserted {
            Ok(_) => Ok(user),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(AppError::Conflict(format!("login '{}' is taken", user.login)))
            }
            Err(e) => Err(AppError::storage("insert_user", &user.login, e)),
        }
    }

    async fn get_user(&self, id: &str) -> Result<User> {
        let row = sqlx::query("SELECT id, login, password_hash FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::storage("get_user", id, e))?;
        match row {
            Some(row) => decode_user(&row, "get_user", id),
            None => Err(AppError::not_found("user", id)),
        }
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, login, password_hash FROM users WHERE login = ?")
            .bind(login)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::storage("find_by_login", login, e))?;
        row.map(|row| decode_user(&row, "find_by_login", login))
            .transpose()
    }
}

#[async_trait]
impl IdentityLookup for SqliteUserRepo {
    async fn resolve(&self, user_id: &str) -> Result<Author> {
        Ok(self.get_user(user_id).await?.author())
    }
}
