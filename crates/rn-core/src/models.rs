//! # Domain Models
//!
//! These structs represent the core entities of Rusty-News.
//! The serde form of [`Post`] is the canonical external representation:
//! callers outside the engine receive exactly what serializes out of here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Identity snapshot taken when a post, comment or vote is created.
/// Never re-resolved afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub username: String,
}

/// The fixed set of boards a post can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Music,
    Funny,
    Videos,
    Programming,
    News,
    Fashion,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Music,
        Category::Funny,
        Category::Videos,
        Category::Programming,
        Category::News,
        Category::Fashion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Music => "music",
            Category::Funny => "funny",
            Category::Videos => "videos",
            Category::Programming => "programming",
            Category::News => "news",
            Category::Fashion => "fashion",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AppError::ValidationError(format!("unknown category '{s}'")))
    }
}

/// Whether a post carries free text or a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Text,
    Link,
}

impl FromStr for PostKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(PostKind::Text),
            "link" => Ok(PostKind::Link),
            other => Err(AppError::ValidationError(format!("unknown post kind '{other}'"))),
        }
    }
}

/// Post payload. Tagged by `kind` so a serialized post carries exactly one
/// of `text` or `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PostBody {
    Text { text: String },
    Link { url: String },
}

impl PostBody {
    pub fn kind(&self) -> PostKind {
        match self {
            PostBody::Text { .. } => PostKind::Text,
            PostBody::Link { .. } => PostKind::Link,
        }
    }
}

/// A single up or down vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    pub fn delta(self) -> i64 {
        match self {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
        }
    }
}

impl From<VoteValue> for i64 {
    fn from(value: VoteValue) -> Self {
        value.delta()
    }
}

impl TryFrom<i64> for VoteValue {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteValue::Up),
            -1 => Ok(VoteValue::Down),
            other => Err(AppError::ValidationError(format!("vote must be 1 or -1, got {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    #[serde(rename = "user")]
    pub user_id: String,
    #[serde(rename = "vote")]
    pub value: VoteValue,
}

/// Flat comment under a post. No replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub author: Author,
    pub body: String,
    pub created_at: String,
    pub id: String,
}

/// The fundamental unit of content. Stored and replaced as a whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author: Author,
    pub comments: Vec<Comment>,
    pub category: Category,
    /// Always equal to the sum of `votes[].value`.
    pub score: i64,
    pub title: String,
    #[serde(flatten)]
    pub body: PostBody,
    /// ISO-8601 UTC, second precision. Compared as a string for ranking.
    pub created_at: String,
    pub approval_percent: u32,
    pub views: u64,
    pub votes: Vec<Vote>,
}

impl Post {
    /// Builds an unsaved post carrying the author's seed vote.
    /// The id stays empty until the Content Store assigns one.
    pub fn seeded(author: Author, new_post: NewPost, created_at: String) -> Self {
        let seed = Vote {
            user_id: author.id.clone(),
            value: VoteValue::Up,
        };
        Self {
            id: String::new(),
            author,
            comments: Vec::new(),
            category: new_post.category,
            score: 1,
            title: new_post.title,
            body: new_post.body,
            created_at,
            approval_percent: 100,
            views: 0,
            votes: vec![seed],
        }
    }

    pub fn vote_of(&self, user_id: &str) -> Option<VoteValue> {
        self.votes
            .iter()
            .find(|v| v.user_id == user_id)
            .map(|v| v.value)
    }
}

/// Validated input for post creation. Built by the caller boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub category: Category,
    pub title: String,
    pub body: PostBody,
}

/// Registered account. Owned by the user directory, not by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub login: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

impl User {
    pub fn author(&self) -> Author {
        Author {
            id: self.id.clone(),
            username: self.login.clone(),
        }
    }
}
