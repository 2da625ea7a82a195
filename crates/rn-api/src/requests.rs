//! Inbound payloads and their validation.
//!
//! Everything the engine receives has passed through here first, so the
//! engine itself never sees an unknown category, kind or malformed URL.

use rn_core::{AppError, Category, NewPost, PostBody, PostKind, Result};
use serde::Deserialize;
use url::{ParseError, Url};

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub category: String,
    #[serde(alias = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl CreatePostRequest {
    pub fn validate(self) -> Result<NewPost> {
        let category: Category = self.category.parse()?;
        let kind: PostKind = self.kind.parse()?;
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::ValidationError("title is required".into()));
        }

        let body = match kind {
            PostKind::Text => PostBody::Text {
                text: self.text.unwrap_or_default(),
            },
            PostKind::Link => {
                let url = self
                    .url
                    .ok_or_else(|| AppError::ValidationError("link posts need a url".into()))?;
                validate_url(&url)?;
                PostBody::Link { url }
            }
        };

        Ok(NewPost {
            category,
            title: title.to_string(),
            body,
        })
    }
}

/// Accepts http(s) URLs with a host. A missing scheme is read as `http://`,
/// so `example.com/page` passes.
pub fn validate_url(raw: &str) -> Result<()> {
    let parsed = match Url::parse(raw) {
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("http://{raw}")),
        parsed => parsed,
    }
    .map_err(|e| AppError::ValidationError(format!("invalid URL '{raw}': {e}")))?;
    let web = matches!(parsed.scheme(), "http" | "https");
    if !web || parsed.host_str().is_none() {
        return Err(AppError::ValidationError(format!("invalid URL '{raw}'")));
    }
    Ok(())
}

/// Listing filter. `all` means no filter.
pub fn parse_category_filter(raw: &str) -> Result<Option<Category>> {
    if raw == "all" {
        return Ok(None);
    }
    raw.parse().map(Some)
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentRequest {
    pub comment: String,
}

impl CommentRequest {
    pub fn validate(self) -> Result<String> {
        if self.comment.trim().is_empty() {
            return Err(AppError::ValidationError("comment is required".into()));
        }
        Ok(self.comment)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

impl CredentialsRequest {
    /// Trims the username. The password is taken as given.
    pub fn validate(self) -> Result<(String, String)> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(AppError::ValidationError("username is required".into()));
        }
        if self.password.is_empty() {
            return Err(AppError::ValidationError("password is required".into()));
        }
        Ok((username.to_string(), self.password))
    }
}
