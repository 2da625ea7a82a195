//! Outbound JSON. A post renders through its own serde form, which is the
//! canonical external representation.

use rn_core::{AppError, Post, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

pub fn render<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Internal(format!("rendering failed: {e}")))
}

pub fn render_post(post: &Post) -> Result<String> {
    render(post)
}

pub fn render_posts(posts: &[Post]) -> Result<String> {
    render(posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rn_core::{Author, Category, NewPost, PostBody};

    #[test]
    fn rendered_list_keeps_one_body_field_per_post() {
        let author = Author {
            id: "u".into(),
            username: "ann".into(),
        };
        let text = Post::seeded(
            author.clone(),
            NewPost {
                category: Category::News,
                title: "a".into(),
                body: PostBody::Text { text: "t".into() },
            },
            "2024-01-01T00:00:00Z".into(),
        );
        let link = Post::seeded(
            author,
            NewPost {
                category: Category::News,
                title: "b".into(),
                body: PostBody::Link {
                    url: "https://example.com".into(),
                },
            },
            "2024-01-01T00:00:01Z".into(),
        );

        let json: serde_json::Value = serde_json::from_str(&render_posts(&[text, link]).unwrap()).unwrap();
        assert_eq!(json[0]["text"], "t");
        assert!(json[0].get("url").is_none());
        assert_eq!(json[1]["url"], "https://example.com");
        assert!(json[1].get("text").is_none());
    }

    #[test]
    fn error_body_carries_message() {
        let body = ErrorBody::from(&AppError::not_found("post", "p1"));
        assert_eq!(body.message, "post not found with ID p1");
    }
}
