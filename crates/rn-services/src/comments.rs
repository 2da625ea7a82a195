//! # Comments
//!
//! Adding and removing comments under a post. Removal is owner-only.

use std::sync::Arc;

use log::{info, warn};
use rn_core::comments::{append_comment, remove_comment};
use rn_core::ids::{new_id, now_timestamp};
use rn_core::{AppError, Comment, IdentityLookup, Post, PostStore, Result};

pub struct CommentService {
    store: Arc<dyn PostStore>,
    identity: Arc<dyn IdentityLookup>,
}

impl CommentService {
    pub fn new(store: Arc<dyn PostStore>, identity: Arc<dyn IdentityLookup>) -> Self {
        Self { store, identity }
    }

    /// Appends a comment by `user_id` and returns the updated post.
    pub async fn add_comment(&self, post_id: &str, user_id: &str, body: &str) -> Result<Post> {
        let author = self.identity.resolve(user_id).await?;
        let comment = Comment {
            author,
            body: body.to_string(),
            created_at: now_timestamp(),
            id: new_id()?,
        };
        let comment_id = comment.id.clone();

        let mut post = self.store.get_by_id(post_id).await?;
        append_comment(&mut post, comment);
        self.store.replace(&post).await?;
        info!("comment {comment_id} added to post {post_id} by {user_id}");
        Ok(post)
    }

    /// Removes a comment. Only the comment's author may do so.
    pub async fn remove_comment(&self, post_id: &str, user_id: &str, comment_id: &str) -> Result<Post> {
        let mut post = self.store.get_by_id(post_id).await?;
        match remove_comment(&mut post, user_id, comment_id) {
            Ok(_) => {}
            Err(e @ AppError::Forbidden(_)) => {
                warn!("user {user_id} tried to remove comment {comment_id} on post {post_id}");
                return Err(e);
            }
            Err(e) => return Err(e),
        }
        self.store.replace(&post).await?;
        info!("comment {comment_id} removed from post {post_id}");
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rn_core::{Author, Category, MockIdentityLookup, MockPostStore, NewPost, PostBody, User, UserRepo};
    use rn_store_memory::{InMemoryPostStore, InMemoryUserRepo};

    struct Fixture {
        service: CommentService,
        store: Arc<InMemoryPostStore>,
        post_id: String,
        ann: String,
        ben: String,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(InMemoryPostStore::new());
        let users = Arc::new(InMemoryUserRepo::new());
        let mut ids = Vec::new();
        for login in ["ann", "ben"] {
            let user = users
                .insert_user(User {
                    id: String::new(),
                    login: login.into(),
                    password_hash: String::new(),
                })
                .await
                .unwrap();
            ids.push(user.id);
        }
        let new_post = NewPost {
            category: Category::Programming,
            title: "async traits".into(),
            body: PostBody::Text {
                text: "finally stable".into(),
            },
        };
        let post = store
            .create(Post::seeded(
                users.get_user(&ids[0]).await.unwrap().author(),
                new_post,
                "2024-04-04T04:04:04Z".into(),
            ))
            .await
            .unwrap();

        let ben = ids.pop().unwrap();
        let ann = ids.pop().unwrap();
        Fixture {
            service: CommentService::new(store.clone(), users),
            store,
            post_id: post.id,
            ann,
            ben,
        }
    }

    #[tokio::test]
    async fn add_comment_snapshots_author() {
        let f = fixture().await;
        let post = f.service.add_comment(&f.post_id, &f.ben, "nice").await.unwrap();

        assert_eq!(post.comments.len(), 1);
        let comment = &post.comments[0];
        assert_eq!(comment.author.id, f.ben);
        assert_eq!(comment.author.username, "ben");
        assert_eq!(comment.body, "nice");
        assert_eq!(comment.id.len(), 40);

        let stored = f.store.get_by_id(&f.post_id).await.unwrap();
        assert_eq!(stored.comments, post.comments);
    }

    #[tokio::test]
    async fn comment_ids_are_unique() {
        let f = fixture().await;
        f.service.add_comment(&f.post_id, &f.ann, "one").await.unwrap();
        let post = f.service.add_comment(&f.post_id, &f.ann, "two").await.unwrap();
        assert_ne!(post.comments[0].id, post.comments[1].id);
    }

    #[tokio::test]
    async fn non_author_cannot_remove_comment() {
        let f = fixture().await;
        let post = f.service.add_comment(&f.post_id, &f.ann, "mine").await.unwrap();
        let comment_id = post.comments[0].id.clone();

        let err = f
            .service
            .remove_comment(&f.post_id, &f.ben, &comment_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        let stored = f.store.get_by_id(&f.post_id).await.unwrap();
        assert_eq!(stored.comments.len(), 1);

        let post = f
            .service
            .remove_comment(&f.post_id, &f.ann, &comment_id)
            .await
            .unwrap();
        assert!(post.comments.is_empty());
    }

    #[tokio::test]
    async fn removing_unknown_comment_is_not_found() {
        let f = fixture().await;
        let err = f
            .service
            .remove_comment(&f.post_id, &f.ann, "missing")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn unknown_user_cannot_comment() {
        let f = fixture().await;
        let err = f
            .service
            .add_comment(&f.post_id, "ghost", "boo")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn commenting_on_missing_post_is_not_found() {
        let f = fixture().await;
        let err = f
            .service
            .add_comment("missing", &f.ann, "hello")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn forbidden_removal_never_writes() {
        let mut identity = MockIdentityLookup::new();
        identity.expect_resolve().never();
        let mut store = MockPostStore::new();
        store.expect_get_by_id().returning(|id| {
            let owner = Author {
                id: "ann".into(),
                username: "ann".into(),
            };
            let new_post = NewPost {
                category: Category::Funny,
                title: "t".into(),
                body: PostBody::Text { text: String::new() },
            };
            let mut post = Post::seeded(owner.clone(), new_post, "2024-01-01T00:00:00Z".into());
            post.id = id.to_string();
            post.comments.push(Comment {
                author: owner,
                body: "b".into(),
                created_at: "2024-01-01T00:00:01Z".into(),
                id: "c1".into(),
            });
            Ok(post)
        });
        store.expect_replace().never();

        let service = CommentService::new(Arc::new(store), Arc::new(identity));
        let err = service.remove_comment("p1", "ben", "c1").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
