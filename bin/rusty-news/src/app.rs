//! Wires the configured backend into the engine and executes one command.

use std::sync::Arc;

use log::info;
use rn_api::{
    parse_category_filter, render, render_post, render_posts, CommentRequest, CreatePostRequest,
    CredentialsRequest,
};
use rn_auth_simple::SimpleAuthProvider;
use rn_core::{AppError, AuthProvider, IdentityLookup, PostStore, Result, UserRepo};
use rn_services::Engine;
use rn_store_memory::{InMemoryPostStore, InMemoryUserRepo};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::cli::Command;
use crate::config::{Settings, StoreBackend};

/// Shared across every command. Dynamic dispatch keeps backends swappable.
pub struct App {
    engine: Engine,
    auth: Box<dyn AuthProvider>,
}

impl App {
    pub async fn build(settings: &Settings) -> anyhow::Result<Self> {
        let (store, identity, users): (Arc<dyn PostStore>, Arc<dyn IdentityLookup>, Arc<dyn UserRepo>) =
            match settings.store {
                StoreBackend::Memory => {
                    let users = Arc::new(InMemoryUserRepo::new());
                    let store: Arc<dyn PostStore> = Arc::new(InMemoryPostStore::new());
                    (store, users.clone() as Arc<dyn IdentityLookup>, users as Arc<dyn UserRepo>)
                }
                #[cfg(feature = "db-sqlite")]
                StoreBackend::Sqlite => {
                    let store = rn_db_sqlite::SqlitePostStore::new(&settings.database_url).await?;
                    let users = Arc::new(store.users());
                    let store: Arc<dyn PostStore> = Arc::new(store);
                    (store, users.clone() as Arc<dyn IdentityLookup>, users as Arc<dyn UserRepo>)
                }
                #[cfg(not(feature = "db-sqlite"))]
                StoreBackend::Sqlite => anyhow::bail!("built without the db-sqlite feature"),
            };
        info!("using {:?} store", settings.store);

        Ok(Self {
            engine: Engine::new(store, identity),
            auth: Box::new(SimpleAuthProvider::new(users)),
        })
    }

    /// Runs one command and returns its JSON output.
    pub async fn run(&self, command: Command) -> Result<String> {
        let engine = &self.engine;
        match command {
            Command::Register { payload } => {
                let (username, password) = parse_payload::<CredentialsRequest>(&payload)?.validate()?;
                let user = self.auth.register(&username, &password).await?;
                render(&json!({ "id": user.id, "username": user.login }))
            }
            Command::Login { payload } => {
                let (username, password) = parse_payload::<CredentialsRequest>(&payload)?.validate()?;
                let user = self.auth.login(&username, &password).await?;
                render(&json!({ "id": user.id, "username": user.login }))
            }
            Command::Submit { user, payload } => {
                let request = parse_payload::<CreatePostRequest>(&payload)?;
                let post = engine.posts.create_post(request.validate()?, &user).await?;
                render_post(&post)
            }
            Command::List { category, author } => {
                let posts = match (category, author) {
                    (_, Some(login)) => engine.posts.list_by_author(&login).await?,
                    (Some(raw), None) => match parse_category_filter(&raw)? {
                        Some(category) => engine.posts.list_by_category(category).await?,
                        None => engine.posts.list_all().await?,
                    },
                    (None, None) => engine.posts.list_all().await?,
                };
                render_posts(&posts)
            }
            Command::Show { post_id } => {
                let post = engine.posts.get_post_and_count_view(&post_id).await?;
                render_post(&post)
            }
            Command::Upvote { post_id, user } => render_post(&engine.votes.upvote(&post_id, &user).await?),
            Command::Downvote { post_id, user } => render_post(&engine.votes.downvote(&post_id, &user).await?),
            Command::Unvote { post_id, user } => render_post(&engine.votes.unvote(&post_id, &user).await?),
            Command::Comment { post_id, user, body } => {
                let body = CommentRequest { comment: body }.validate()?;
                render_post(&engine.comments.add_comment(&post_id, &user, &body).await?)
            }
            Command::Uncomment {
                post_id,
                comment_id,
                user,
            } => render_post(&engine.comments.remove_comment(&post_id, &user, &comment_id).await?),
            Command::Delete { post_id, user } => {
                engine.posts.delete_post(&post_id, &user).await?;
                render(&json!({ "message": "success" }))
            }
            Command::Demo => self.demo().await,
        }
    }

    async fn demo(&self) -> Result<String> {
        let engine = &self.engine;
        let ann = self.auth.register("ann", "correct horse").await?;
        let ben = self.auth.register("ben", "battery staple").await?;

        let rust = CreatePostRequest {
            category: "programming".into(),
            kind: "link".into(),
            title: "The Rust Book".into(),
            text: None,
            url: Some("https://doc.rust-lang.org/book/".into()),
        };
        let rust = engine.posts.create_post(rust.validate()?, &ann.id).await?;

        let jokes = CreatePostRequest {
            category: "funny".into(),
            kind: "text".into(),
            title: "Borrow checker jokes".into(),
            text: Some("they never get old, they just get moved".into()),
            url: None,
        };
        let jokes = engine.posts.create_post(jokes.validate()?, &ben.id).await?;

        engine.votes.upvote(&rust.id, &ben.id).await?;
        engine.votes.downvote(&jokes.id, &ann.id).await?;
        engine
            .comments
            .add_comment(&rust.id, &ben.id, "chapter 4 changed my life")
            .await?;
        engine.posts.get_post_and_count_view(&rust.id).await?;

        render_posts(&engine.posts.list_all().await?)
    }
}

fn parse_payload<T: DeserializeOwned>(payload: &str) -> Result<T> {
    serde_json::from_str(payload).map_err(|e| AppError::ValidationError(format!("invalid json input: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_settings() -> Settings {
        Settings {
            store: StoreBackend::Memory,
            database_url: String::new(),
            log_level: "info".into(),
        }
    }

    #[tokio::test]
    async fn demo_ranks_upvoted_link_first() {
        let app = App::build(&memory_settings()).await.unwrap();
        let output = app.run(Command::Demo).await.unwrap();
        let posts: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(posts[0]["title"], "The Rust Book");
        assert_eq!(posts[0]["score"], 2);
        assert_eq!(posts[0]["views"], 1);
        assert_eq!(posts[0]["comments"].as_array().unwrap().len(), 1);
        assert_eq!(posts[1]["score"], 0);
        assert_eq!(posts[1]["approvalPercent"], 50);
    }

    #[tokio::test]
    async fn register_then_login_with_json_credentials() {
        let app = App::build(&memory_settings()).await.unwrap();
        let registered = app
            .run(Command::Register {
                payload: r#"{"username":" ann ","password":"hunter2"}"#.into(),
            })
            .await
            .unwrap();
        let registered: serde_json::Value = serde_json::from_str(&registered).unwrap();
        assert_eq!(registered["username"], "ann");

        let logged_in = app
            .run(Command::Login {
                payload: r#"{"username":"ann","password":"hunter2"}"#.into(),
            })
            .await
            .unwrap();
        let logged_in: serde_json::Value = serde_json::from_str(&logged_in).unwrap();
        assert_eq!(logged_in["id"], registered["id"]);

        let wrong = app
            .run(Command::Login {
                payload: r#"{"username":"ann","password":"nope"}"#.into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(wrong, AppError::Unauthorized(_)));

        let malformed = app
            .run(Command::Register {
                payload: r#"{"username":"ben"}"#.into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(malformed, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn submit_rejects_invalid_payload() {
        let app = App::build(&memory_settings()).await.unwrap();
        let user = app.auth.register("ann", "pw").await.unwrap();
        let err = app
            .run(Command::Submit {
                user: user.id,
                payload: r#"{"category":"news","type":"link","title":"x","url":"nope"}"#.into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
