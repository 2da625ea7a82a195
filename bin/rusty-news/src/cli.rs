use clap::{Parser, Subcommand};

use crate::config::StoreBackend;

#[derive(Debug, Parser)]
#[command(name = "rusty-news", version, about = "Link aggregation engine")]
pub struct Cli {
    /// Overrides the configured storage backend.
    #[arg(long, value_enum, global = true)]
    pub store: Option<StoreBackend>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account from a JSON payload: {"username","password"}.
    Register { payload: String },
    /// Check credentials from a JSON payload and print the account id.
    Login { payload: String },
    /// Submit a post from a JSON payload: {"category","type","title","text"|"url"}.
    Submit {
        #[arg(long, env = "RUSTY_NEWS_USER")]
        user: String,
        payload: String,
    },
    /// List posts in ranking order.
    List {
        /// A category name, or `all`.
        #[arg(long, conflicts_with = "author")]
        category: Option<String>,
        #[arg(long)]
        author: Option<String>,
    },
    /// Show one post. Counts as a view.
    Show { post_id: String },
    Upvote {
        post_id: String,
        #[arg(long, env = "RUSTY_NEWS_USER")]
        user: String,
    },
    Downvote {
        post_id: String,
        #[arg(long, env = "RUSTY_NEWS_USER")]
        user: String,
    },
    Unvote {
        post_id: String,
        #[arg(long, env = "RUSTY_NEWS_USER")]
        user: String,
    },
    Comment {
        post_id: String,
        #[arg(long, env = "RUSTY_NEWS_USER")]
        user: String,
        body: String,
    },
    Uncomment {
        post_id: String,
        comment_id: String,
        #[arg(long, env = "RUSTY_NEWS_USER")]
        user: String,
    },
    /// Delete one of your own posts.
    Delete {
        post_id: String,
        #[arg(long, env = "RUSTY_NEWS_USER")]
        user: String,
    },
    /// Run a short scripted session and print the resulting front page.
    Demo,
}
