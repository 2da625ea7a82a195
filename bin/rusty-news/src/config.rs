//! Runtime settings: defaults, then an optional `rusty-news.toml`, then
//! `RUSTY_NEWS_*` environment variables.

use clap::ValueEnum;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Lives for one process only.
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub store: StoreBackend,
    pub database_url: String,
    pub log_level: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("store", "memory")?
            .set_default("database_url", "sqlite:rusty_news.db")?
            .set_default("log_level", "info")?
            .add_source(File::with_name("rusty-news").required(false))
            .add_source(Environment::with_prefix("RUSTY_NEWS"))
            .build()?
            .try_deserialize()
    }
}
