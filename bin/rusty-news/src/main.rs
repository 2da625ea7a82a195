//! # Rusty-News Binary
//!
//! The entry point that assembles the engine from configuration and runs a
//! single command against it.

mod app;
mod cli;
mod config;

use clap::Parser;
use rn_api::{render, ErrorBody};

use crate::app::App;
use crate::cli::Cli;
use crate::config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut settings = Settings::load()?;
    if let Some(store) = cli.store {
        settings.store = store;
    }
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(settings.log_level.as_str()));

    let app = App::build(&settings).await?;
    match app.run(cli.command).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(err) => {
            log::debug!("command failed: {err:?}");
            eprintln!("{}", render(&ErrorBody::from(&err))?);
            std::process::exit(1);
        }
    }
}
