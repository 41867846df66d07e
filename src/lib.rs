//! rMemo library root.
//! Exposes the CLI parser, the high-level run() function, the storage layer
//! and the todo / tag / weekly-notes models.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod keys;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use ui::messages::info;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(cli, cfg),
        Commands::Login { .. } | Commands::Logout | Commands::Whoami => {
            cli::commands::session::handle(cli, cfg)
        }
        Commands::Tag { .. } => cli::commands::tag::handle(cli, cfg),
        Commands::Todo { .. } => cli::commands::todo::handle(cli, cfg),
        Commands::Week { .. } => cli::commands::week::handle(cli, cfg),
        Commands::Export { .. } => cli::commands::export::handle(cli, cfg),
        Commands::Import { .. } => cli::commands::import::handle(cli, cfg),
        Commands::Log { .. } => cli::commands::log::handle(cli, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    match dispatch(&cli, &cfg) {
        // Blank input is dropped, not reported as a failure
        Err(e) if e.is_blank_input() => {
            info(e);
            Ok(())
        }
        other => other,
    }
}
