use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::TagDirectory;
use crate::db::{log, session};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

use super::open_store;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut store = open_store(cfg)?;

    match &cli.command {
        Commands::Login { nickname } => {
            let nick = session::login(store.conn(), nickname)?;

            // First login creates the tag directory
            let active = {
                let dir = TagDirectory::load_with_default(&mut store, &nick, None, &cfg.default_tag)?;
                dir.active().map(str::to_string)
            };
            session::set_active_tag(store.conn(), active.as_deref())?;

            success(format!("Logged in as '{}'", nick));
            log::ttlog_soft(store.conn(), "login", &nick, "Session started");
        }
        Commands::Logout => {
            let current = session::current(store.conn())?;
            session::logout(store.conn())?;
            match current.nickname {
                Some(nick) => {
                    success(format!("Logged out '{}'", nick));
                    log::ttlog_soft(store.conn(), "logout", &nick, "Session closed");
                }
                None => info("No active session."),
            }
        }
        Commands::Whoami => {
            let current = session::current(store.conn())?;
            match current.nickname {
                Some(nick) => {
                    println!("{}", nick);
                    if let Some(tag) = current.active_tag {
                        info(format!("Active tag: {}", tag));
                    }
                }
                None => info("No active session."),
            }
        }
        _ => {}
    }

    Ok(())
}
