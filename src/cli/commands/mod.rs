//! One handler per subcommand, plus the helpers they share.

pub mod config;
pub mod export;
pub mod import;
pub mod init;
pub mod log;
pub mod session;
pub mod tag;
pub mod todo;
pub mod week;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::TagDirectory;
use crate::db::session as db_session;
use crate::errors::{AppError, AppResult};
use crate::store::SqliteStore;
use crate::ui::messages::warning;
use std::io::{self, Write};

/// Nickname a command acts for.
pub(crate) struct UserScope {
    pub nickname: String,
    /// Tag selected in the session, only kept when `nickname` is the session user.
    pub active_tag: Option<String>,
    /// `nickname` is the logged-in user, so selection changes are saved.
    pub owns_session: bool,
}

pub(crate) fn open_store(cfg: &Config) -> AppResult<SqliteStore> {
    SqliteStore::open(&cfg.database)
}

/// Trimmed `--user` value; a blank one is rejected.
pub(crate) fn user_override(cli: &Cli) -> AppResult<Option<String>> {
    match &cli.user {
        Some(u) if u.trim().is_empty() => Err(AppError::BlankInput("nickname")),
        Some(u) => Ok(Some(u.trim().to_string())),
        None => Ok(None),
    }
}

/// `--user` if given, else the logged-in nickname.
pub(crate) fn resolve_user(cli: &Cli, store: &SqliteStore) -> AppResult<UserScope> {
    let session = db_session::current(store.conn())?;

    let nickname = match user_override(cli)? {
        Some(u) => u,
        None => session.nickname.clone().ok_or(AppError::NoSession)?,
    };

    let owns_session = session.nickname.as_deref() == Some(nickname.as_str());
    Ok(UserScope {
        active_tag: if owns_session { session.active_tag } else { None },
        nickname,
        owns_session,
    })
}

/// Tag a todo command works on: `--tag`, the session tag, or the first tag.
pub(crate) fn resolve_tag(
    store: &mut SqliteStore,
    cfg: &Config,
    scope: &UserScope,
    explicit: Option<&str>,
) -> AppResult<String> {
    let dir = TagDirectory::load_with_default(
        store,
        &scope.nickname,
        scope.active_tag.as_deref(),
        &cfg.default_tag,
    )?;

    match explicit {
        Some(t) if dir.contains(t) => Ok(t.to_string()),
        Some(t) => Err(AppError::UnknownTag(t.to_string())),
        None => dir
            .active()
            .map(str::to_string)
            .ok_or_else(|| AppError::UnknownTag("(none)".into())),
    }
}

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub(crate) fn join_words(words: &[String]) -> String {
    words.join(" ")
}
