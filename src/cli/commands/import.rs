use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::transfer::{self, ImportShape};
use crate::db::{log, session};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::path::expand_tilde;
use std::fs;

use super::{open_store, user_override};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Import { file, as_current } = &cli.command else {
        return Ok(());
    };

    let path = expand_tilde(file);
    let raw = fs::read_to_string(&path)
        .map_err(|e| AppError::MalformedImportFile(format!("cannot read {}: {}", path.display(), e)))?;

    let mut store = open_store(cfg)?;
    let current = match user_override(cli)? {
        Some(u) => Some(u),
        None => session::current(store.conn())?.nickname,
    };

    let outcome = transfer::import(&mut store, &raw, current.as_deref(), *as_current)?;

    let shape = match outcome.shape {
        ImportShape::Structured => "structured",
        ImportShape::LegacyFlat => "legacy",
    };
    success(format!(
        "Import completed into '{}' ({} file, {} keys written)",
        outcome.target, shape, outcome.keys_written
    ));
    if outcome.redirected {
        info(format!(
            "The file belongs to '{}', not to the active nickname. Run `rmemo login {}` to see it.",
            outcome.target, outcome.target
        ));
    }

    log::ttlog_soft(
        store.conn(),
        "import",
        &outcome.target,
        &format!("{} import from {}", shape, path.display()),
    );

    Ok(())
}
