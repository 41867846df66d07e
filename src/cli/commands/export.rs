use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::transfer;
use crate::db::log;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::fs::ensure_writable;
use crate::utils::path::expand_tilde;
use std::fs;

use super::{open_store, resolve_user};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Export {
        file,
        force,
        legacy,
    } = &cli.command
    else {
        return Ok(());
    };

    let path = expand_tilde(file);
    if !path.is_absolute() {
        return Err(AppError::Export(format!(
            "Output file path must be absolute: {file}"
        )));
    }

    let store = open_store(cfg)?;
    let scope = resolve_user(cli, &store)?;

    ensure_writable(&path, *force)?;

    let json = if *legacy {
        transfer::to_pretty_json(&transfer::export_legacy(&store, &scope.nickname)?)?
    } else {
        transfer::to_pretty_json(&transfer::export(&store, &scope.nickname)?)?
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, json)?;

    let shape = if *legacy { "legacy" } else { "structured" };
    success(format!(
        "Export of '{}' completed ({}): {}",
        scope.nickname,
        shape,
        path.display()
    ));
    log::ttlog_soft(
        store.conn(),
        "export",
        &path.to_string_lossy(),
        &format!("{} export of {}", shape, scope.nickname),
    );

    Ok(())
}
