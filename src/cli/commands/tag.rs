use crate::cli::parser::{Cli, Commands, TagAction};
use crate::config::Config;
use crate::core::TagDirectory;
use crate::db::{log, session};
use crate::errors::AppResult;
use crate::store::SqliteStore;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{CYAN, paint};

use super::{UserScope, ask_confirmation, open_store, resolve_user};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Tag { action } = &cli.command else {
        return Ok(());
    };

    let mut store = open_store(cfg)?;
    let scope = resolve_user(cli, &store)?;

    let active = {
        let mut dir = TagDirectory::load_with_default(
            &mut store,
            &scope.nickname,
            scope.active_tag.as_deref(),
            &cfg.default_tag,
        )?;

        match action {
            TagAction::List => {
                header(format!("Tags of {}", scope.nickname));
                for tag in dir.tags() {
                    if Some(tag.as_str()) == dir.active() {
                        println!("* {}", paint(tag, CYAN));
                    } else {
                        println!("  {}", tag);
                    }
                }
                if dir.tags().is_empty() {
                    info("No tags. Create one with `rmemo tag add <NAME>`.");
                }
            }
            TagAction::Add { name } => {
                let added = dir.add_tag(name)?;
                success(format!("Tag '{}' created", added));
            }
            TagAction::Use { name } => {
                dir.select(name)?;
                success(format!("Active tag: {}", name));
            }
            TagAction::Remove { name, yes } => {
                let prompt = format!(
                    "Delete tag '{}' and all of its todos? This action is irreversible.",
                    name
                );
                if !*yes && !ask_confirmation(&prompt) {
                    info("Operation cancelled.");
                    return Ok(());
                }
                dir.remove_tag(name)?;
                success(format!("Tag '{}' removed", name));
            }
        }

        dir.active().map(str::to_string)
    };

    remember_active_tag(&store, &scope, active.as_deref())?;

    let (op, target) = match action {
        TagAction::List => return Ok(()),
        TagAction::Add { name } => ("tag_add", name),
        TagAction::Use { name } => ("tag_use", name),
        TagAction::Remove { name, .. } => ("tag_remove", name),
    };
    log::ttlog_soft(
        store.conn(),
        op,
        target,
        &format!("{} for {}", op, scope.nickname),
    );

    Ok(())
}

/// Save the selection when acting for the logged-in user.
fn remember_active_tag(store: &SqliteStore, scope: &UserScope, tag: Option<&str>) -> AppResult<()> {
    if scope.owns_session && scope.active_tag.as_deref() != tag {
        session::set_active_tag(store.conn(), tag)?;
    }
    Ok(())
}
