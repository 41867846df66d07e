use crate::cli::parser::{Cli, Commands, TodoAction};
use crate::config::Config;
use crate::core::TodoList;
use crate::db::log;
use crate::errors::{AppError, AppResult};
use crate::models::{Partition, Todo};
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::{color_for_completed, paint};
use crate::utils::formatting::{checkbox, truncate};
use crate::utils::table::{Column, Table};

use super::{ask_confirmation, join_words, open_store, resolve_tag, resolve_user};

const MAX_TEXT_WIDTH: usize = 60;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Todo { tag, action } = &cli.command else {
        return Ok(());
    };

    let mut store = open_store(cfg)?;
    let scope = resolve_user(cli, &store)?;
    let tag = resolve_tag(&mut store, cfg, &scope, tag.as_deref())?;

    let logged: Option<(&str, String)> = {
        let mut list = TodoList::load(&mut store, &scope.nickname, &tag)?;

        match action {
            TodoAction::List => {
                print_list(&tag, &list);
                None
            }
            TodoAction::Add { text } => {
                let todo = list.add(&join_words(text))?;
                success(format!("Added to '{}': {}", tag, todo.text));
                Some(("todo_add", todo.id))
            }
            TodoAction::Del { reference } => {
                let target = list.resolve_ref(reference)?;
                let removed = list.delete(&target.id)?;
                success(format!("Deleted: {}", removed.text));
                Some(("todo_del", removed.id))
            }
            TodoAction::Toggle { reference, yes } => {
                let target = list.resolve_ref(reference)?;
                let pending = list.propose_toggle(&target.id)?;

                let accept = *yes
                    || !cfg.confirm_toggle
                    || ask_confirmation(&format!(
                        "Move '{}' to {}?",
                        pending.todo().text,
                        pending.destination().as_str()
                    ));

                match list.resolve(pending, accept)? {
                    Some(toggled) => {
                        success(format!(
                            "Moved to {}: {}",
                            Partition::of(toggled.completed).as_str(),
                            toggled.text
                        ));
                        Some(("todo_toggle", toggled.id))
                    }
                    None => {
                        info("Operation cancelled.");
                        None
                    }
                }
            }
            TodoAction::Edit { reference, text } => {
                let target = list.resolve_ref(reference)?;
                let edited = list.edit(&target.id, &join_words(text))?;
                success(format!("Updated: {}", edited.text));
                Some(("todo_edit", edited.id))
            }
            TodoAction::Move {
                partition,
                from,
                to,
                into,
            } => {
                let destination = into.unwrap_or(*partition);
                let len = list.partition(*partition).len();
                let moved = list
                    .reorder(
                        *partition,
                        to_index(*from, len)?,
                        destination,
                        to_index(*to, len)?,
                    )
                    .map_err(|e| match e {
                        AppError::InvalidIndex { index, len } => AppError::InvalidIndex {
                            index: index + 1,
                            len,
                        },
                        other => other,
                    })?;
                if moved {
                    success(format!(
                        "Moved {} #{} to position {}",
                        partition.as_str(),
                        from,
                        to
                    ));
                    Some(("todo_move", format!("{}:{}->{}", partition.as_str(), from, to)))
                } else {
                    warning("Todos can only be reordered inside the same list; nothing changed.");
                    None
                }
            }
        }
    };

    if let Some((op, target)) = logged {
        log::ttlog_soft(
            store.conn(),
            op,
            &target,
            &format!("{} on {}/{}", op, scope.nickname, tag),
        );
    }

    Ok(())
}

/// 1-based position from the command line to a list index.
fn to_index(position: usize, len: usize) -> AppResult<usize> {
    position
        .checked_sub(1)
        .ok_or(AppError::InvalidIndex { index: position, len })
}

fn section(title: &str, todos: &[Todo], first_row: usize) {
    println!("{} ({})", title, todos.len());
    if todos.is_empty() {
        println!("  -");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("#"),
        Column::new(""),
        Column::new("Task"),
        Column::new("Id"),
    ]);
    for (i, t) in todos.iter().enumerate() {
        table.add_row(vec![
            (first_row + i).to_string(),
            checkbox(t.completed).to_string(),
            truncate(&t.text, MAX_TEXT_WIDTH),
            t.id.clone(),
        ]);
    }

    for (i, line) in table.render().lines().enumerate() {
        // Header line has no todo behind it
        let color = match i.checked_sub(1).and_then(|row| todos.get(row)) {
            Some(t) => color_for_completed(t.completed),
            None => "",
        };
        if color.is_empty() {
            println!("  {}", line);
        } else {
            println!("  {}", paint(line, color));
        }
    }
}

fn print_list(tag: &str, list: &TodoList<'_>) {
    header(tag);
    section("Active", list.active(), 1);
    section("Done", list.done(), list.active().len() + 1);
}
