use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::log::load_log;
use crate::errors::AppResult;
use crate::ui::messages::info;
use ansi_term::{Colour, Style};
use regex::Regex;
use std::sync::LazyLock;

use super::open_store;

const MAX_OP_WIDTH: usize = 60;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI regex"));

fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// ANSI style for an operation name, plain when `NO_COLOR` is set
fn color_for_operation(op: &str) -> Style {
    if std::env::var_os("NO_COLOR").is_some() {
        return Style::new();
    }

    let colour = match op {
        "todo_add" | "tag_add" | "login" => Colour::Green,
        "todo_del" | "tag_remove" | "logout" => Colour::Red,
        "todo_edit" | "todo_move" | "todo_toggle" | "tag_use" => Colour::Yellow,
        "week_save" => Colour::Cyan,
        "export" | "import" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    };
    colour.normal()
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if !matches!(cli.command, Commands::Log { print: true }) {
        info("Nothing to do. Use `rmemo log --print`.");
        return Ok(());
    }

    let store = open_store(cfg)?;
    let entries = load_log(store.conn())?;

    if entries.is_empty() {
        info("Internal log is empty.");
        return Ok(());
    }

    let id_w = entries
        .iter()
        .map(|e| e.id.to_string().len())
        .max()
        .unwrap_or(1);
    let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

    println!("📜 Internal log:\n");

    for e in &entries {
        let color = color_for_operation(&e.operation);

        let op_target = if e.target.is_empty() {
            color.paint(e.operation.as_str()).to_string()
        } else {
            format!("{} ({})", color.paint(e.operation.as_str()), e.target)
        };

        // Width is measured without escape codes
        let visible = strip_ansi(&op_target);
        let shown = if visible.chars().count() > MAX_OP_WIDTH {
            let cut: String = visible.chars().take(MAX_OP_WIDTH - 3).collect();
            match cut.split_once(' ') {
                Some((op, rest)) => format!("{} {}...", color.paint(op), rest),
                None => format!("{}...", color.paint(cut.as_str())),
            }
        } else {
            op_target
        };

        let padding = " ".repeat(MAX_OP_WIDTH.saturating_sub(strip_ansi(&shown).chars().count()));

        println!(
            "{:>id_w$}: {:<date_w$} | {}{} => {}",
            e.id,
            e.date,
            shown,
            padding,
            e.message,
            id_w = id_w,
            date_w = date_w
        );
    }

    Ok(())
}
