use crate::cli::parser::{Cli, Commands, WeekAction};
use crate::config::Config;
use crate::core::weekly;
use crate::db::log;
use crate::errors::AppResult;
use crate::models::WeekEntry;
use crate::ui::messages::{header, info, success};
use crate::utils::date::resolve_date;
use std::io::{self, Read};

use super::{join_words, open_store, resolve_user};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Week { date, action } = &cli.command else {
        return Ok(());
    };

    let today = resolve_date(date.as_deref())?;
    let mut store = open_store(cfg)?;
    let scope = resolve_user(cli, &store)?;
    let user = scope.nickname.as_str();

    let saved = match action {
        None | Some(WeekAction::Show) => {
            print_week(&weekly::current(&store, user, today)?, true);
            None
        }
        Some(WeekAction::Set { text, stdin }) => {
            let notes = if *stdin {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                join_words(text)
            };
            let entry = weekly::save(&mut store, user, today, &notes)?;
            success(format!("Notes saved for {}", entry.week_range));
            Some(entry)
        }
        Some(WeekAction::Append { text }) => {
            let entry = weekly::append(&mut store, user, today, &join_words(text))?;
            success(format!("Note added to {}", entry.week_range));
            Some(entry)
        }
        Some(WeekAction::History) => {
            let weeks = weekly::history(&store, user, today)?;
            if weeks.is_empty() {
                info("No other weeks yet.");
            }
            for w in &weeks {
                print_week(w, false);
            }
            None
        }
        Some(WeekAction::Summary) => {
            let entry = weekly::current(&store, user, today)?;
            println!("{}", weekly::summary(&entry, &cfg.summary_prefix));
            None
        }
    };

    if let Some(entry) = saved {
        log::ttlog_soft(
            store.conn(),
            "week_save",
            &entry.week_range,
            &format!("Weekly notes saved for {}", user),
        );
    }

    Ok(())
}

fn print_week(entry: &WeekEntry, current: bool) {
    if current {
        header(format!("{} (this week)", entry.week_range));
    } else {
        header(&entry.week_range);
    }

    if entry.notes.trim().is_empty() {
        println!("  (no notes)");
    } else {
        println!("{}", textwrap::indent(entry.notes.trim_end(), "  "));
    }
    println!();
}
