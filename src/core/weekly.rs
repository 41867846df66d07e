//! Weekly notes planner.
//!
//! One [`WeekEntry`] per Monday–Sunday week, labelled
//! `"<startDD.MM>-<endDD.MM> (<year>)"`. Entries are grouped into month
//! buckets (`<user>_weekly_<year>_<MM>`); each label lives in the bucket of
//! its own Monday.

use crate::errors::{AppError, AppResult};
use crate::keys::{StorageKey, weekly_prefix};
use crate::models::WeekEntry;
use crate::store::{LocalStore, StoreOp, read_json};
use crate::ui::messages::warning;
use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,2})\.(\d{1,2})-.*\((\d{4})\)\s*$").expect("valid week label regex")
});

pub const DEFAULT_SUMMARY_PREFIX: &str = "#summary";

/// Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().number_from_monday() - 1;
    date - Duration::days(offset as i64)
}

/// Canonical label of the week holding `date`.
///
/// The year is the calendar year of `date` itself, even when the week
/// straddles New Year.
pub fn week_range(date: NaiveDate) -> String {
    let start = week_start(date);
    let end = start + Duration::days(6);
    format!(
        "{}-{} ({})",
        start.format("%d.%m"),
        end.format("%d.%m"),
        date.year()
    )
}

/// Start date encoded in a label, `None` when the label is malformed.
pub fn parse_week_start(label: &str) -> Option<NaiveDate> {
    let caps = LABEL_RE.captures(label)?;
    let day = caps[1].parse::<u32>().ok()?;
    let month = caps[2].parse::<u32>().ok()?;
    let year = caps[3].parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Sort key used for history: malformed labels count as the Unix epoch.
fn sort_key(entry: &WeekEntry) -> NaiveDate {
    parse_week_start(&entry.week_range).unwrap_or_default()
}

fn read_bucket(store: &dyn LocalStore, key: &str) -> AppResult<Vec<WeekEntry>> {
    Ok(read_json(store, key)?.unwrap_or_default())
}

/// Weekly bucket keys of `user`.
///
/// Keys of other nicknames that merely share the prefix are left out.
fn bucket_keys(store: &dyn LocalStore, user: &str) -> AppResult<Vec<String>> {
    Ok(store
        .keys_with_prefix(&weekly_prefix(user))?
        .into_iter()
        .filter(|k| matches!(StorageKey::parse(user, k), Some(StorageKey::Weekly { .. })))
        .collect())
}

/// Decoded bucket, `None` (with a warning) when it cannot be decoded.
fn read_bucket_lenient(store: &dyn LocalStore, key: &str) -> AppResult<Option<Vec<WeekEntry>>> {
    match read_bucket(store, key) {
        Ok(entries) => Ok(Some(entries)),
        Err(e @ AppError::MalformedRecord { .. }) => {
            warning(format!("{e}; bucket skipped"));
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Every stored week of `user`, newest first.
///
/// Undecodable buckets are skipped with a warning.
pub fn load_all(store: &dyn LocalStore, user: &str) -> AppResult<Vec<WeekEntry>> {
    let mut all = Vec::new();

    for key in bucket_keys(store, user)? {
        if let Some(entries) = read_bucket_lenient(store, &key)? {
            all.extend(entries);
        }
    }

    all.sort_by_key(|e| std::cmp::Reverse(sort_key(e)));
    Ok(all)
}

/// Stored entry for the week of `today`, or an empty one.
pub fn current(store: &dyn LocalStore, user: &str, today: NaiveDate) -> AppResult<WeekEntry> {
    let label = week_range(today);
    Ok(load_all(store, user)?
        .into_iter()
        .find(|w| w.week_range == label)
        .unwrap_or_else(|| WeekEntry::empty(label)))
}

/// Replace the notes of the week of `today`.
///
/// The entry is written into the bucket of the week's Monday. Copies of the
/// same label left in other buckets are dropped; buckets holding only other
/// weeks, and undecodable ones, are not touched.
pub fn save(
    store: &mut dyn LocalStore,
    user: &str,
    today: NaiveDate,
    notes: &str,
) -> AppResult<WeekEntry> {
    let label = week_range(today);
    let target = StorageKey::weekly_for(user, week_start(today)).to_string();

    let mut ops = Vec::new();
    for key in bucket_keys(&*store, user)? {
        if key == target {
            continue;
        }
        let Some(entries) = read_bucket_lenient(&*store, &key)? else {
            continue;
        };
        if !entries.iter().any(|w| w.week_range == label) {
            continue;
        }

        let kept: Vec<WeekEntry> = entries.into_iter().filter(|w| w.week_range != label).collect();
        if kept.is_empty() {
            ops.push(StoreOp::remove(key));
        } else {
            ops.push(StoreOp::set_json(key, &kept)?);
        }
    }

    let mut bucket = read_bucket(&*store, &target)?;
    let entry = WeekEntry::new(label.clone(), notes);
    match bucket.iter_mut().find(|w| w.week_range == label) {
        Some(existing) => existing.notes = notes.to_string(),
        None => bucket.push(entry.clone()),
    }
    ops.push(StoreOp::set_json(target, &bucket)?);

    store.apply(ops)?;
    Ok(entry)
}

/// Append `text` as a new line of the current week's notes.
pub fn append(
    store: &mut dyn LocalStore,
    user: &str,
    today: NaiveDate,
    text: &str,
) -> AppResult<WeekEntry> {
    let text = text.trim_end();
    if text.trim().is_empty() {
        return Err(AppError::BlankInput("note"));
    }

    let existing = current(&*store, user, today)?;
    let notes = if existing.notes.is_empty() {
        text.to_string()
    } else if existing.notes.ends_with('\n') {
        format!("{}{}", existing.notes, text)
    } else {
        format!("{}\n{}", existing.notes, text)
    };

    save(store, user, today, &notes)
}

/// Past and future weeks other than the current one, newest first.
pub fn history(store: &dyn LocalStore, user: &str, today: NaiveDate) -> AppResult<Vec<WeekEntry>> {
    let label = week_range(today);
    Ok(load_all(store, user)?
        .into_iter()
        .filter(|w| w.week_range != label)
        .collect())
}

/// Shareable text block for a week: `"<prefix> #<label>\n<notes>"`.
pub fn summary(entry: &WeekEntry, prefix: &str) -> String {
    format!("{} #{}\n{}", prefix, entry.week_range, entry.notes)
}
