//! Storage key namespace.
//!
//! Every record lives under a key prefixed by the owner's nickname:
//!
//! - `<user>_tags`
//! - `<user>_todos_<tag>`
//! - `<user>_weekly_<year>_<MM>`

use chrono::{Datelike, NaiveDate};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Tags { user: String },
    Todos { user: String, tag: String },
    /// `month` is the 1-based calendar month.
    Weekly { user: String, year: i32, month: u32 },
}

impl StorageKey {
    pub fn tags(user: &str) -> Self {
        StorageKey::Tags { user: user.to_string() }
    }

    pub fn todos(user: &str, tag: &str) -> Self {
        StorageKey::Todos {
            user: user.to_string(),
            tag: tag.to_string(),
        }
    }

    pub fn weekly(user: &str, year: i32, month: u32) -> Self {
        StorageKey::Weekly {
            user: user.to_string(),
            year,
            month,
        }
    }

    /// Weekly bucket holding `date`.
    pub fn weekly_for(user: &str, date: NaiveDate) -> Self {
        Self::weekly(user, date.year(), date.month())
    }

    pub fn user(&self) -> &str {
        match self {
            StorageKey::Tags { user }
            | StorageKey::Todos { user, .. }
            | StorageKey::Weekly { user, .. } => user,
        }
    }

    /// Recognize a raw key owned by `user`.
    ///
    /// The todo tag is whatever follows `_todos_`, so tags containing
    /// underscores round-trip.
    pub fn parse(user: &str, raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix(&user_prefix(user))?;

        if rest == "tags" {
            return Some(Self::tags(user));
        }

        if let Some(tag) = rest.strip_prefix("todos_") {
            return Some(Self::todos(user, tag));
        }

        let bucket = rest.strip_prefix("weekly_")?;
        let (year, month) = bucket.split_once('_')?;
        if month.len() != 2 {
            return None;
        }
        let year = year.parse::<i32>().ok()?;
        let month = month.parse::<u32>().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self::weekly(user, year, month))
    }

    /// `YYYY-MM` id of a weekly bucket, as used in export documents.
    pub fn bucket_id(&self) -> Option<String> {
        match self {
            StorageKey::Weekly { year, month, .. } => Some(format!("{year:04}-{month:02}")),
            _ => None,
        }
    }

    /// Inverse of [`StorageKey::bucket_id`].
    pub fn from_bucket_id(user: &str, id: &str) -> Option<Self> {
        let (year, month) = id.split_once('-')?;
        let year = year.parse::<i32>().ok()?;
        let month = month.parse::<u32>().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self::weekly(user, year, month))
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKey::Tags { user } => write!(f, "{user}_tags"),
            StorageKey::Todos { user, tag } => write!(f, "{user}_todos_{tag}"),
            StorageKey::Weekly { user, year, month } => {
                write!(f, "{user}_weekly_{year}_{month:02}")
            }
        }
    }
}

pub fn tags_key(user: &str) -> String {
    StorageKey::tags(user).to_string()
}

pub fn todos_key(user: &str, tag: &str) -> String {
    StorageKey::todos(user, tag).to_string()
}

pub fn weekly_key(user: &str, year: i32, month: u32) -> String {
    StorageKey::weekly(user, year, month).to_string()
}

/// Prefix shared by every key of `user`.
pub fn user_prefix(user: &str) -> String {
    format!("{user}_")
}

pub fn weekly_prefix(user: &str) -> String {
    format!("{user}_weekly_")
}
