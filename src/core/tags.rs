//! Ordered tag directory of one user.

use crate::errors::{AppError, AppResult};
use crate::keys::{tags_key, todos_key};
use crate::store::{LocalStore, StoreOp, read_json, write_json};

pub const DEFAULT_TAG: &str = "default";

pub struct TagDirectory<'a> {
    store: &'a mut dyn LocalStore,
    user: String,
    tags: Vec<String>,
    active: Option<String>,
}

impl<'a> TagDirectory<'a> {
    pub fn load(
        store: &'a mut dyn LocalStore,
        user: &str,
        active_hint: Option<&str>,
    ) -> AppResult<Self> {
        Self::load_with_default(store, user, active_hint, DEFAULT_TAG)
    }

    /// Load the directory, creating `[default_tag]` on first use.
    ///
    /// The active tag is `active_hint` when it is still listed, otherwise the
    /// first tag.
    pub fn load_with_default(
        store: &'a mut dyn LocalStore,
        user: &str,
        active_hint: Option<&str>,
        default_tag: &str,
    ) -> AppResult<Self> {
        let key = tags_key(user);
        let tags: Vec<String> = match read_json(&*store, &key)? {
            Some(tags) => tags,
            None => {
                let initial = vec![default_tag.to_string()];
                write_json(&mut *store, &key, &initial)?;
                initial
            }
        };

        let active = match active_hint {
            Some(hint) if tags.iter().any(|t| t == hint) => Some(hint.to_string()),
            _ => tags.first().cloned(),
        };

        Ok(Self {
            store,
            user: user.to_string(),
            tags,
            active,
        })
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t == name)
    }

    /// Append a new tag, create its empty list and select it.
    pub fn add_tag(&mut self, name: &str) -> AppResult<String> {
        let cleaned = name.trim();
        if cleaned.is_empty() {
            return Err(AppError::BlankInput("tag name"));
        }
        if self.contains(cleaned) {
            return Err(AppError::DuplicateTag(cleaned.to_string()));
        }

        let mut new_tags = self.tags.clone();
        new_tags.push(cleaned.to_string());

        let empty: Vec<crate::models::Todo> = Vec::new();
        self.store.apply(vec![
            StoreOp::set_json(tags_key(&self.user), &new_tags)?,
            StoreOp::set_json(todos_key(&self.user, cleaned), &empty)?,
        ])?;

        self.tags = new_tags;
        self.active = Some(cleaned.to_string());
        Ok(cleaned.to_string())
    }

    /// Persist `new_tags` verbatim, fixing up the active selection.
    pub fn save(&mut self, new_tags: Vec<String>) -> AppResult<()> {
        write_json(&mut *self.store, &tags_key(&self.user), &new_tags)?;
        self.replace_tags(new_tags);
        Ok(())
    }

    fn replace_tags(&mut self, new_tags: Vec<String>) {
        let still_listed = self
            .active
            .as_ref()
            .is_some_and(|a| new_tags.iter().any(|t| t == a));
        if !still_listed {
            self.active = new_tags.first().cloned();
        }

        self.tags = new_tags;
    }

    /// Drop a tag and its todo list in one batch.
    pub fn remove_tag(&mut self, name: &str) -> AppResult<()> {
        if !self.contains(name) {
            return Err(AppError::UnknownTag(name.to_string()));
        }

        let remaining: Vec<String> = self.tags.iter().filter(|t| *t != name).cloned().collect();
        self.store.apply(vec![
            StoreOp::set_json(tags_key(&self.user), &remaining)?,
            StoreOp::remove(todos_key(&self.user, name)),
        ])?;
        self.replace_tags(remaining);
        Ok(())
    }

    pub fn select(&mut self, name: &str) -> AppResult<()> {
        if !self.contains(name) {
            return Err(AppError::UnknownTag(name.to_string()));
        }
        self.active = Some(name.to_string());
        Ok(())
    }
}
