//! In-memory store, used by tests and dry runs.

use super::LocalStore;
use crate::errors::{AppError, AppResult};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with `StorageUnavailable`.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of every entry, for before/after comparisons.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries.clone()
    }

    fn check_writable(&self) -> AppResult<()> {
        if self.fail_writes {
            return Err(AppError::StorageUnavailable(
                "memory store is read-only".into(),
            ));
        }
        Ok(())
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.check_writable()?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        self.check_writable()?;
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn apply(&mut self, ops: Vec<super::StoreOp>) -> AppResult<()> {
        // Checked up front so a failing batch leaves nothing behind
        self.check_writable()?;
        for op in ops {
            match op {
                super::StoreOp::Set { key, value } => {
                    self.entries.insert(key, value);
                }
                super::StoreOp::Remove { key } => {
                    self.entries.remove(&key);
                }
            }
        }
        Ok(())
    }
}
