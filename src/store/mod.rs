//! Local key-value store adapter.
//!
//! Records are JSON-encoded strings under flat keys (see [`crate::keys`]).
//! The models only talk to the [`LocalStore`] trait, so the SQLite backend
//! used by the CLI and the in-memory one used by tests are interchangeable.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::errors::{AppError, AppResult};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// One write of a batch passed to [`LocalStore::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Set { key: String, value: String },
    Remove { key: String },
}

impl StoreOp {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        StoreOp::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn remove(key: impl Into<String>) -> Self {
        StoreOp::Remove { key: key.into() }
    }

    /// Serialize `value` into a `Set` op.
    pub fn set_json<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> AppResult<Self> {
        Ok(Self::set(key, serde_json::to_string(value)?))
    }
}

pub trait LocalStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;

    fn remove(&mut self, key: &str) -> AppResult<()>;

    /// All stored keys, ascending.
    fn keys(&self) -> AppResult<Vec<String>>;

    /// Apply a batch of writes. Backends with transactions apply it
    /// all-or-nothing.
    fn apply(&mut self, ops: Vec<StoreOp>) -> AppResult<()> {
        for op in ops {
            match op {
                StoreOp::Set { key, value } => self.set(&key, &value)?,
                StoreOp::Remove { key } => self.remove(&key)?,
            }
        }
        Ok(())
    }

    /// Keys starting with `prefix`, ascending.
    fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>> {
        Ok(self
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(prefix))
            .collect())
    }
}

/// Read and decode the record under `key`.
///
/// A missing key is `Ok(None)`; an undecodable one is
/// [`AppError::MalformedRecord`].
pub fn read_json<T, S>(store: &S, key: &str) -> AppResult<Option<T>>
where
    T: DeserializeOwned,
    S: LocalStore + ?Sized,
{
    match store.get(key)? {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| AppError::MalformedRecord {
                key: key.to_string(),
                reason: e.to_string(),
            }),
    }
}

pub fn write_json<T, S>(store: &mut S, key: &str, value: &T) -> AppResult<()>
where
    T: Serialize + ?Sized,
    S: LocalStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
