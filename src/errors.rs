//! Unified application error type.
//! All modules (store, core, db, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / encoding
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Malformed record under '{key}': {reason}")]
    MalformedRecord { key: String, reason: String },

    // ---------------------------
    // Input errors
    // ---------------------------
    #[error("Empty {0} ignored")]
    BlankInput(&'static str),

    #[error("Tag already exists: {0}")]
    DuplicateTag(String),

    #[error("Unknown tag: {0}")]
    UnknownTag(String),

    #[error("Unknown todo: {0}")]
    UnknownTodo(String),

    #[error("Index {index} out of range (list has {len} items)")]
    InvalidIndex { index: usize, len: usize },

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("No active nickname. Run `rmemo login <NICK>` or pass --user")]
    NoSession,

    // ---------------------------
    // Import / export
    // ---------------------------
    #[error("Invalid import file: {0}")]
    MalformedImportFile(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// True for input the CLI silently drops instead of reporting.
    pub fn is_blank_input(&self) -> bool {
        matches!(self, AppError::BlankInput(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
