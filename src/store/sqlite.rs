//! SQLite-backed store: one `kv` table, values kept as raw strings.

use super::{LocalStore, StoreOp};
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, params};

fn unavailable(e: rusqlite::Error) -> AppError {
    AppError::StorageUnavailable(e.to_string())
}

pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Open the database at `path` and make sure the schema is current.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    /// Wrap an already migrated pool.
    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }
}

impl LocalStore for SqliteStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.pool
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .map_err(unavailable)
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.pool
            .conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(unavailable)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        self.pool
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", [key])
            .map_err(unavailable)?;
        Ok(())
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        let mut stmt = self
            .pool
            .conn
            .prepare_cached("SELECT key FROM kv ORDER BY key ASC")
            .map_err(unavailable)?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(unavailable)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(unavailable)?);
        }
        Ok(out)
    }

    fn apply(&mut self, ops: Vec<StoreOp>) -> AppResult<()> {
        self.pool
            .with_conn(|conn| {
                let tx = conn.transaction()?;
                for op in &ops {
                    match op {
                        StoreOp::Set { key, value } => {
                            tx.execute(
                                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                                params![key, value],
                            )?;
                        }
                        StoreOp::Remove { key } => {
                            tx.execute("DELETE FROM kv WHERE key = ?1", [key])?;
                        }
                    }
                }
                tx.commit()
            })
            .map_err(unavailable)
    }
}
