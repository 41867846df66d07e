#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rmemo::db::initialize::init_db;
use rmemo::db::pool::DbPool;
use rmemo::store::SqliteStore;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rmemo() -> Command {
    let mut cmd = cargo_bin_cmd!("rmemo");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rmemo.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rmemo_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize a DB and log in as `nick`
pub fn init_with_user(db_path: &str, nick: &str) {
    rmemo()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rmemo()
        .args(["--db", db_path, "login", nick])
        .assert()
        .success();
}

/// Migrated in-memory SQLite store for library-level tests
pub fn sqlite_memory_store() -> SqliteStore {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    SqliteStore::from_pool(pool)
}
