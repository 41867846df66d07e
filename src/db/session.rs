//! Active session: who is logged in and which tag is selected.

use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, params};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub nickname: Option<String>,
    pub active_tag: Option<String>,
}

pub fn current(conn: &Connection) -> AppResult<Session> {
    let row = conn
        .query_row(
            "SELECT nickname, active_tag FROM session WHERE id = 1",
            [],
            |row| {
                Ok(Session {
                    nickname: row.get(0)?,
                    active_tag: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(row.unwrap_or_default())
}

/// Store `nickname` as the active user and reset the tag selection.
/// Returns the trimmed nickname.
pub fn login(conn: &Connection, nickname: &str) -> AppResult<String> {
    let nick = nickname.trim();
    if nick.is_empty() {
        return Err(AppError::BlankInput("nickname"));
    }

    conn.execute(
        "INSERT INTO session (id, nickname, active_tag) VALUES (1, ?1, NULL)
         ON CONFLICT(id) DO UPDATE SET nickname = excluded.nickname, active_tag = NULL",
        [nick],
    )?;
    Ok(nick.to_string())
}

pub fn logout(conn: &Connection) -> AppResult<()> {
    conn.execute("DELETE FROM session WHERE id = 1", [])?;
    Ok(())
}

pub fn set_active_tag(conn: &Connection, tag: Option<&str>) -> AppResult<()> {
    conn.execute(
        "INSERT INTO session (id, nickname, active_tag) VALUES (1, NULL, ?1)
         ON CONFLICT(id) DO UPDATE SET active_tag = excluded.active_tag",
        params![tag],
    )?;
    Ok(())
}
