use super::migrations::init_with_migrations;
use crate::libs::error::AppResult;
use crate::libs::messages::Message;
use crate::msg_debug;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// A single SQLite connection. Each request opens its own.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database with foreign key enforcement enabled. No migrations are run.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Db> {
        let conn = Connection::open(path.as_ref())?;
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        Ok(Db { conn })
    }

    /// Opens the database and applies any pending migrations.
    pub fn init(path: impl AsRef<Path>) -> anyhow::Result<Db> {
        let mut db = Self::open(path.as_ref())?;
        msg_debug!(Message::DatabaseOpened(path.as_ref().display().to_string()));
        init_with_migrations(&mut db.conn)?;
        Ok(db)
    }
}
