//! Database schema migration management and versioning.
//!
//! Every schema change is a numbered migration recorded in the `migrations`
//! table. Pending migrations are applied in version order inside a single
//! transaction when the server starts.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tickoff::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("tickoff.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error, msg_error_anyhow, msg_info, msg_success};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// Tracks which migrations have been applied and when.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// A single schema change.
#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

/// One applied migration as recorded in the tracking table.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedMigration {
    pub version: u32,
    pub name: String,
    pub applied_at: String,
}

/// Registry of all migrations, in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: categories, unique by name
        self.add_migration(1, "create_categories", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS categories (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL UNIQUE,
                    color TEXT NOT NULL DEFAULT '#667eea'
                )",
                [],
            )?;
            Ok(())
        });

        // Version 2: todos; removing a category only detaches its todos
        self.add_migration(2, "create_todos", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS todos (
                    id INTEGER PRIMARY KEY,
                    title TEXT NOT NULL,
                    description TEXT NOT NULL DEFAULT '',
                    completed BOOLEAN NOT NULL DEFAULT FALSE,
                    priority TEXT NOT NULL DEFAULT 'medium',
                    category_id INTEGER REFERENCES categories(id) ON DELETE SET NULL,
                    due_date TIMESTAMP,
                    notes TEXT NOT NULL DEFAULT '',
                    created_at TIMESTAMP NOT NULL,
                    updated_at TIMESTAMP NOT NULL
                )",
                [],
            )?;
            Ok(())
        });

        // Version 3: subtasks, removed together with their todo
        self.add_migration(3, "create_subtasks", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS subtasks (
                    id INTEGER PRIMARY KEY,
                    todo_id INTEGER NOT NULL REFERENCES todos(id) ON DELETE CASCADE,
                    title TEXT NOT NULL,
                    completed BOOLEAN NOT NULL DEFAULT FALSE,
                    \"order\" INTEGER NOT NULL DEFAULT 0,
                    created_at TIMESTAMP NOT NULL
                )",
                [],
            )?;
            Ok(())
        });

        // Version 4: indices for the listing filters and subtask lookups
        self.add_migration(4, "add_listing_indices", |tx| {
            tx.execute("CREATE INDEX IF NOT EXISTS idx_todos_created_at ON todos(created_at)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_todos_category_id ON todos(category_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_todos_priority ON todos(priority)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_subtasks_todo_id ON subtasks(todo_id, \"order\")", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every migration newer than the recorded schema version.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }

        msg_info!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;

        for migration in pending {
            msg_info!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                    msg_success!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    let message = Message::MigrationFailed(migration.version, e.to_string());
                    msg_error!(message);
                    return Err(msg_error_anyhow!(message));
                }
            }
        }

        tx.commit()?;
        msg_success!(Message::AllMigrationsCompleted);

        Ok(())
    }

    /// Highest applied version, or 0 for a fresh database.
    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        if !Self::has_migrations_table(conn)? {
            return Ok(0);
        }
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))?;

        Ok(version.unwrap_or(0))
    }

    fn has_migrations_table(conn: &Connection) -> Result<bool> {
        let exists = conn
            .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'migrations'")?
            .exists([])?;
        Ok(exists)
    }

    /// Version of the newest registered migration.
    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    /// Whether `version` is recorded in the `migrations` table. A database
    /// without that table has nothing applied.
    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        if !Self::has_migrations_table(conn)? {
            return Ok(false);
        }
        let count: i32 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;

        Ok(count > 0)
    }

    /// Applied migrations ordered by version.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<AppliedMigration>> {
        if !Self::has_migrations_table(conn)? {
            return Ok(Vec::new());
        }
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;
        let history = stmt
            .query_map([], |row| {
                Ok(AppliedMigration {
                    version: row.get(0)?,
                    name: row.get(1)?,
                    applied_at: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Brings the schema up to date.
///
/// # Arguments
///
/// * `conn` - Connection to migrate; pending migrations share one transaction
///
/// # Returns
///
/// `Ok(())` when the schema is current, or the first migration error.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    let manager = MigrationManager::new();
    manager.run_migrations(conn)?;
    Ok(())
}

/// Recorded schema version, 0 for a fresh database.
pub fn get_db_version(conn: &Connection) -> Result<u32> {
    let manager = MigrationManager::new();
    manager.get_current_version(conn)
}

/// True when registered migrations are newer than the recorded version.
pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    let current = manager.get_current_version(conn)?;
    Ok(current < manager.latest_version())
}
