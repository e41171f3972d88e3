//! Human-readable text for every [`Message`].
//!
//! All user-facing and log text lives here so handlers and the CLI only pass
//! structured message values around.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            // === SERVER MESSAGES ===
            Message::ServerStarting(addr) => format!("Starting server on {}", addr),
            Message::ServerStopped => "Server stopped".to_string(),
            Message::RequestFailed(error) => format!("Request failed: {}", error),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved(path) => format!("Configuration saved to {}", path),
            Message::ConfigLoaded(path) => format!("Configuration loaded from {}", path),
            Message::ConfigInvalidValue { key, value } => format!("Invalid value '{}' for {}", value, key),

            // === DATABASE MESSAGES ===
            Message::DatabaseOpened(path) => format!("Using database at {}", path),
            Message::DatabaseVersion(version) => format!("Database version: {}", version),
            Message::DatabaseNeedsUpdate => "Database needs migration".to_string(),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::NoMigrationsApplied => "No migrations have been applied yet".to_string(),
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),

            // === TODO MESSAGES ===
            Message::TodoCreated(id) => format!("Todo {} created", id),
            Message::TodoUpdated(id) => format!("Todo {} updated", id),
            Message::TodoToggled { id, completed } => {
                format!("Todo {} marked {}", id, if *completed { "completed" } else { "active" })
            }
            Message::TodoDeleted(id) => format!("Todo {} deleted", id),
            Message::TodoNotFound(id) => format!("Todo {} not found", id),
            Message::TodoTitleMissing => "Todo title is empty, nothing created".to_string(),

            // === SUBTASK MESSAGES ===
            Message::SubtasksCreated { todo_id, count } => format!("Added {} subtask(s) to todo {}", count, todo_id),
            Message::SubtaskToggled { id, completed } => {
                format!("Subtask {} marked {}", id, if *completed { "completed" } else { "active" })
            }
            Message::SubtaskDeleted(id) => format!("Subtask {} deleted", id),
            Message::SubtaskNotFound(id) => format!("Subtask {} not found", id),

            // === CATEGORY MESSAGES ===
            Message::CategoryCreated(name) => format!("Category '{}' created", name),
            Message::CategoryDeleted(id) => format!("Category {} deleted", id),
            Message::CategoryNotFound(id) => format!("Category {} not found", id),
            Message::CategoryNameMissing => "Category name is empty, nothing created".to_string(),

            // === INPUT MESSAGES ===
            Message::InvalidDueDate(value) => format!("Invalid due date: '{}'", value),
            Message::InvalidCategoryId(value) => format!("Invalid category id: '{}'", value),
            Message::MutationIgnoredForMethod(method) => format!("{} request does not modify data", method),
        };
        write!(f, "{}", s)
    }
}
