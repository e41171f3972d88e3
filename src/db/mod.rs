//! SQLite persistence for categories, todos and subtasks.
//!
//! Each store type borrows a [`rusqlite::Connection`] (or a transaction, which
//! derefs to one), so callers decide how many statements share a transaction.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tickoff::db::{categories::Categories, db::Db, todos::Todos};
//! use tickoff::libs::todo::{NewCategory, NewTodo};
//!
//! let mut db = Db::init("tickoff.db")?;
//! let tx = db.conn.transaction()?;
//! let work = Categories::new(&tx).create(&NewCategory::new("Work", Some("#3498db")))?;
//! let mut todo = NewTodo::new("Prepare slides");
//! todo.category_id = Some(work);
//! todo.subtask_titles = vec!["outline".into(), "draft".into()];
//! Todos::new(&tx).insert(&todo)?;
//! tx.commit()?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Schema
//!
//! - `categories`: unique `name`, hex `color`
//! - `todos`: `category_id` is set to NULL when its category is deleted
//! - `subtasks`: deleted together with their todo
//!
//! Foreign keys are enforced because [`db::Db::open`] turns on
//! `PRAGMA foreign_keys` for every connection.

/// Connection setup.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// Named, colored groupings for todos.
pub mod categories;

/// Ordered checklist items owned by a todo.
pub mod subtasks;

/// To-do items and the filtered listing query.
pub mod todos;
