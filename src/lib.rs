//! # tickoff - personal task tracking
//!
//! A small web application for keeping a personal to-do list: items carry a
//! priority, an optional category and due date, free-form notes, and an
//! ordered list of subtasks.
//!
//! ## Features
//!
//! - **Todos**: Create, edit, toggle and delete to-do items
//! - **Subtasks**: Ordered checklist items owned by a single todo
//! - **Categories**: Named, colored groupings; deleting one keeps its todos
//! - **Filtering**: Narrow the list by category, priority and status
//! - **Display Helpers**: Overdue detection and priority colors computed on read
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tickoff::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
pub mod web;
