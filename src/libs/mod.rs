//! Core library modules for the tickoff application.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tickoff::db::db::Db;
//! use tickoff::db::todos::Todos;
//! use tickoff::libs::todo::{NewTodo, TodoFilter};
//!
//! let db = Db::open("tickoff.db")?;
//! let id = Todos::new(&db.conn).insert(&NewTodo::new("Water the plants"))?;
//! let todos = Todos::new(&db.conn).list(&TodoFilter::all())?;
//! # Ok::<(), tickoff::libs::error::AppError>(())
//! ```

pub mod config;
pub mod data_storage;
pub mod error;
pub mod messages;
pub mod todo;
pub mod view;
