//! HTTP surface: routes, shared state and the server loop.
//!
//! Page routes answer with the JSON view model a template would render;
//! mutations answer with a `303 See Other` back to the relevant page. The
//! subtask endpoints answer with small JSON payloads for inline updates.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    response::Json,
    routing::{any, get},
    Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::db::db::Db;
use crate::libs::config::Config;
use crate::libs::error::{AppError, AppResult};
use crate::libs::messages::Message;
use crate::msg_info;

pub mod categories;
pub mod error;
pub mod form;
pub mod subtasks;
pub mod todos;

/// Shared application state. Read-only; all data lives in the database.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db_path: PathBuf,
}

impl AppState {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self { db_path: db_path.into() }
    }

    /// Runs `f` on a fresh connection on the blocking thread pool.
    pub async fn with_db<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Db) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let path = self.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let mut db = Db::open(&path)?;
            f(&mut db)
        })
        .await
        .map_err(|e| AppError::Internal(e.into()))?
    }
}

/// Builds the application router.
///
/// Mutation routes registered with `any` receive every method and decide
/// themselves which ones act.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(todos::todo_list))
        .route("/add", get(todos::add_todo_form).post(todos::add_todo))
        .route("/toggle/:id", any(todos::toggle_todo))
        .route("/delete/:id", any(todos::delete_todo))
        .route("/edit/:id", get(todos::edit_todo_form).post(todos::edit_todo))
        .route("/subtask/toggle/:id", any(subtasks::toggle_subtask))
        .route("/subtask/delete/:id", any(subtasks::delete_subtask))
        .route("/categories", get(categories::manage_categories).post(categories::create_category))
        .route("/categories/delete/:id", any(categories::delete_category))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Applies pending migrations and serves until Ctrl-C.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let db_path = config.database_path()?;
    msg_info!(Message::DatabaseOpened(db_path.display().to_string()));
    Db::init(&db_path)?;

    let app = router(AppState::new(db_path));
    let addr = config.server.address();
    msg_info!(Message::ServerStarting(addr.clone()));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    msg_info!(Message::ServerStopped);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
    }
}
