//! Error taxonomy shared by the store and the request handlers.

use crate::libs::messages::Message;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// A referenced record does not exist.
    #[error("{0}")]
    NotFound(Message),

    /// A submitted value could not be interpreted (unparseable date, non-numeric id).
    #[error("{0}")]
    InvalidInput(Message),

    /// Any failure reported by SQLite, constraint violations included.
    #[error("database error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for store failures caused by a violated constraint, such as a
    /// duplicate category name.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            AppError::Store(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}
