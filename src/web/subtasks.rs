//! Inline subtask updates answered with JSON.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::Method,
    response::Json,
};
use serde::Serialize;

use super::AppState;
use crate::db::subtasks::Subtasks;
use crate::libs::error::AppResult;
use crate::libs::messages::Message;
use crate::{msg_info, msg_warning};

/// JSON answer for inline subtask updates. `completed` is only sent by a
/// successful toggle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtaskResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl SubtaskResponse {
    fn ignored(method: &Method) -> Json<Self> {
        msg_warning!(Message::MutationIgnoredForMethod(method.to_string()));
        Json(Self {
            success: false,
            completed: None,
        })
    }
}

/// Flips a subtask on POST and reports its new state.
///
/// Other methods answer `{"success": false}` and change nothing. A missing
/// subtask is only reported for POST.
pub async fn toggle_subtask(
    State(state): State<Arc<AppState>>,
    method: Method,
    Path(id): Path<i64>,
) -> AppResult<Json<SubtaskResponse>> {
    if method != Method::POST {
        return Ok(SubtaskResponse::ignored(&method));
    }

    let completed = state.with_db(move |db| Subtasks::new(&db.conn).toggle(id)).await?;
    msg_info!(Message::SubtaskToggled { id, completed });

    Ok(Json(SubtaskResponse {
        success: true,
        completed: Some(completed),
    }))
}

/// Deletes a subtask on POST; other methods answer `{"success": false}`.
pub async fn delete_subtask(
    State(state): State<Arc<AppState>>,
    method: Method,
    Path(id): Path<i64>,
) -> AppResult<Json<SubtaskResponse>> {
    if method != Method::POST {
        return Ok(SubtaskResponse::ignored(&method));
    }

    state.with_db(move |db| Subtasks::new(&db.conn).delete(id)).await?;
    msg_info!(Message::SubtaskDeleted(id));

    Ok(Json(SubtaskResponse {
        success: true,
        completed: None,
    }))
}
