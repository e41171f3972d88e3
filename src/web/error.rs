use crate::libs::error::AppError;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            msg_error!(Message::RequestFailed(self.to_string()));
        } else {
            msg_debug!(Message::RequestFailed(self.to_string()));
        }
        (status, self.to_string()).into_response()
    }
}
