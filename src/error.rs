// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::services::prompts::INVALID_INPUT;
use crate::services::session_manager::SubmitError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::EmptyInput => AppError::BadRequest(INVALID_INPUT.to_string()),
            SubmitError::Busy => AppError::Conflict(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_errors_map_to_statuses() {
        let empty = AppError::from(SubmitError::EmptyInput);
        assert_eq!(empty.to_string(), INVALID_INPUT);
        assert_eq!(empty.into_response().status(), StatusCode::BAD_REQUEST);

        let busy = AppError::from(SubmitError::Busy);
        assert_eq!(busy.to_string(), "a reply is already pending");
        assert_eq!(busy.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn not_found_status() {
        let err = AppError::NotFound("no suggestion at index 9".into());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
