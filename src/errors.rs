use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::FieldErrors;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(FieldErrors),
    #[error("Member not found")]
    MemberNotFound(i32),
    #[error("Workout session not found")]
    WorkoutNotFound(i32),
    #[error("Member has associated workout sessions, cannot delete")]
    MemberHasSessions { member_id: i32, sessions: i64 },
    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MemberNotFound(_) | ApiError::WorkoutNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MemberHasSessions { .. } => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

// Bodies that are not JSON at all fail the same way as a wrong-typed payload.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(FieldErrors::schema(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(FieldErrors::schema(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        match self {
            ApiError::Validation(errors) => (status, Json(errors)).into_response(),
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (status, Json(json!({ "error": message }))).into_response()
            }
            // Member deletion outcomes answer with a message, like its success body.
            ApiError::MemberNotFound(_) | ApiError::MemberHasSessions { .. } => {
                (status, Json(json!({ "message": message }))).into_response()
            }
            ApiError::WorkoutNotFound(_) => {
                (status, Json(json!({ "error": message }))).into_response()
            }
        }
    }
}
