use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error as ThisError;

/// Service-wide error. Every variant maps to exactly one JSON response;
/// errors are converted at the boundary of the operation that detects them
/// and never retried.
#[derive(Debug, ThisError)]
pub enum ApiError {
    /// Create called with a missing or empty task.
    #[error("Task is required")]
    TaskRequired,

    /// Login with an unknown username or a wrong password. The two causes
    /// are deliberately indistinguishable to the caller.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Protected route called without a usable session.
    #[error("Unauthorized")]
    Unauthorized,

    /// Todo absent, or owned by a different user (reported identically).
    #[error("Todo not found")]
    TodoNotFound,

    /// Registration with a username that is already taken.
    #[error("Username already exists")]
    UsernameTaken,

    #[error("password hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("blocking task error: {0}")]
    Blocking(#[from] tokio::task::JoinError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::TaskRequired => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::TodoNotFound => StatusCode::NOT_FOUND,
            ApiError::UsernameTaken => StatusCode::CONFLICT,
            ApiError::Hash(_) | ApiError::Blocking(_) | ApiError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // fault detail stays server-side
            tracing::error!(error = %self, "request failed");
            "An internal server error occurred.".to_string()
        } else {
            self.to_string()
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}

/// Standardized JSON error body.
#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
}
