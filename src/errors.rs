use crate::models::HabitId;
use crate::store::StoreError;
use axum::http::StatusCode;
use thiserror::Error;

/// Failures of the habit, check-in and reflection actions, independent of how they are surfaced.
#[derive(Debug, Error)]
pub enum HabitError {
    #[error("habit name must not be empty")]
    EmptyName,

    #[error("A habit with this name already exists")]
    DuplicateName,

    #[error("habit {0} not found")]
    NotFound(HabitId),

    #[error("Please select a mood")]
    MoodRequired,

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("Please write your reflection before saving")]
    EmptyReflection,

    #[error("Invalid prompt")]
    UnknownPrompt(u8),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "Not authenticated".to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::internal(err)
    }
}

impl From<HabitError> for AppError {
    fn from(err: HabitError) -> Self {
        let status = match &err {
            HabitError::EmptyName
            | HabitError::MoodRequired
            | HabitError::OutOfRange { .. }
            | HabitError::EmptyReflection
            | HabitError::UnknownPrompt(_) => StatusCode::BAD_REQUEST,
            HabitError::DuplicateName => StatusCode::CONFLICT,
            HabitError::NotFound(_) => StatusCode::NOT_FOUND,
            HabitError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
