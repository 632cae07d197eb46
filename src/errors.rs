use std::sync::PoisonError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("the requested time is no longer available, please pick another time")]
    SlotConflict,

    #[error("the salon is closed on {0}")]
    ClosedDay(chrono::NaiveDate),

    #[error("unauthorized")]
    Unauthorized,

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::NotFound(_) => "not_found",
            AppError::SlotConflict | AppError::ClosedDay(_) => "slot_conflict",
            AppError::Unauthorized => "unauthorized",
            AppError::Internal(_) => "internal",
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl<T> From<PoisonError<T>> for AppError {
    fn from(_: PoisonError<T>) -> Self {
        AppError::Internal(anyhow::anyhow!("database lock poisoned"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::SlotConflict | AppError::ClosedDay(_) => StatusCode::CONFLICT,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            AppError::Internal(e) => {
                tracing::error!(error = %e, "request failed");
                serde_json::json!({ "error": "internal error", "kind": self.kind() })
            }
            AppError::ClosedDay(_) => serde_json::json!({
                "error": self.to_string(),
                "kind": self.kind(),
                "reason": "closed_day",
            }),
            _ => serde_json::json!({ "error": self.to_string(), "kind": self.kind() }),
        };
        (status, axum::Json(body)).into_response()
    }
}
