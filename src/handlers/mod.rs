pub mod availability;
pub mod bookings;
pub mod catalog;
pub mod health;
pub mod manager;
pub mod reviews;
pub mod salons;

use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Decodes a JSON body so that missing or mistyped fields surface as
/// `validation` errors rather than axum's plain-text rejection.
pub(crate) fn decode<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, AppError> {
    serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))
}

/// Blank query parameters count as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
