use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::handlers::decode;
use crate::models::{Booking, BookingStatus};
use crate::services::admission::BookingRequest;
use crate::services::bookings;
use crate::state::AppState;

// POST /api/bookings
#[derive(Serialize)]
pub struct CreateBookingResponse {
    id: String,
    status: BookingStatus,
    message: String,
    booking: Booking,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), AppError> {
    let request: BookingRequest = decode(body)?;

    // Admission may wait on another request for the same salon and day.
    let booking = tokio::task::spawn_blocking(move || {
        state.admission.admit(
            &state.ledger,
            &request,
            state.config.slot_step_minutes,
            state.config.booking_initial_status,
        )
    })
    .await
    .map_err(anyhow::Error::from)??;

    let message = match booking.status {
        BookingStatus::Confirmed => "Booking confirmed",
        _ => "Booking received and awaiting confirmation",
    };
    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            id: booking.id.clone(),
            status: booking.status,
            message: message.to_string(),
            booking,
        }),
    ))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(bookings::get_booking(&state.ledger, &id)?))
}
