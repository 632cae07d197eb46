use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::handlers::non_empty;
use crate::models::SlotAvailability;
use crate::services::availability;
use crate::state::AppState;

// GET /api/salons/:id/availability?date=YYYY-MM-DD&service_id=N
#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
    pub service_id: Option<String>,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    salon_id: i64,
    date: NaiveDate,
    service_id: i64,
    #[serde(flatten)]
    slots: SlotAvailability,
}

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Path(salon_id): Path<i64>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let date = non_empty(query.date)
        .ok_or_else(|| AppError::Validation("date is required".into()))?;
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("invalid date, use YYYY-MM-DD".into()))?;
    let service_id: i64 = non_empty(query.service_id)
        .ok_or_else(|| AppError::Validation("service_id is required".into()))?
        .parse()
        .map_err(|_| AppError::Validation("service_id must be a number".into()))?;

    let slots = availability::availability(
        &state.ledger,
        salon_id,
        date,
        service_id,
        state.config.slot_step_minutes,
    )?;

    Ok(Json(AvailabilityResponse {
        salon_id,
        date,
        service_id,
        slots,
    }))
}
