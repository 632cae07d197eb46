use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::queries;
use crate::errors::AppError;
use crate::handlers::decode;
use crate::models::opening_hours::weekday_from_index;
use crate::models::time_format;
use crate::models::{
    Booking, BookingStatus, OpeningHours, OpeningInterval, Salon, SalonDetails, SalonService,
    SalonStatus,
};
use crate::services::bookings;
use crate::state::AppState;

fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token.is_empty() || token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

fn salon_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("salon {id}"))
}

// ── Salons ──

// GET /api/manager/salons
pub async fn list_salons(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Salon>>, AppError> {
    check_auth(&headers, &state.config.manager_token)?;

    let salons = {
        let db = state.db.lock()?;
        queries::list_all_salons(&db)?
    };
    Ok(Json(salons))
}

// POST /api/manager/salons
#[derive(Deserialize, Validate)]
pub struct CreateSalonRequest {
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    #[serde(flatten)]
    pub details: SalonDetails,
}

pub async fn create_salon(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Salon>), AppError> {
    check_auth(&headers, &state.config.manager_token)?;
    let request: CreateSalonRequest = decode(body)?;
    request.validate()?;

    let salon = {
        let db = state.db.lock()?;
        let id = queries::create_salon(&db, request.name.trim(), &request.details)?;
        queries::replace_opening_hours(&db, id, &OpeningHours::salon_default())?;
        queries::get_salon(&db, id)?.ok_or_else(|| salon_not_found(id))?
    };
    tracing::info!(salon_id = salon.id, name = %salon.name, "salon created");

    Ok((StatusCode::CREATED, Json(salon)))
}

// PUT /api/manager/salons/:id
#[derive(Deserialize, Validate)]
pub struct UpdateSalonRequest {
    #[validate(length(min = 1, max = 200, message = "name cannot be empty"))]
    pub name: Option<String>,
    pub status: Option<SalonStatus>,
    #[serde(flatten)]
    pub details: SalonDetails,
}

pub async fn update_salon(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Salon>, AppError> {
    check_auth(&headers, &state.config.manager_token)?;
    let request: UpdateSalonRequest = decode(body)?;
    request.validate()?;

    let db = state.db.lock()?;
    let name = request.name.as_deref().map(str::trim);
    if !queries::update_salon(&db, id, name, &request.details)? {
        return Err(salon_not_found(id));
    }
    if let Some(status) = request.status {
        queries::set_salon_status(&db, id, status)?;
        tracing::info!(salon_id = id, status = status.as_str(), "salon status changed");
    }
    let salon = queries::get_salon(&db, id)?.ok_or_else(|| salon_not_found(id))?;
    Ok(Json(salon))
}

// GET /api/manager/salons/:id/bookings
pub async fn list_salon_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Booking>>, AppError> {
    check_auth(&headers, &state.config.manager_token)?;

    let db = state.db.lock()?;
    if !queries::salon_exists(&db, id)? {
        return Err(salon_not_found(id));
    }
    Ok(Json(queries::get_salon_bookings(&db, id)?))
}

// ── Offered services ──

// GET /api/manager/salons/:id/services
pub async fn list_salon_services(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Vec<SalonService>>, AppError> {
    check_auth(&headers, &state.config.manager_token)?;

    let db = state.db.lock()?;
    if !queries::salon_exists(&db, id)? {
        return Err(salon_not_found(id));
    }
    Ok(Json(queries::list_salon_services(&db, id)?))
}

// POST /api/manager/salons/:id/services
#[derive(Deserialize, Validate)]
pub struct AddServiceRequest {
    pub service_id: i64,
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,
    #[validate(range(min = 1, max = 1440, message = "duration_minutes must be positive"))]
    pub duration_minutes: u32,
}

pub async fn add_salon_service(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<SalonService>), AppError> {
    check_auth(&headers, &state.config.manager_token)?;
    let request: AddServiceRequest = decode(body)?;
    request.validate()?;

    let db = state.db.lock()?;
    if !queries::salon_exists(&db, id)? {
        return Err(salon_not_found(id));
    }
    if !queries::service_exists(&db, request.service_id)? {
        return Err(AppError::NotFound(format!("service {}", request.service_id)));
    }
    if queries::get_salon_service(&db, id, request.service_id)?.is_some() {
        return Err(AppError::Validation(format!(
            "service {} is already offered by this salon",
            request.service_id
        )));
    }

    let offering_id = queries::add_salon_service(
        &db,
        id,
        request.service_id,
        request.price,
        request.duration_minutes,
    )?;
    let offering = queries::get_salon_offering(&db, id, offering_id)?
        .ok_or_else(|| AppError::NotFound(format!("offering {offering_id}")))?;
    tracing::info!(salon_id = id, service_id = request.service_id, "service added to salon");

    Ok((StatusCode::CREATED, Json(offering)))
}

// PUT /api/manager/salons/:id/services/:offering_id
#[derive(Deserialize, Validate)]
pub struct UpdateServiceRequest {
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: Option<f64>,
    #[validate(range(min = 1, max = 1440, message = "duration_minutes must be positive"))]
    pub duration_minutes: Option<u32>,
}

pub async fn update_salon_service(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path((id, offering_id)): Path<(i64, i64)>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<SalonService>, AppError> {
    check_auth(&headers, &state.config.manager_token)?;
    let request: UpdateServiceRequest = decode(body)?;
    request.validate()?;

    let db = state.db.lock()?;
    let not_found = || AppError::NotFound(format!("offering {offering_id} at salon {id}"));
    if !queries::update_salon_service(&db, id, offering_id, request.price, request.duration_minutes)? {
        return Err(not_found());
    }
    let offering = queries::get_salon_offering(&db, id, offering_id)?.ok_or_else(not_found)?;
    Ok(Json(offering))
}

// DELETE /api/manager/salons/:id/services/:offering_id
pub async fn delete_salon_service(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path((id, offering_id)): Path<(i64, i64)>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.manager_token)?;

    let deleted = {
        let db = state.db.lock()?;
        queries::delete_salon_service(&db, id, offering_id)?
    };
    if !deleted {
        return Err(AppError::NotFound(format!("offering {offering_id} at salon {id}")));
    }
    Ok(Json(serde_json::json!({"ok": true})))
}

// ── Opening hours ──

/// One weekday as the manager API reads and writes it.
#[derive(Debug, Serialize, Deserialize)]
pub struct DayHours {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_open: bool,
}

/// Keyed `"0"` (Monday) through `"6"` (Sunday).
pub type WeeklyHours = BTreeMap<String, DayHours>;

fn to_weekly(hours: &OpeningHours) -> WeeklyHours {
    hours
        .iter()
        .enumerate()
        .map(|(index, (_, interval))| {
            let day = match interval {
                Some(iv) => DayHours {
                    start_time: Some(time_format::format_time(&iv.open)),
                    end_time: Some(time_format::format_time(&iv.close)),
                    is_open: true,
                },
                None => DayHours {
                    start_time: None,
                    end_time: None,
                    is_open: false,
                },
            };
            (index.to_string(), day)
        })
        .collect()
}

/// Days left out of the body are closed.
fn from_weekly(weekly: &WeeklyHours) -> Result<OpeningHours, AppError> {
    let mut hours = OpeningHours::closed();
    for (key, day) in weekly {
        let weekday = key
            .parse::<u8>()
            .ok()
            .and_then(weekday_from_index)
            .ok_or_else(|| AppError::Validation(format!("invalid weekday key {key:?}, use 0-6")))?;
        if !day.is_open {
            continue;
        }
        let (Some(start), Some(end)) = (day.start_time.as_deref(), day.end_time.as_deref()) else {
            return Err(AppError::Validation(format!(
                "day {key} is open but start_time or end_time is missing"
            )));
        };
        let interval = OpeningInterval::parse(start, end)
            .map_err(|e| AppError::Validation(format!("day {key}: {e}")))?;
        hours.set(weekday, Some(interval));
    }
    Ok(hours)
}

// GET /api/manager/salons/:id/opening-hours
pub async fn get_opening_hours(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<WeeklyHours>, AppError> {
    check_auth(&headers, &state.config.manager_token)?;

    let db = state.db.lock()?;
    if !queries::salon_exists(&db, id)? {
        return Err(salon_not_found(id));
    }
    let hours = queries::get_opening_hours(&db, id)?;
    Ok(Json(to_weekly(&hours)))
}

// PUT /api/manager/salons/:id/opening-hours
pub async fn replace_opening_hours(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<WeeklyHours>, AppError> {
    check_auth(&headers, &state.config.manager_token)?;
    let weekly: WeeklyHours = decode(body)?;
    let hours = from_weekly(&weekly)?;

    {
        let db = state.db.lock()?;
        if !queries::salon_exists(&db, id)? {
            return Err(salon_not_found(id));
        }
        queries::replace_opening_hours(&db, id, &hours)?;
    }
    tracing::info!(salon_id = id, "opening hours replaced");

    Ok(Json(to_weekly(&hours)))
}

// ── Bookings ──

// PUT /api/manager/bookings/:id/status
#[derive(Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Booking>, AppError> {
    check_auth(&headers, &state.config.manager_token)?;
    let request: StatusUpdateRequest = decode(body)?;
    let next = BookingStatus::parse(request.status.trim())
        .ok_or_else(|| AppError::Validation(format!("unknown status {:?}", request.status)))?;

    Ok(Json(bookings::change_status(&state.ledger, &id, next)?))
}

// DELETE /api/manager/bookings/:id
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.manager_token)?;
    bookings::delete_booking(&state.ledger, &id)?;
    Ok(Json(serde_json::json!({"ok": true})))
}
