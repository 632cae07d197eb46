use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveTime, Utc};
use dashmap::DashMap;
use serde::Deserialize;
use validator::Validate;

use crate::errors::AppError;
use crate::models::{time_format, Booking, BookingStatus};
use crate::services::availability::slots_for;
use crate::services::ledger::BookingLedger;

/// A customer's booking request as it arrives from the API.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookingRequest {
    pub salon_id: i64,
    pub service_id: i64,
    #[validate(length(min = 1, max = 100, message = "customer_name is required"))]
    pub customer_name: String,
    #[validate(email(message = "customer_email must be a valid email address"))]
    pub customer_email: String,
    #[validate(length(max = 20))]
    pub customer_phone: Option<String>,
    /// `YYYY-MM-DD`
    pub booking_date: String,
    /// `HH:MM`
    pub booking_time: String,
}

impl BookingRequest {
    fn parse_slot(&self) -> Result<(NaiveDate, NaiveTime), AppError> {
        let date = NaiveDate::parse_from_str(self.booking_date.trim(), "%Y-%m-%d")
            .map_err(|_| AppError::Validation("invalid booking_date, use YYYY-MM-DD".into()))?;
        let time = time_format::parse_time(&self.booking_time)
            .map_err(|_| AppError::Validation("invalid booking_time, use HH:MM".into()))?;
        Ok((date, time))
    }
}

type LedgerKey = (i64, NaiveDate);

/// Admits bookings one at a time per salon and date.
///
/// The availability check and the insert run under a lock keyed by
/// `(salon_id, date)`, so two requests for the same day of the same salon
/// can never both pass the check before either has written. Requests for
/// different salons or days proceed in parallel.
#[derive(Default)]
pub struct BookingAdmission {
    locks: DashMap<LedgerKey, Arc<Mutex<()>>>,
}

impl BookingAdmission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admit(
        &self,
        ledger: &dyn BookingLedger,
        request: &BookingRequest,
        step_minutes: u32,
        initial_status: BookingStatus,
    ) -> Result<Booking, AppError> {
        request.validate()?;
        let (date, time) = request.parse_slot()?;

        let today = Utc::now().date_naive();
        if date < today {
            return Err(AppError::Validation(format!(
                "cannot book a date in the past: {date}"
            )));
        }

        let key = (request.salon_id, date);
        let lock = self.lock_for(key);
        let result = match lock.lock() {
            Ok(_guard) => check_and_insert(ledger, request, date, time, step_minutes, initial_status),
            Err(poisoned) => Err(poisoned.into()),
        };
        drop(lock);
        self.release(&key);

        match &result {
            Ok(booking) => tracing::info!(
                booking_id = %booking.id,
                salon_id = booking.salon_id,
                date = %date,
                time = %time_format::format_time(&time),
                duration = booking.duration_minutes,
                "booking admitted"
            ),
            Err(AppError::SlotConflict) => tracing::warn!(
                salon_id = request.salon_id,
                date = %date,
                time = %time_format::format_time(&time),
                "booking rejected: slot conflict"
            ),
            Err(_) => {}
        }
        result
    }

    fn lock_for(&self, key: LedgerKey) -> Arc<Mutex<()>> {
        Arc::clone(self.locks.entry(key).or_default().value())
    }

    /// Drops the lock entry once nobody else holds or waits on it.
    fn release(&self, key: &LedgerKey) {
        self.locks.remove_if(key, |_, lock| Arc::strong_count(lock) == 1);
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.locks.len()
    }
}

/// Runs with the `(salon_id, date)` lock held: hours, service duration and
/// the day's bookings are all read under it before the insert.
fn check_and_insert(
    ledger: &dyn BookingLedger,
    request: &BookingRequest,
    date: NaiveDate,
    time: NaiveTime,
    step_minutes: u32,
    initial_status: BookingStatus,
) -> Result<Booking, AppError> {
    let hours = ledger
        .opening_hours(request.salon_id)?
        .ok_or_else(|| AppError::NotFound(format!("salon {}", request.salon_id)))?;
    let service = ledger
        .salon_service(request.salon_id, request.service_id)?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "service {} at salon {}",
                request.service_id, request.salon_id
            ))
        })?;
    if hours.for_date(date).is_none() {
        return Err(AppError::ClosedDay(date));
    }

    let availability = slots_for(ledger, &hours, &service, date, step_minutes)?;
    if availability.is_available(&time) {
        let booking = Booking {
            id: uuid::Uuid::new_v4().to_string(),
            salon_id: request.salon_id,
            service_id: request.service_id,
            customer_name: request.customer_name.trim().to_string(),
            customer_email: request.customer_email.trim().to_string(),
            customer_phone: request
                .customer_phone
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            booking_date: date,
            booking_time: time,
            duration_minutes: service.duration_minutes,
            status: initial_status,
            created_at: Utc::now().naive_utc(),
        };
        ledger.insert_booking(&booking)?;
        Ok(booking)
    } else {
        Err(AppError::SlotConflict)
    }
}
