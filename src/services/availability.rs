use chrono::{NaiveDate, NaiveTime};

use crate::errors::AppError;
use crate::models::booking::minutes_of_day;
use crate::models::{Booking, OpeningHours, SalonService, Slot, SlotAvailability};
use crate::services::ledger::BookingLedger;
use crate::services::slots::generate_slot_grid;

/// Marks every grid slot available or not for a service of `duration_minutes`.
///
/// A slot `T` is unavailable when `T + duration` runs past `close`, or when
/// `[T, T + duration)` overlaps the window of any booking that still blocks
/// (half-open, so touching windows do not overlap).
pub fn evaluate_slots(
    grid: &[NaiveTime],
    close: NaiveTime,
    duration_minutes: u32,
    bookings: &[Booking],
) -> Vec<Slot> {
    let close = minutes_of_day(&close);
    let taken: Vec<(u32, u32)> = bookings
        .iter()
        .filter(|b| b.blocks_slots())
        .map(Booking::window)
        .collect();

    grid.iter()
        .map(|time| {
            let start = minutes_of_day(time);
            let end = start + duration_minutes;
            let fits = end <= close;
            let free = taken
                .iter()
                .all(|&(b_start, b_end)| !(start < b_end && b_start < end));
            Slot {
                time: *time,
                available: fits && free,
            }
        })
        .collect()
}

/// Availability of one salon service on `date`, read from the live ledger.
pub fn slots_for(
    ledger: &dyn BookingLedger,
    hours: &OpeningHours,
    service: &SalonService,
    date: NaiveDate,
    step_minutes: u32,
) -> Result<SlotAvailability, AppError> {
    let Some(interval) = hours.for_date(date) else {
        return Ok(SlotAvailability::empty());
    };
    let grid = generate_slot_grid(Some(&interval), step_minutes);
    let bookings = ledger.bookings_on(service.salon_id, date)?;
    let slots = evaluate_slots(&grid, interval.close, service.duration_minutes, &bookings);
    Ok(SlotAvailability::new(slots))
}

/// `GET availability(salon_id, date, service_id)`.
pub fn availability(
    ledger: &dyn BookingLedger,
    salon_id: i64,
    date: NaiveDate,
    service_id: i64,
    step_minutes: u32,
) -> Result<SlotAvailability, AppError> {
    let hours = ledger
        .opening_hours(salon_id)?
        .ok_or_else(|| AppError::NotFound(format!("salon {salon_id}")))?;
    let service = ledger
        .salon_service(salon_id, service_id)?
        .ok_or_else(|| AppError::NotFound(format!("service {service_id} at salon {salon_id}")))?;

    slots_for(ledger, &hours, &service, date, step_minutes)
}
