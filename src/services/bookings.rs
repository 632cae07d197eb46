use crate::errors::AppError;
use crate::models::{Booking, BookingStatus};
use crate::services::ledger::BookingLedger;

pub fn get_booking(ledger: &dyn BookingLedger, id: &str) -> Result<Booking, AppError> {
    ledger
        .booking(id)?
        .ok_or_else(|| AppError::NotFound(format!("booking {id}")))
}

/// Moves a booking along `pending → confirmed → completed`, or to
/// `cancelled` from anywhere. Cancelling frees the slot for the next
/// availability read.
pub fn change_status(
    ledger: &dyn BookingLedger,
    id: &str,
    next: BookingStatus,
) -> Result<Booking, AppError> {
    let mut booking = get_booking(ledger, id)?;

    if !booking.status.can_transition_to(next) {
        return Err(AppError::Validation(format!(
            "cannot change booking status from {} to {}",
            booking.status.as_str(),
            next.as_str()
        )));
    }
    if booking.status == next {
        return Ok(booking);
    }

    if !ledger.update_booking_status(id, next)? {
        return Err(AppError::NotFound(format!("booking {id}")));
    }
    tracing::info!(
        booking_id = %id,
        from = booking.status.as_str(),
        to = next.as_str(),
        "booking status changed"
    );
    booking.status = next;
    Ok(booking)
}

pub fn delete_booking(ledger: &dyn BookingLedger, id: &str) -> Result<(), AppError> {
    if !ledger.delete_booking(id)? {
        return Err(AppError::NotFound(format!("booking {id}")));
    }
    tracing::info!(booking_id = %id, "booking deleted");
    Ok(())
}
