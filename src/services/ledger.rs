use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::db::queries;
use crate::models::{Booking, BookingStatus, OpeningHours, SalonService, SalonStatus};

/// Storage the availability and admission logic reads from and writes to.
pub trait BookingLedger: Send + Sync {
    /// `None` when the salon does not exist or is inactive.
    fn opening_hours(&self, salon_id: i64) -> anyhow::Result<Option<OpeningHours>>;
    fn salon_service(&self, salon_id: i64, service_id: i64) -> anyhow::Result<Option<SalonService>>;
    /// Bookings on `date` that still hold their window (anything but cancelled).
    fn bookings_on(&self, salon_id: i64, date: NaiveDate) -> anyhow::Result<Vec<Booking>>;
    fn insert_booking(&self, booking: &Booking) -> anyhow::Result<()>;
    fn booking(&self, id: &str) -> anyhow::Result<Option<Booking>>;
    fn update_booking_status(&self, id: &str, status: BookingStatus) -> anyhow::Result<bool>;
    fn delete_booking(&self, id: &str) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct SqliteLedger {
    db: Arc<Mutex<Connection>>,
}

impl SqliteLedger {
    pub fn new(db: Arc<Mutex<Connection>>) -> Self {
        Self { db }
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> anyhow::Result<T>) -> anyhow::Result<T> {
        let conn = self
            .db
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))?;
        f(&conn)
    }
}

impl BookingLedger for SqliteLedger {
    fn opening_hours(&self, salon_id: i64) -> anyhow::Result<Option<OpeningHours>> {
        self.with_conn(|conn| {
            let active = queries::get_salon(conn, salon_id)?
                .is_some_and(|salon| salon.status == SalonStatus::Active);
            if !active {
                return Ok(None);
            }
            Ok(Some(queries::get_opening_hours(conn, salon_id)?))
        })
    }

    fn salon_service(&self, salon_id: i64, service_id: i64) -> anyhow::Result<Option<SalonService>> {
        self.with_conn(|conn| queries::get_salon_service(conn, salon_id, service_id))
    }

    fn bookings_on(&self, salon_id: i64, date: NaiveDate) -> anyhow::Result<Vec<Booking>> {
        self.with_conn(|conn| queries::get_active_bookings_on(conn, salon_id, date))
    }

    fn insert_booking(&self, booking: &Booking) -> anyhow::Result<()> {
        self.with_conn(|conn| queries::create_booking(conn, booking))
    }

    fn booking(&self, id: &str) -> anyhow::Result<Option<Booking>> {
        self.with_conn(|conn| queries::get_booking_by_id(conn, id))
    }

    fn update_booking_status(&self, id: &str, status: BookingStatus) -> anyhow::Result<bool> {
        self.with_conn(|conn| queries::update_booking_status(conn, id, status))
    }

    fn delete_booking(&self, id: &str) -> anyhow::Result<bool> {
        self.with_conn(|conn| queries::delete_booking(conn, id))
    }
}
