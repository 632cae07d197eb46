use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::time_format;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: String,
    pub salon_id: i64,
    pub service_id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub booking_date: NaiveDate,
    #[serde(with = "time_format")]
    pub booking_time: NaiveTime,
    /// Copied from the salon's service at admission; later edits to the
    /// service do not move existing bookings.
    pub duration_minutes: u32,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

impl Booking {
    /// Half-open `[start, end)` window in minutes since midnight.
    pub fn window(&self) -> (u32, u32) {
        let start = minutes_of_day(&self.booking_time);
        (start, start + self.duration_minutes)
    }

    pub fn blocks_slots(&self) -> bool {
        self.status.blocks_slots()
    }
}

pub fn minutes_of_day(t: &NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            "completed" => Some(BookingStatus::Completed),
            _ => None,
        }
    }

    /// Cancelled bookings free their window; every other status holds it.
    pub fn blocks_slots(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }

    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        match (self, next) {
            (_, Cancelled) => true,
            (Pending, Confirmed) => true,
            (Confirmed, Completed) => true,
            _ => false,
        }
    }
}
