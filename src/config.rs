use std::env;

use crate::models::BookingStatus;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub manager_token: String,
    /// Granularity of the availability grid, in minutes.
    pub slot_step_minutes: u32,
    /// Status a freshly admitted booking starts in.
    pub booking_initial_status: BookingStatus,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5001),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "biosearch.db".to_string()),
            manager_token: env::var("MANAGER_TOKEN").unwrap_or_else(|_| "changeme".to_string()),
            slot_step_minutes: parse_slot_step(env::var("SLOT_STEP_MINUTES").ok().as_deref()),
            booking_initial_status: match env::var("BOOKING_INITIAL_STATUS").as_deref() {
                Ok("confirmed") => BookingStatus::Confirmed,
                _ => BookingStatus::Pending,
            },
        }
    }
}

const DEFAULT_SLOT_STEP: u32 = 60;
const MINUTES_PER_DAY: u32 = 24 * 60;

/// A step must fit inside one day; anything else falls back to hourly slots.
fn parse_slot_step(raw: Option<&str>) -> u32 {
    raw.and_then(|v| v.trim().parse().ok())
        .filter(|step: &u32| (1..=MINUTES_PER_DAY).contains(step))
        .unwrap_or(DEFAULT_SLOT_STEP)
}
