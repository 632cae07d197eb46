use chrono::NaiveTime;
use serde::Serialize;

use super::time_format;

/// A candidate start time on the availability grid. Computed per query,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    #[serde(with = "time_format")]
    pub time: NaiveTime,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotAvailability {
    /// Every grid slot, unavailable ones included so clients can render them disabled.
    pub time_slots: Vec<Slot>,
    pub available_slots: Vec<String>,
}

impl SlotAvailability {
    pub fn new(time_slots: Vec<Slot>) -> Self {
        let available_slots = time_slots
            .iter()
            .filter(|slot| slot.available)
            .map(|slot| time_format::format_time(&slot.time))
            .collect();
        Self {
            time_slots,
            available_slots,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn is_available(&self, time: &NaiveTime) -> bool {
        self.time_slots
            .iter()
            .any(|slot| slot.available && slot.time == *time)
    }
}
