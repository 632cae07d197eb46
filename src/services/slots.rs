use chrono::NaiveTime;

use crate::models::booking::minutes_of_day;
use crate::models::OpeningInterval;

/// Candidate start times from `open` (inclusive) while `t + step <= close`.
/// A trailing remainder shorter than `step` is dropped; a closed day yields
/// nothing.
pub fn generate_slot_grid(interval: Option<&OpeningInterval>, step_minutes: u32) -> Vec<NaiveTime> {
    let Some(interval) = interval else {
        return Vec::new();
    };
    if step_minutes == 0 {
        return Vec::new();
    }

    let open = minutes_of_day(&interval.open);
    let close = minutes_of_day(&interval.close);

    let mut grid = Vec::new();
    let mut cursor = open;
    while let Some(end) = cursor.checked_add(step_minutes).filter(|end| *end <= close) {
        if let Some(t) = NaiveTime::from_hms_opt(cursor / 60, cursor % 60, 0) {
            grid.push(t);
        }
        cursor = end;
    }
    grid
}
