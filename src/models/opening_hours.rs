use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::time_format;

/// One day's opening window. `open` is inclusive, `close` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningInterval {
    #[serde(with = "time_format")]
    pub open: NaiveTime,
    #[serde(with = "time_format")]
    pub close: NaiveTime,
}

impl OpeningInterval {
    pub fn new(open: NaiveTime, close: NaiveTime) -> anyhow::Result<Self> {
        if open >= close {
            return Err(anyhow::anyhow!(
                "opening time {} must be before closing time {}",
                time_format::format_time(&open),
                time_format::format_time(&close)
            ));
        }
        Ok(Self { open, close })
    }

    pub fn parse(open: &str, close: &str) -> anyhow::Result<Self> {
        Self::new(time_format::parse_time(open)?, time_format::parse_time(close)?)
    }
}

/// Weekly opening hours of a salon, indexed Monday (0) through Sunday (6).
/// A `None` day is closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpeningHours {
    days: [Option<OpeningInterval>; 7],
}

impl OpeningHours {
    pub fn closed() -> Self {
        Self::default()
    }

    /// Mon–Fri 09:00–18:00, Sat 10:00–16:00, Sun closed.
    pub fn salon_default() -> Self {
        let weekday = OpeningInterval {
            open: hm(9, 0),
            close: hm(18, 0),
        };
        let saturday = OpeningInterval {
            open: hm(10, 0),
            close: hm(16, 0),
        };
        let mut hours = Self::closed();
        for day in [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri] {
            hours.set(day, Some(weekday));
        }
        hours.set(Weekday::Sat, Some(saturday));
        hours
    }

    pub fn set(&mut self, day: Weekday, interval: Option<OpeningInterval>) {
        self.days[day.num_days_from_monday() as usize] = interval;
    }

    pub fn get(&self, day: Weekday) -> Option<OpeningInterval> {
        self.days[day.num_days_from_monday() as usize]
    }

    pub fn for_date(&self, date: NaiveDate) -> Option<OpeningInterval> {
        self.get(date.weekday())
    }

    /// Iterates `(weekday, interval)` from Monday to Sunday.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, Option<OpeningInterval>)> + '_ {
        self.days
            .iter()
            .enumerate()
            .map(|(i, interval)| (weekday_from_index(i as u8).unwrap_or(Weekday::Mon), *interval))
    }
}

/// `0` = Monday … `6` = Sunday.
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Mon),
        1 => Some(Weekday::Tue),
        2 => Some(Weekday::Wed),
        3 => Some(Weekday::Thu),
        4 => Some(Weekday::Fri),
        5 => Some(Weekday::Sat),
        6 => Some(Weekday::Sun),
        _ => None,
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}
