//! Wall-clock times travel as `HH:MM` strings on the wire and in the database.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

pub const FORMAT: &str = "%H:%M";

pub fn parse_time(s: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), FORMAT)
        .map_err(|_| anyhow::anyhow!("invalid time (expected HH:MM): {s}"))
}

pub fn format_time(t: &NaiveTime) -> String {
    t.format(FORMAT).to_string()
}

pub fn serialize<S: Serializer>(t: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_time(t))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
    let s = String::deserialize(deserializer)?;
    parse_time(&s).map_err(serde::de::Error::custom)
}
