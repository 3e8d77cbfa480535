// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for calendar dates and wall-clock timestamps.
//!
//! Timestamps in trip data are wall-clock times at the place of travel.
//! An offset suffix (`Z`, `+02:00`) is accepted on input but the calendar
//! day of a timestamp is always the date as written.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const WALL_CLOCK_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a timestamp into its wall-clock date and time.
pub fn parse_wall_clock(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Ok(dt.naive_local()),
        Err(_) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")),
    }
}

/// Format a wall-clock timestamp without offset.
pub fn format_wall_clock(value: NaiveDateTime) -> String {
    value.format(WALL_CLOCK_FORMAT).to_string()
}

/// Serde adapter for wall-clock timestamps (`#[serde(with = "...")]`).
pub mod wall_clock {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_wall_clock(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_wall_clock(&raw)
            .map_err(|e| de::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))
    }
}

/// Serde adapter for optional times of day (`HH:MM` or `HH:MM:SS`).
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => s.serialize_str(&time.format("%H:%M:%S").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|raw| {
                NaiveTime::parse_from_str(&raw, "%H:%M:%S%.f")
                    .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M"))
                    .map_err(|e| de::Error::custom(format!("invalid time '{}': {}", raw, e)))
            })
            .transpose()
    }
}

/// All calendar days in `[start, end]`, empty if `end < start`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

/// Number of days strictly between two dates.
pub fn days_strictly_between(earlier: NaiveDate, later: NaiveDate) -> u32 {
    let gap = (later - earlier).num_days() - 1;
    u32::try_from(gap.max(0)).unwrap_or(u32::MAX)
}

/// Format a duration in minutes as `"{hours}h {minutes}min"`.
pub fn format_duration_minutes(minutes: i64) -> String {
    format!("{}h {}min", minutes.div_euclid(60), minutes.rem_euclid(60))
}

/// Format the time elapsed between two wall-clock timestamps.
pub fn format_duration(from: NaiveDateTime, to: NaiveDateTime) -> String {
    format_duration_minutes((to - from).num_minutes())
}

/// Uppercase the first character and lowercase the rest.
pub fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
