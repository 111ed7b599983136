//! Calendar arithmetic shared by every aggregator.
//!
//! Everything here works on `NaiveDate`: commits arrive with their local
//! calendar fields already resolved, so no timezone conversion happens.

use chrono::{Datelike, Duration, NaiveDate};

/// Format a calendar day as its canonical `YYYY-MM-DD` key.
pub fn date_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parse a `YYYY-MM-DD` key back into a date.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

/// ISO-8601 week number (1-53).
///
/// Shifts to the Thursday of the Monday-anchored week containing `date`;
/// that Thursday's year owns the week, and the week number counts from the
/// first Thursday of that year.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    let from_monday = date.weekday().num_days_from_monday() as i64;
    let thursday = date + Duration::days(3 - from_monday);
    thursday.ordinal0() / 7 + 1
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Full month name for a 1-based month.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

/// Three-letter month name for a 1-based month.
pub fn month_short_name(month: u32) -> &'static str {
    let name = month_name(month);
    if name == "Unknown" {
        name
    } else {
        &name[..3]
    }
}

/// Day name from a Sunday-based index.
pub fn day_name(day: u8) -> &'static str {
    match day {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "Unknown",
    }
}

/// Three-letter day name from a Sunday-based index.
pub fn day_short_name(day: u8) -> &'static str {
    let name = day_name(day);
    if name == "Unknown" {
        name
    } else {
        &name[..3]
    }
}

/// Percentage change from `from` to `to`.
///
/// Zero handling is asymmetric: `0 -> 0` is 0%, `0 -> n` is reported as
/// 100% rather than infinity.
pub fn percentage_growth(from: u64, to: u64) -> f64 {
    if from == 0 {
        if to == 0 {
            0.0
        } else {
            100.0
        }
    } else {
        (to as f64 - from as f64) / from as f64 * 100.0
    }
}
