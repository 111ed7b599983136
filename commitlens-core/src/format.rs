//! Display helpers shared by the CLI renderers.

use chrono::{DateTime, Utc};

use crate::analytics::calendar;

/// Format an hour slot as a range (e.g., "9pm–10pm").
pub fn hour_display(hour: u8) -> String {
    let label = |h: u8| {
        let twelve = if h % 12 == 0 { 12 } else { h % 12 };
        let period = if h < 12 { "am" } else { "pm" };
        format!("{}{}", twelve, period)
    };
    format!("{}–{}", label(hour % 24), label((hour + 1) % 24))
}

/// Format a growth percentage with an explicit sign (e.g., "+23%" or "-15%").
pub fn format_delta(delta: f64) -> String {
    if delta >= 0.0 {
        format!("+{:.0}%", delta)
    } else {
        format!("{:.0}%", delta)
    }
}

/// Abbreviate large counts (e.g., "12.3K", "1.5M").
pub fn format_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Format a `YYYY-MM-DD` key as "Jan 5, 2024"; unparseable keys pass through.
pub fn format_date_key(key: &str) -> String {
    match calendar::parse_date_key(key) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => key.to_string(),
    }
}

/// Format a millisecond timestamp relative to `now` (e.g., "3d ago").
pub fn format_relative_ms(timestamp_ms: i64, now: DateTime<Utc>) -> String {
    let Some(ts) = DateTime::<Utc>::from_timestamp_millis(timestamp_ms) else {
        return "—".to_string();
    };
    let duration = now.signed_duration_since(ts);

    if duration.num_seconds() < 60 {
        "just now".to_string()
    } else if duration.num_minutes() < 60 {
        format!("{}m ago", duration.num_minutes())
    } else if duration.num_hours() < 24 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_days() < 7 {
        format!("{}d ago", duration.num_days())
    } else {
        ts.format("%b %d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_hour_display() {
        assert_eq!(hour_display(0), "12am–1am");
        assert_eq!(hour_display(11), "11am–12pm");
        assert_eq!(hour_display(21), "9pm–10pm");
        assert_eq!(hour_display(23), "11pm–12am");
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(23.4), "+23%");
        assert_eq!(format_delta(0.0), "+0%");
        assert_eq!(format_delta(-15.0), "-15%");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(12_345), "12.3K");
        assert_eq!(format_count(1_500_000), "1.5M");
    }

    #[test]
    fn test_format_date_key() {
        assert_eq!(format_date_key("2024-01-05"), "Jan 5, 2024");
        assert_eq!(format_date_key("garbage"), "garbage");
    }

    #[test]
    fn test_format_relative_ms() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let hours_ago = now.timestamp_millis() - 3 * 3_600_000;
        assert_eq!(format_relative_ms(hours_ago, now), "3h ago");
        let weeks_ago = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(format_relative_ms(weeks_ago.timestamp_millis(), now), "May 01, 2024");
    }
}
