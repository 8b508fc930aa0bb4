//! Text helpers for presenting a [`WeatherReport`](crate::WeatherReport).

use chrono::NaiveDate;

/// City part of an IANA timezone name.
///
/// Everything after the first `/`, underscores turned into spaces.
/// A name without `/` yields an empty string.
pub fn city_from_timezone(timezone: &str) -> String {
    match timezone.split_once('/') {
        Some((_, city)) => city.replace('_', " "),
        None => String::new(),
    }
}

/// Rounded reading followed by its unit, e.g. `"21°"` or `"12 m/s"`.
pub fn format_reading(value: f32, suffix: &str) -> String {
    format!("{}{suffix}", value.round() as i64)
}

/// Lowercase English weekday for a `YYYY-MM-DD` date.
pub fn day_of_week(date: &str) -> Option<String> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(parsed.format("%A").to_string().to_lowercase())
}

/// `"MAR 07"` style month and day.
pub fn day_of_month(date: NaiveDate) -> String {
    date.format("%b %d").to_string().to_uppercase()
}
