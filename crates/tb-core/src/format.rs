//! Canonical display formatting for dates, times and durations.
//!
//! All formatters are total: a `None` input yields the empty string, so
//! result rows for flagged days can render absent fields without special
//! casing.

use chrono::{Duration, NaiveDate, NaiveTime};

/// Formats a date as ISO-8601 `YYYY-MM-DD`; `None` becomes the empty string.
#[must_use]
pub fn date_to_string(date: Option<NaiveDate>) -> String {
    date.map_or_else(String::new, |d| d.format("%Y-%m-%d").to_string())
}

/// Formats a time of day as 24-hour `HH:mm`; `None` becomes the empty string.
#[must_use]
pub fn time_to_string(time: Option<NaiveTime>) -> String {
    time.map_or_else(String::new, |t| t.format("%H:%M").to_string())
}

/// Formats a duration as `HH:MM` with a sign column.
///
/// Negative durations get a `-` prefix, non-negative ones a single space, so
/// columns of durations line up. Hours and minutes are computed from the
/// magnitude and zero-padded to two digits. `None` becomes the empty string.
#[must_use]
pub fn duration_to_string(duration: Option<Duration>) -> String {
    duration.map_or_else(String::new, |d| {
        let minutes = d.num_minutes();
        let sign = if minutes < 0 { '-' } else { ' ' };
        let magnitude = minutes.abs();
        format!("{sign}{:02}:{:02}", magnitude / 60, magnitude % 60)
    })
}
