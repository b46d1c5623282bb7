use chrono::NaiveTime;

use crate::error::{Result, TimeLogError};

/// Parses a clock-of-day value in the `HH:MM` form the store and the time
/// spinners use.
pub fn parse_hhmm(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| TimeLogError::Validation(format!("invalid time '{value}', expected HH:MM")))
}

/// Fractional hours between two clock times on the same day: whole hours
/// plus minutes/60. Signed, so a reversed pair comes back negative;
/// callers reject non-positive shifts before writing anything.
pub fn fractional_hours(in_time: NaiveTime, out_time: NaiveTime) -> f64 {
    let span = out_time - in_time;
    span.num_hours() as f64 + (span.num_minutes() % 60) as f64 / 60.0
}
