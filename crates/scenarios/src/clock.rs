//! Wall-clock arithmetic for elapsed-time estimates.

use jiff::{SignedDuration, civil::Time};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Rounds a duration in hours to whole minutes.
#[must_use]
pub fn whole_minutes(hours: f64) -> i64 {
    (hours * 60.0).round() as i64
}

/// Splits a duration in hours into whole hours and minutes.
///
/// Rounding happens on the total minute count, so 2.999 hours is reported as
/// `(3, 0)` rather than `(2, 60)`.
#[must_use]
pub fn split_hours(hours: f64) -> (i64, i64) {
    let minutes = whole_minutes(hours);
    (minutes.div_euclid(60), minutes.rem_euclid(60))
}

/// Returns the clock time `hours` before `reference`, to the nearest minute.
///
/// Wraps around midnight, so the result is always a valid time of day. Only
/// the minutes past a whole number of days matter, which keeps arbitrarily
/// long durations in range.
#[must_use]
pub fn clock_before(reference: Time, hours: f64) -> Time {
    let minutes = whole_minutes(hours).rem_euclid(MINUTES_PER_DAY);
    reference.wrapping_sub(SignedDuration::from_mins(minutes))
}

/// Formats a time of day as `hh:mm AM` / `hh:mm PM`.
#[must_use]
pub fn twelve_hour(time: Time) -> String {
    let hour = time.hour();
    let display_hour = (hour + 11) % 12 + 1;
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    format!("{display_hour:02}:{:02} {meridiem}", time.minute())
}
