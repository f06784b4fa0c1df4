//! Matches synthetic counts to the magnitude of the observed calendar.
use tracing::warn;

use crate::entry::CalendarEntry;

/// Number of non-empty shades the calendar renders counts with.
pub const SHADES: i64 = 4;

/// How many synthetic units make up one shade of the observed data:
/// `max(1, floor(max_count / 4))`.
///
/// Negative counts are reported and treated as zero. The series itself is
/// left untouched.
pub fn compute_factor(series: &[CalendarEntry]) -> i64 {
    let max = series
        .iter()
        .map(|entry| {
            if entry.count < 0 {
                warn!(
                    date = %entry.date,
                    count = entry.count,
                    "negative activity count, treating it as zero"
                );
                0
            } else {
                entry.count
            }
        })
        .max()
        .unwrap_or(0);

    (max / SHADES).max(1)
}

/// Multiplies every count by `factor`, negative counts included.
pub fn scale(factor: i64, entries: Vec<CalendarEntry>) -> Vec<CalendarEntry> {
    entries
        .into_iter()
        .map(|entry| entry.with_count(entry.count * factor))
        .collect()
}
