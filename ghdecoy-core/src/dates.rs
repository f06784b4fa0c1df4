use chrono::{Duration, NaiveDateTime};

/// Generates the days between `start` and `end`, both inclusive, walking
/// backwards from `end`.
/// If `start` is after `end`, the resulting vector will be empty.
///
/// # Arguments
///
/// * `start` - The earliest day of the range (inclusive).
/// * `end` - The day to start walking back from (inclusive).
///
/// # Returns
///
/// A `Vec<NaiveDateTime>` ordered from `end` down to `start`, keeping the
/// time of day of `end`.
///
/// # Examples
///
/// ```
/// # use ghdecoy_core::dates::days_back_from;
/// # use ghdecoy_core::entry::anchored;
/// # use chrono::NaiveDate;
/// let start = anchored(NaiveDate::from_ymd_opt(2016, 3, 5).unwrap());
/// let end = anchored(NaiveDate::from_ymd_opt(2016, 3, 7).unwrap());
///
/// let days = days_back_from(start, end);
///
/// assert_eq!(days.len(), 3);
/// assert_eq!(days[0], end);
/// assert_eq!(days[2], start);
/// ```
pub fn days_back_from(start: NaiveDateTime, end: NaiveDateTime) -> Vec<NaiveDateTime> {
    let mut days = Vec::new();
    let mut current = end;
    while current >= start {
        days.push(current);
        current -= Duration::days(1);
    }
    days
}
