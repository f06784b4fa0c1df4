//! The compact date/interval language used to request explicit placements.
//!
//! ```text
//! 20160301,20160305-20160307
//! ```
//!
//! Tokens are comma-separated. A token is either a single `YYYYMMDD` date or
//! an inclusive `YYYYMMDD-YYYYMMDD` interval.
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::dates::days_back_from;
use crate::entry::anchored;
use crate::error::TimeframeError;

const TOKEN_SEPARATOR: char = ',';
const INTERVAL_SEPARATOR: char = '-';
const DATE_DIGITS: usize = 8;

/// An inclusive range of days. Endpoints are kept as given; a reversed
/// interval simply covers no days.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DateInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateInterval {
    /// Every day of the interval, from `end` back to `start`.
    pub fn days(&self) -> Vec<NaiveDateTime> {
        days_back_from(self.start, self.end)
    }
}

/// Parsed timeframe: single dates and intervals, each in token order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timeframe {
    pub singledates: Vec<NaiveDateTime>,
    pub intervals: Vec<DateInterval>,
}

impl Timeframe {
    pub fn is_empty(&self) -> bool {
        self.singledates.is_empty() && self.intervals.is_empty()
    }
}

/// Parses a timeframe specification such as `20160301,20160305-20160307`.
///
/// # Errors
///
/// Returns a [`TimeframeError`] for the first token that is empty, is not a
/// two-date interval, or contains something other than a valid `YYYYMMDD`
/// calendar date (e.g. `20150332`). Nothing is returned on failure.
///
/// # Examples
///
/// ```
/// # use ghdecoy_core::timeframe::parse_timeframe;
/// let tf = parse_timeframe("20160301,20160305-20160307").unwrap();
/// assert_eq!(tf.singledates.len(), 1);
/// assert_eq!(tf.intervals.len(), 1);
/// assert_eq!(tf.intervals[0].days().len(), 3);
///
/// assert!(parse_timeframe("20150301-20150332").is_err());
/// ```
pub fn parse_timeframe(input: &str) -> Result<Timeframe, TimeframeError> {
    let mut timeframe = Timeframe::default();

    for raw in input.split(TOKEN_SEPARATOR) {
        let token = raw.trim();
        if token.is_empty() {
            return Err(TimeframeError::EmptyToken {
                input: input.to_string(),
            });
        }

        if token.contains(INTERVAL_SEPARATOR) {
            let parts: Vec<&str> = token.split(INTERVAL_SEPARATOR).collect();
            let [start, end] = parts.as_slice() else {
                return Err(TimeframeError::InvalidInterval {
                    token: token.to_string(),
                });
            };
            timeframe.intervals.push(DateInterval {
                start: parse_date_component(start)?,
                end: parse_date_component(end)?,
            });
        } else {
            timeframe.singledates.push(parse_date_component(token)?);
        }
    }

    debug!(
        singledates = timeframe.singledates.len(),
        intervals = timeframe.intervals.len(),
        "parsed timeframe"
    );
    Ok(timeframe)
}

/// `20160305` -> `2016-03-05T12:00:00`
fn parse_date_component(s: &str) -> Result<NaiveDateTime, TimeframeError> {
    let invalid = || TimeframeError::InvalidDate {
        token: s.to_string(),
    };
    if s.len() != DATE_DIGITS || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let year = s[0..4].parse::<i32>().map_err(|_| invalid())?;
    let month = s[4..6].parse::<u32>().map_err(|_| invalid())?;
    let day = s[6..8].parse::<u32>().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day)
        .map(anchored)
        .ok_or_else(invalid)
}
