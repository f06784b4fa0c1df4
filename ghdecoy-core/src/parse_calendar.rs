//! Reads the contribution calendar markup into [`CalendarEntry`] values.
//!
//! Each day of the calendar is one line carrying two attributes:
//!
//! ```text
//! <rect class="day" width="10" height="10" x="-36" y="0" fill="#eeeeee" data-count="0" data-date="2015-01-01"/>
//! ```
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::entry::CalendarEntry;

/// The calendar's root element.
const ROOT_MARKER: &str = "<svg";

/// Week columns in a year-long calendar grid.
const WEEKS_PER_GRID: usize = 53;

/// Lines per week column: seven day cells plus the opening and closing group.
const LINES_PER_WEEK: usize = 7 + 2;

/// Fewer lines than this cannot hold a full year of calendar markup.
pub const MIN_CALENDAR_LINES: usize = WEEKS_PER_GRID * LINES_PER_WEEK;

static COUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"data-count="(\d+)""#).expect("valid count regex"));
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"data-date="(\d{4}-\d{2}-\d{2})""#).expect("valid date regex"));

/// Cheap plausibility check on the raw markup before trusting it as a
/// calendar: enough lines for a year of weeks, and the first line opens the
/// root `<svg` element. An error page or unrelated document fails this.
pub fn is_valid_calendar<S: AsRef<str>>(lines: &[S]) -> bool {
    let Some(first) = lines.first() else {
        return false;
    };
    lines.len() >= MIN_CALENDAR_LINES && first.as_ref().starts_with(ROOT_MARKER)
}

/// Extracts one [`CalendarEntry`] per line that carries both a `data-count`
/// and a `data-date` attribute, in line order. Every other line is skipped.
///
/// # Examples
///
/// ```
/// # use ghdecoy_core::parse_calendar::parse_calendar;
/// let lines = [
///     r#"<rect data-count="3" data-date="2015-01-01"/>"#,
///     "<g>",
///     r#"<rect data-date="2015-01-02" data-count="0"/>"#,
/// ];
/// let series = parse_calendar(&lines);
///
/// assert_eq!(series.len(), 2);
/// assert_eq!(series[0].count, 3);
/// assert_eq!(series[1].date.to_string(), "2015-01-02 12:00:00");
/// ```
pub fn parse_calendar<S: AsRef<str>>(lines: &[S]) -> Vec<CalendarEntry> {
    lines
        .iter()
        .filter_map(|line| parse_calendar_line(line.as_ref()))
        .collect()
}

fn parse_calendar_line(line: &str) -> Option<CalendarEntry> {
    let count = COUNT_RE.captures(line)?.get(1)?.as_str();
    let date = DATE_RE.captures(line)?.get(1)?.as_str();

    let count = match count.parse::<i64>() {
        Ok(c) => c,
        Err(e) => {
            debug!(count, error = %e, "skipping calendar line with unusable count");
            return None;
        }
    };
    let date = match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d,
        Err(e) => {
            debug!(date, error = %e, "skipping calendar line with invalid date");
            return None;
        }
    };

    Some(CalendarEntry::new(date, count))
}
