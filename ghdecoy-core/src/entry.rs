use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Hour every calendar day is anchored at. Midday keeps day arithmetic clear of
/// timezone boundaries.
pub const ANCHOR_HOUR: u32 = 12;

/// One day of the activity calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarEntry {
    pub date: NaiveDateTime,
    pub count: i64,
}

impl CalendarEntry {
    /// Builds an entry for `date`, anchored at midday.
    pub fn new(date: NaiveDate, count: i64) -> Self {
        Self {
            date: anchored(date),
            count,
        }
    }

    /// Returns a copy of this entry carrying `count` instead.
    pub fn with_count(&self, count: i64) -> Self {
        Self {
            date: self.date,
            count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// `2015-01-01` -> `2015-01-01T12:00:00`
pub fn anchored(date: NaiveDate) -> NaiveDateTime {
    date.and_time(anchor_time())
}

fn anchor_time() -> NaiveTime {
    NaiveTime::from_hms_opt(ANCHOR_HOUR, 0, 0).expect("valid time")
}
