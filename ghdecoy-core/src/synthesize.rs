//! Picks the days to fake and draws their synthetic activity.
use std::collections::HashSet;
use std::ops::Range;

use chrono::NaiveDateTime;
use rand::Rng;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};
use tracing::{debug, info, warn};

use crate::entry::CalendarEntry;
use crate::scale::{compute_factor, scale};
use crate::timeframe::Timeframe;

/// Default highest shade a synthetic day can reach.
pub const DEFAULT_MAX_SHADE: u32 = 4;

/// Default shortest run of empty days worth filling.
pub const DEFAULT_MIN_DAYS: usize = 1;

/// Where synthetic activity is placed, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Policy {
    /// Every qualifying run of empty days.
    Fill,
    /// Only the run of empty days at the end of the calendar.
    Append,
    /// Exactly the days of a [`Timeframe`].
    Timeframe,
    /// Every day but today, active or not.
    Force,
}

/// A [`Policy`] together with the data it needs.
#[derive(Debug, Clone, Copy)]
pub enum Placement<'a> {
    Fill,
    Append,
    Timeframe(&'a Timeframe),
    Force,
}

impl Policy {
    /// `fill, append, timeframe, force`
    pub fn names() -> String {
        Policy::iter()
            .map(|p| p.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Placement<'_> {
    pub fn policy(&self) -> Policy {
        match self {
            Placement::Fill => Policy::Fill,
            Placement::Append => Policy::Append,
            Placement::Timeframe(_) => Policy::Timeframe,
            Placement::Force => Policy::Force,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisOptions {
    /// Runs of empty days shorter than this are left alone (fill/append only).
    pub min_days: usize,
    /// Synthetic counts are drawn from `0..=max_shade` before scaling.
    pub max_shade: u32,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            min_days: DEFAULT_MIN_DAYS,
            max_shade: DEFAULT_MAX_SHADE,
        }
    }
}

/// Builds the synthetic entries for `series` under `placement`.
///
/// Every synthetic count is drawn uniformly from `0..=max_shade` and then
/// scaled by [`compute_factor`] of the observed series, so fake days blend in
/// with the real ones. The returned dates are always a subset of the series'
/// dates; the series itself is not modified.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use rand::SeedableRng;
/// # use rand::rngs::StdRng;
/// # use ghdecoy_core::{CalendarEntry, Placement, SynthesisOptions, synthesize};
/// let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
/// let series: Vec<CalendarEntry> = start
///     .iter_days()
///     .zip([1, 0, 0, 0, 1])
///     .map(|(d, c)| CalendarEntry::new(d, c))
///     .collect();
/// let opts = SynthesisOptions { min_days: 3, max_shade: 4 };
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let fake = synthesize(&series, Placement::Fill, &opts, &mut rng);
///
/// assert_eq!(fake.len(), 3);
/// assert_eq!(fake[0].date, series[1].date);
/// ```
pub fn synthesize<R: Rng>(
    series: &[CalendarEntry],
    placement: Placement,
    opts: &SynthesisOptions,
    rng: &mut R,
) -> Vec<CalendarEntry> {
    if series.is_empty() {
        warn!("empty activity series, nothing to synthesize");
        return Vec::new();
    }

    let mut draw = |entry: &CalendarEntry| entry.with_count(draw_shade(rng, opts.max_shade));

    let synthetic: Vec<CalendarEntry> = match placement {
        Placement::Force => series[..series.len() - 1].iter().map(&mut draw).collect(),
        Placement::Fill => materialize(series, gap_runs(series, 0, opts.min_days), &mut draw),
        Placement::Append => {
            let from = trailing_run_start(series);
            materialize(series, gap_runs(series, from, opts.min_days), &mut draw)
        }
        Placement::Timeframe(timeframe) => timeframe_days(series, timeframe)
            .into_iter()
            .map(|date| draw(&CalendarEntry { date, count: 0 }))
            .collect(),
    };

    let factor = compute_factor(series);
    info!(
        policy = placement.policy().as_ref(),
        days = synthetic.len(),
        factor,
        "synthesized activity"
    );
    scale(factor, synthetic)
}

fn draw_shade<R: Rng>(rng: &mut R, max_shade: u32) -> i64 {
    i64::from(rng.random_range(0..=max_shade))
}

fn materialize<F>(series: &[CalendarEntry], runs: Vec<Range<usize>>, draw: F) -> Vec<CalendarEntry>
where
    F: FnMut(&CalendarEntry) -> CalendarEntry,
{
    runs.into_iter()
        .flat_map(|run| series[run].iter())
        .map(draw)
        .collect()
}

/// Scanner state while walking the series for runs of empty days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    NoOpenRun,
    RunOpen { start: usize },
}

/// Finds the runs of empty days in `series[from..]` that are at least
/// `min_days` long.
///
/// An active day closes an open run just before itself. The last day of the
/// series always closes an open run, and belongs to it when empty. A run can
/// only still be open after the scan if it was opened on the very last day; a
/// single trailing empty day is never filled.
fn gap_runs(series: &[CalendarEntry], from: usize, min_days: usize) -> Vec<Range<usize>> {
    let Some(last) = series.len().checked_sub(1) else {
        return Vec::new();
    };
    let mut runs = Vec::new();
    let mut close = |run: Range<usize>| {
        if run.len() >= min_days {
            runs.push(run);
        } else {
            debug!(start = run.start, len = run.len(), min_days, "gap too short");
        }
    };

    let mut state = ScanState::NoOpenRun;
    for (idx, entry) in series.iter().enumerate().skip(from) {
        state = match state {
            ScanState::NoOpenRun if entry.is_empty() => ScanState::RunOpen { start: idx },
            ScanState::NoOpenRun => ScanState::NoOpenRun,
            ScanState::RunOpen { start } if !entry.is_empty() => {
                close(start..idx);
                ScanState::NoOpenRun
            }
            ScanState::RunOpen { start } if idx == last => {
                close(start..idx + 1);
                ScanState::NoOpenRun
            }
            open => open,
        };
    }

    if let ScanState::RunOpen { start } = state {
        debug!(start, "single trailing empty day left unfilled");
    }
    runs
}

/// Index where the empty run at the end of the series starts. The last index
/// when the last day is active, 0 when every day is empty.
fn trailing_run_start(series: &[CalendarEntry]) -> usize {
    let last = series.len().saturating_sub(1);
    series
        .iter()
        .rposition(|entry| !entry.is_empty())
        .map_or(0, |active| (active + 1).min(last))
}

/// The series dates covered by `timeframe`: single dates in order, then each
/// interval from its end back to its start. Dates missing from the series are
/// skipped.
fn timeframe_days(series: &[CalendarEntry], timeframe: &Timeframe) -> Vec<NaiveDateTime> {
    let known: HashSet<NaiveDateTime> = series.iter().map(|entry| entry.date).collect();

    let singles = timeframe.singledates.iter().copied();
    let ranges = timeframe.intervals.iter().flat_map(|interval| interval.days());

    singles
        .chain(ranges)
        .filter(|date| {
            let found = known.contains(date);
            if !found {
                debug!(%date, "timeframe date not in calendar");
            }
            found
        })
        .collect()
}
