use chrono::{Datelike, NaiveDate};
use ghdecoy_core::{
    Placement, SynthesisOptions, is_valid_calendar, parse_calendar, parse_timeframe, synthesize,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A year of calendar markup starting on 2015-01-04 (a Sunday). Days in
/// `busy` carry `busy_count` contributions, every other day none.
fn calendar_markup(busy: impl Fn(NaiveDate) -> bool, busy_count: i64) -> Vec<String> {
    let start = NaiveDate::from_ymd_opt(2015, 1, 4).unwrap();
    let mut lines = vec![
        r#"<svg width="721" height="110" class="js-calendar-graph-svg">"#.to_string(),
        r#"  <g transform="translate(20, 20)">"#.to_string(),
    ];
    for (week, days) in start.iter_days().take(53 * 7).collect::<Vec<_>>().chunks(7).enumerate() {
        lines.push(format!(r#"    <g transform="translate({}, 0)">"#, week * 13));
        for (i, day) in days.iter().enumerate() {
            let count = if busy(*day) { busy_count } else { 0 };
            lines.push(format!(
                r##"      <rect class="day" width="10" height="10" x="13" y="{}" fill="#eeeeee" data-count="{}" data-date="{}"/>"##,
                i * 12,
                count,
                day.format("%Y-%m-%d")
            ));
        }
        lines.push("    </g>".to_string());
    }
    lines.push("  </g>".to_string());
    lines.push("</svg>".to_string());
    lines
}

#[test]
fn fill_only_touches_empty_weekends() {
    let weekday = |d: NaiveDate| d.weekday().number_from_monday() <= 5;
    let lines = calendar_markup(weekday, 20);
    assert!(is_valid_calendar(&lines));

    let series = parse_calendar(&lines);
    assert_eq!(series.len(), 53 * 7);

    let mut rng = StdRng::seed_from_u64(2015);
    let opts = SynthesisOptions {
        min_days: 2,
        max_shade: 4,
    };
    let fake = synthesize(&series, Placement::Fill, &opts, &mut rng);

    assert!(!fake.is_empty());
    for entry in &fake {
        assert!(!weekday(entry.date.date()), "{} is a weekday", entry.date);
        // max 20 -> factor 5
        assert_eq!(entry.count % 5, 0);
        assert!((0..=20).contains(&entry.count));
    }
}

#[test]
fn append_after_last_activity() {
    let cutoff = NaiveDate::from_ymd_opt(2015, 12, 1).unwrap();
    let lines = calendar_markup(|d| d < cutoff, 3);
    let series = parse_calendar(&lines);

    let mut rng = StdRng::seed_from_u64(1);
    let fake = synthesize(
        &series,
        Placement::Append,
        &SynthesisOptions::default(),
        &mut rng,
    );

    let last = series.last().unwrap().date.date();
    assert_eq!(fake.len() as i64, (last - cutoff).num_days() + 1);
    assert!(fake.iter().all(|e| e.date.date() >= cutoff));
}

#[test]
fn timeframe_request_against_calendar() {
    let lines = calendar_markup(|_| true, 8);
    let series = parse_calendar(&lines);
    let tf = parse_timeframe("20150301-20150307,20150401,20200101").unwrap();

    let mut rng = StdRng::seed_from_u64(3);
    let fake = synthesize(
        &series,
        Placement::Timeframe(&tf),
        &SynthesisOptions::default(),
        &mut rng,
    );

    assert_eq!(fake.len(), 8);
    assert_eq!(fake[0].date.format("%Y%m%d").to_string(), "20150401");
    assert!(fake.iter().all(|e| e.count % 2 == 0));
}

#[test]
fn error_page_is_rejected() {
    let lines = vec![
        "<!DOCTYPE html>".to_string(),
        "<title>Page not found</title>".to_string(),
    ];
    assert!(!is_valid_calendar(&lines));
    assert!(parse_calendar(&lines).is_empty());
}
