//! Weekly gym attendance
//!
//! Visits are bucketed by ISO-8601 week (Monday start, week 1 holds the
//! year's first Thursday). A week counts as attended when its bucket holds
//! at least one visit.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Days, IsoWeek, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

use crate::csv::{Field, Row};

use super::running::round_to;

/// One gym visit; `date` is `None` when the CSV value did not parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GymVisit {
    pub date: Option<NaiveDate>,
}

impl GymVisit {
    pub fn from_row(row: &Row) -> Self {
        Self {
            date: row.field(Field::Date).and_then(parse_visit_date),
        }
    }
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a calendar date from the common spellings found in hand-kept CSVs
pub fn parse_visit_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }

    debug!(%raw, "parse_visit_date: unrecognised date");
    None
}

/// Attendance summary for the current year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GymProgress {
    pub weeks_with_visits: u32,
    pub weeks_without_visits: u32,
    pub average_visits_per_week: f64,
    pub total_visits: u32,
    pub total_weeks: u32,
}

/// ISO weeks touched from Jan 1 through `today`, walking in 7-day steps and
/// always including `today`'s own week
pub fn elapsed_weeks(today: NaiveDate) -> BTreeSet<IsoWeek> {
    let mut weeks = BTreeSet::new();
    let Some(year_start) = today.with_ordinal(1) else {
        weeks.insert(today.iso_week());
        return weeks;
    };

    let mut day = year_start;
    while day <= today {
        weeks.insert(day.iso_week());
        match day.checked_add_days(Days::new(7)) {
            Some(next) => day = next,
            None => break,
        }
    }
    weeks.insert(today.iso_week());
    weeks
}

/// Summarise attendance for visits between Jan 1 and `today` inclusive
pub fn calculate_gym_progress(visits: &[GymVisit], today: NaiveDate) -> GymProgress {
    debug!(visits = visits.len(), %today, "calculate_gym_progress: called");
    let year_start = today.with_ordinal(1).unwrap_or(today);

    let in_range: Vec<NaiveDate> = visits
        .iter()
        .filter_map(|v| v.date)
        .filter(|d| *d >= year_start && *d <= today)
        .collect();

    let visited: BTreeSet<IsoWeek> = in_range.iter().map(|d| d.iso_week()).collect();
    let total_weeks = elapsed_weeks(today).len() as u32;
    let weeks_with_visits = visited.len() as u32;
    let total_visits = in_range.len() as u32;

    let average = if total_weeks > 0 {
        f64::from(total_visits) / f64::from(total_weeks)
    } else {
        0.0
    };

    let progress = GymProgress {
        weeks_with_visits,
        weeks_without_visits: total_weeks.saturating_sub(weeks_with_visits),
        average_visits_per_week: round_to(average, 2),
        total_visits,
        total_weeks,
    };
    debug!(?progress, "calculate_gym_progress: done");
    progress
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn visits(dates: &[NaiveDate]) -> Vec<GymVisit> {
        dates.iter().map(|&d| GymVisit { date: Some(d) }).collect()
    }

    #[test]
    fn test_three_of_ten_weeks() {
        // 2024 starts on a Monday; March 6th falls in ISO week 10
        let today = date(2024, 3, 6);
        let progress = calculate_gym_progress(
            &visits(&[
                date(2024, 1, 2),
                date(2024, 1, 4),
                date(2024, 2, 14),
                date(2024, 3, 4),
                date(2024, 3, 6),
            ]),
            today,
        );

        assert_eq!(progress.total_weeks, 10);
        assert_eq!(progress.weeks_with_visits, 3);
        assert_eq!(progress.weeks_without_visits, 7);
        assert_eq!(progress.total_visits, 5);
        assert_eq!(progress.average_visits_per_week, 0.5);
    }

    #[test]
    fn test_excludes_out_of_range_and_unparsed() {
        let today = date(2025, 2, 1);
        let mut list = visits(&[date(2024, 12, 31), date(2025, 2, 2), date(2025, 1, 15)]);
        list.push(GymVisit { date: None });

        let progress = calculate_gym_progress(&list, today);
        assert_eq!(progress.total_visits, 1);
        assert_eq!(progress.weeks_with_visits, 1);
    }

    #[test]
    fn test_year_start_in_previous_iso_year() {
        // Jan 1st 2021 is a Friday and belongs to 2020-W53
        let today = date(2021, 1, 5);
        let weeks = elapsed_weeks(today);
        assert_eq!(weeks.len(), 2);
        assert!(weeks.contains(&date(2021, 1, 1).iso_week()));
        assert!(weeks.contains(&date(2021, 1, 4).iso_week()));
    }

    #[test]
    fn test_today_week_included_when_walk_skips_it() {
        // Walk lands on Jan 1 (Wed) and Jan 8 (Wed); Jan 13 is a Monday in the next week
        let today = date(2025, 1, 13);
        let weeks = elapsed_weeks(today);
        assert_eq!(weeks.len(), 3);
    }

    #[test]
    fn test_no_visits() {
        let progress = calculate_gym_progress(&[], date(2025, 1, 1));
        assert_eq!(progress.total_weeks, 1);
        assert_eq!(progress.weeks_with_visits, 0);
        assert_eq!(progress.weeks_without_visits, 1);
        assert_eq!(progress.average_visits_per_week, 0.0);
    }

    #[test]
    fn test_average_rounds_to_two_decimals() {
        let today = date(2024, 1, 15);
        // Three elapsed weeks, one visit
        let progress = calculate_gym_progress(&visits(&[date(2024, 1, 3)]), today);
        assert_eq!(progress.total_weeks, 3);
        assert_eq!(progress.average_visits_per_week, 0.33);
    }

    #[test]
    fn test_parse_visit_date_formats() {
        let expected = Some(date(2025, 1, 5));
        assert_eq!(parse_visit_date("2025-01-05"), expected);
        assert_eq!(parse_visit_date("2025/01/05"), expected);
        assert_eq!(parse_visit_date("01/05/2025"), expected);
        assert_eq!(parse_visit_date("1/5/2025"), expected);
        assert_eq!(parse_visit_date("January 5, 2025"), expected);
        assert_eq!(parse_visit_date("Jan 5, 2025"), expected);
        assert_eq!(parse_visit_date("5 January 2025"), expected);
        assert_eq!(parse_visit_date("2025-01-05T07:30:00"), expected);
        assert_eq!(parse_visit_date("2025-01-05T07:30:00+02:00"), expected);
        assert_eq!(parse_visit_date("2025-01-05 18:45"), expected);
        assert_eq!(parse_visit_date("2025-02-30"), None);
        assert_eq!(parse_visit_date("yesterday"), None);
        assert_eq!(parse_visit_date(""), None);
    }
}
