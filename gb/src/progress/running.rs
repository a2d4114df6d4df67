//! Linear target tracking for running distance
//!
//! The expected distance grows in a straight line from Jan 1 to Dec 31 of the
//! current year. Comparing the running total against it tells whether the
//! runner is ahead of or behind the yearly goal.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::csv::{Field, Row};

/// Default yearly running goal in kilometres
pub const DEFAULT_TARGET_KM: f64 = 2000.0;

/// One logged run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Run {
    pub distance_km: f64,
}

impl Run {
    pub fn from_row(row: &Row) -> Self {
        Self {
            distance_km: row.field(Field::Distance).map(parse_distance).unwrap_or(0.0),
        }
    }
}

/// Parse a distance the lenient way: the longest numeric prefix wins and
/// anything unparsable counts as zero
pub fn parse_distance(raw: &str) -> f64 {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<f64>() {
        return if value.is_finite() { value } else { 0.0 };
    }

    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, ch) in raw.char_indices() {
        match ch {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + ch.len_utf8();
    }

    if !seen_digit {
        return 0.0;
    }
    raw[..end]
        .trim_end_matches('.')
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Whether the runner is ahead of the straight-line trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pace {
    Ahead,
    Behind,
    OnTrack,
}

impl std::fmt::Display for Pace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ahead => write!(f, "ahead"),
            Self::Behind => write!(f, "behind"),
            Self::OnTrack => write!(f, "on track"),
        }
    }
}

/// Running progress summary, display values rounded to one decimal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunningProgress {
    pub total_distance: f64,
    pub expected_distance: f64,
    pub difference: f64,
    pub percentage: f64,
    pub expected_percentage: f64,
    pub target: f64,
    pub day_of_year: u32,
    pub days_in_year: u32,
}

impl RunningProgress {
    /// Ahead/behind from the sign of the rounded difference
    pub fn pace(&self) -> Pace {
        if self.difference > 0.0 {
            Pace::Ahead
        } else if self.difference < 0.0 {
            Pace::Behind
        } else {
            Pace::OnTrack
        }
    }
}

/// Gregorian leap year rule
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Round half away from zero to `places` decimals
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Compare total distance against the expected distance for `today`
///
/// Only `today`'s year matters; run dates are never consulted.
pub fn calculate_running_progress(runs: &[Run], target: f64, today: NaiveDate) -> RunningProgress {
    debug!(runs = runs.len(), %target, %today, "calculate_running_progress: called");
    let total: f64 = runs.iter().map(|r| r.distance_km).sum();
    let day_of_year = today.ordinal();
    let days = days_in_year(today.year());
    let year_fraction = f64::from(day_of_year) / f64::from(days);

    let expected = target * year_fraction;
    let percentage = if target > 0.0 { total / target * 100.0 } else { 0.0 };

    let progress = RunningProgress {
        total_distance: round_to(total, 1),
        expected_distance: round_to(expected, 1),
        difference: round_to(total - expected, 1),
        percentage: round_to(percentage, 1),
        expected_percentage: round_to(year_fraction * 100.0, 1),
        target,
        day_of_year,
        days_in_year: days,
    };
    debug!(?progress, "calculate_running_progress: done");
    progress
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(distances: &[f64]) -> Vec<Run> {
        distances.iter().map(|&d| Run { distance_km: d }).collect()
    }

    #[test]
    fn test_leap_years() {
        assert_eq!(days_in_year(2024), 366);
        assert_eq!(days_in_year(1900), 365);
        assert_eq!(days_in_year(2000), 366);
        assert_eq!(days_in_year(2025), 365);
    }

    #[test]
    fn test_behind_on_day_100() {
        // April 10th is day 100 of 2025
        let today = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        let progress = calculate_running_progress(&runs(&[200.0, 150.0, 150.0]), 2000.0, today);

        assert_eq!(progress.day_of_year, 100);
        assert_eq!(progress.days_in_year, 365);
        assert_eq!(progress.total_distance, 500.0);
        assert_eq!(progress.expected_distance, 547.9);
        assert_eq!(progress.difference, -47.9);
        assert_eq!(progress.percentage, 25.0);
        assert_eq!(progress.expected_percentage, 27.4);
        assert_eq!(progress.pace(), Pace::Behind);
    }

    #[test]
    fn test_ahead_and_over_target() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let progress = calculate_running_progress(&runs(&[1500.0, 1000.0]), 2000.0, today);

        assert_eq!(progress.day_of_year, 366);
        assert_eq!(progress.expected_distance, 2000.0);
        assert_eq!(progress.percentage, 125.0);
        assert_eq!(progress.pace(), Pace::Ahead);
    }

    #[test]
    fn test_on_track_when_rounded_difference_is_zero() {
        // Day 73 of 2025: expected 400.0 for a 2000 km goal
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let progress = calculate_running_progress(&runs(&[400.02]), 2000.0, today);
        assert_eq!(progress.pace(), Pace::OnTrack);
    }

    #[test]
    fn test_zero_target() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let progress = calculate_running_progress(&runs(&[10.0]), 0.0, today);
        assert_eq!(progress.percentage, 0.0);
        assert_eq!(progress.expected_distance, 0.0);
    }

    #[test]
    fn test_parse_distance() {
        assert_eq!(parse_distance("5.25"), 5.25);
        assert_eq!(parse_distance(" 10 "), 10.0);
        assert_eq!(parse_distance("12km"), 12.0);
        assert_eq!(parse_distance("3.5 mi"), 3.5);
        assert_eq!(parse_distance("-2"), -2.0);
        assert_eq!(parse_distance("abc"), 0.0);
        assert_eq!(parse_distance(""), 0.0);
        assert_eq!(parse_distance("NaN"), 0.0);
        assert_eq!(parse_distance("inf"), 0.0);
    }

    #[test]
    fn test_run_from_row_missing_distance() {
        let row = Row::new(vec![("date".to_string(), "2025-01-01".to_string())]);
        assert_eq!(Run::from_row(&row).distance_km, 0.0);
    }
}
