//! Spending trend analysis
//!
//! Pure functions over day-bucketed sums and an injected reference date.
//! Nothing here reads the wall clock, which keeps every output reproducible
//! in tests and identical across repeated calls.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::models::{SpendingVelocity, WeekBucket, WeekdayAverage, WeeklyComparison};

/// Days of history the week-over-week comparison consumes
pub const COMPARISON_WINDOW_DAYS: i64 = 14;
/// Weeks in the trailing window used as the velocity baseline
pub const VELOCITY_BASELINE_WEEKS: i64 = 4;
/// Default length of the weekly spending series
pub const DEFAULT_WEEKLY_SERIES_LEN: usize = 8;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn window_sum(daily: &BTreeMap<NaiveDate, f64>, start: NaiveDate, end: NaiveDate) -> f64 {
    daily.range(start..=end).map(|(_, amount)| amount).sum()
}

/// Compare the most recent 7 days against the 7 days before them, anchored
/// at `today`.
///
/// The percentage change is `None` when the previous week had no spend;
/// a jump from nothing has no meaningful percentage.
pub fn weekly_comparison(daily: &BTreeMap<NaiveDate, f64>, today: NaiveDate) -> WeeklyComparison {
    let current_start = today - Duration::days(6);
    let previous_start = today - Duration::days(COMPARISON_WINDOW_DAYS - 1);

    let current_week = window_sum(daily, current_start, today);
    let previous_week = window_sum(daily, previous_start, current_start - Duration::days(1));

    let change_percentage = if previous_week > 0.0 {
        Some((current_week - previous_week) / previous_week * 100.0)
    } else {
        None
    };

    WeeklyComparison {
        current_week,
        previous_week,
        change_amount: current_week - previous_week,
        change_percentage,
    }
}

/// Average spend per weekday across the days present, highest first.
///
/// Only days that actually appear in the buckets contribute to an average;
/// ties rank in weekday order so the output is deterministic.
pub fn daily_pattern(daily: &BTreeMap<NaiveDate, f64>) -> Vec<WeekdayAverage> {
    let mut sums = [(0.0f64, 0u32); 7];
    for (date, amount) in daily {
        let slot = date.weekday().num_days_from_monday() as usize;
        sums[slot].0 += amount;
        sums[slot].1 += 1;
    }

    let mut pattern: Vec<WeekdayAverage> = WEEK
        .iter()
        .zip(sums.iter())
        .filter(|(_, (_, count))| *count > 0)
        .map(|(weekday, (sum, count))| WeekdayAverage {
            weekday: *weekday,
            average: *sum / *count as f64,
        })
        .collect();

    pattern.sort_by(|a, b| {
        b.average
            .partial_cmp(&a.average)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                a.weekday
                    .num_days_from_monday()
                    .cmp(&b.weekday.num_days_from_monday())
            })
    });
    pattern
}

/// Current 7-day spend relative to the trailing four-week weekly average.
///
/// The ratio is `None` when the trailing window is empty.
pub fn velocity(daily: &BTreeMap<NaiveDate, f64>, today: NaiveDate) -> SpendingVelocity {
    let current_week = window_sum(daily, today - Duration::days(6), today);

    let baseline_start = today - Duration::days(VELOCITY_BASELINE_WEEKS * 7 - 1);
    let four_week_average =
        window_sum(daily, baseline_start, today) / VELOCITY_BASELINE_WEEKS as f64;

    let ratio = if four_week_average > 0.0 {
        Some(current_week / four_week_average)
    } else {
        None
    };

    SpendingVelocity {
        current_week,
        four_week_average,
        ratio,
    }
}

/// Monday-anchored weekly sums for the trailing `weeks` weeks, oldest first
pub fn weekly_series(
    daily: &BTreeMap<NaiveDate, f64>,
    today: NaiveDate,
    weeks: usize,
) -> Vec<WeekBucket> {
    let anchor = today - Duration::days(today.weekday().num_days_from_monday() as i64);

    let mut series = Vec::with_capacity(weeks);
    for i in (0..weeks).rev() {
        let week_start = anchor - Duration::days(7 * i as i64);
        series.push(WeekBucket {
            week_start,
            amount: window_sum(daily, week_start, week_start + Duration::days(6)),
        });
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily(entries: &[(i32, u32, u32, f64)]) -> BTreeMap<NaiveDate, f64> {
        entries
            .iter()
            .map(|&(y, m, d, amount)| (NaiveDate::from_ymd_opt(y, m, d).unwrap(), amount))
            .collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekly_comparison_buckets_do_not_overlap() {
        // Today is Aug 14; current week covers Aug 8-14, previous Aug 1-7
        let buckets = daily(&[
            (2026, 8, 1, 100.0),
            (2026, 8, 7, 200.0),
            (2026, 8, 8, 50.0),
            (2026, 8, 14, 150.0),
        ]);
        let cmp = weekly_comparison(&buckets, date(2026, 8, 14));
        assert_eq!(cmp.current_week, 200.0);
        assert_eq!(cmp.previous_week, 300.0);
        assert_eq!(cmp.change_amount, -100.0);
        let pct = cmp.change_percentage.unwrap();
        assert!((pct - (-100.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_weekly_comparison_undefined_when_previous_is_zero() {
        let buckets = daily(&[(2026, 8, 14, 500.0)]);
        let cmp = weekly_comparison(&buckets, date(2026, 8, 14));
        assert_eq!(cmp.current_week, 500.0);
        assert_eq!(cmp.previous_week, 0.0);
        assert_eq!(cmp.change_percentage, None);
    }

    #[test]
    fn test_daily_pattern_ranks_averages_descending() {
        // Two Mondays averaging 150, one Sunday at 400
        let buckets = daily(&[
            (2026, 8, 3, 100.0),
            (2026, 8, 10, 200.0),
            (2026, 8, 9, 400.0),
        ]);
        let pattern = daily_pattern(&buckets);
        assert_eq!(pattern.len(), 2);
        assert_eq!(pattern[0].weekday, Weekday::Sun);
        assert_eq!(pattern[0].average, 400.0);
        assert_eq!(pattern[1].weekday, Weekday::Mon);
        assert_eq!(pattern[1].average, 150.0);
    }

    #[test]
    fn test_daily_pattern_empty_input() {
        assert!(daily_pattern(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_velocity_flat_spend_is_one() {
        // 100 per day for the trailing 28 days
        let mut buckets = BTreeMap::new();
        let today = date(2026, 8, 28);
        for i in 0..28 {
            buckets.insert(today - Duration::days(i), 100.0);
        }
        let v = velocity(&buckets, today);
        assert_eq!(v.current_week, 700.0);
        assert_eq!(v.four_week_average, 700.0);
        assert_eq!(v.ratio, Some(1.0));
    }

    #[test]
    fn test_velocity_accelerating_spend() {
        // Nothing in weeks 2-4, 700 in the current week: ratio 4.0
        let mut buckets = BTreeMap::new();
        let today = date(2026, 8, 28);
        for i in 0..7 {
            buckets.insert(today - Duration::days(i), 100.0);
        }
        let v = velocity(&buckets, today);
        assert_eq!(v.ratio, Some(4.0));
    }

    #[test]
    fn test_velocity_undefined_without_history() {
        let v = velocity(&BTreeMap::new(), date(2026, 8, 28));
        assert_eq!(v.ratio, None);
        assert_eq!(v.four_week_average, 0.0);
    }

    #[test]
    fn test_weekly_series_is_monday_anchored_oldest_first() {
        // Aug 14 2026 is a Friday; its week starts Monday Aug 10
        let buckets = daily(&[(2026, 8, 10, 100.0), (2026, 8, 3, 50.0)]);
        let series = weekly_series(&buckets, date(2026, 8, 14), 3);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].week_start, date(2026, 7, 27));
        assert_eq!(series[0].amount, 0.0);
        assert_eq!(series[1].week_start, date(2026, 8, 3));
        assert_eq!(series[1].amount, 50.0);
        assert_eq!(series[2].week_start, date(2026, 8, 10));
        assert_eq!(series[2].amount, 100.0);
    }
}
