//! Calendar week math
//!
//! All weekly aggregation is keyed on the Monday that begins the week a
//! given date falls in ("week-start"). A week is complete when a daily
//! record exists for every one of its 7 calendar dates.

use chrono::{Datelike, Duration, NaiveDate};

/// Number of days in an aggregation week.
pub const DAYS_PER_WEEK: usize = 7;

/// The Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// The Monday of the most recently *completed* week relative to `today`.
pub fn last_full_week_start(today: NaiveDate) -> NaiveDate {
    week_start(today) - Duration::days(DAYS_PER_WEEK as i64)
}

/// The 7 calendar dates of the week beginning at `week_start`.
pub fn week_dates(week_start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (0..DAYS_PER_WEEK as i64).map(move |offset| week_start + Duration::days(offset))
}

/// First day of the calendar month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 exists in every month")
}

/// Exclusive end of the calendar month containing `date` (the first day
/// of the following month).
pub fn next_month_start(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("month start is always valid")
}

/// Number of days in the calendar month containing `date`.
pub fn days_in_month(date: NaiveDate) -> i64 {
    (next_month_start(date) - month_start(date)).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2025, 6, 2), date(2025, 6, 2))] // Monday maps to itself
    #[case(date(2025, 6, 4), date(2025, 6, 2))] // midweek
    #[case(date(2025, 6, 8), date(2025, 6, 2))] // Sunday still belongs to Monday's week
    #[case(date(2025, 1, 1), date(2024, 12, 30))] // year boundary
    fn week_start_is_monday_aligned(#[case] input: NaiveDate, #[case] expected: NaiveDate) {
        assert_eq!(week_start(input), expected);
    }

    #[test]
    fn last_full_week_is_seven_days_before_current_week() {
        // Wednesday 2025-06-11 -> current week starts 06-09 -> last full week 06-02
        assert_eq!(last_full_week_start(date(2025, 6, 11)), date(2025, 6, 2));
        // Running on a Monday: last full week is the one that just ended
        assert_eq!(last_full_week_start(date(2025, 6, 9)), date(2025, 6, 2));
    }

    #[test]
    fn week_dates_covers_monday_through_sunday() {
        let dates: Vec<_> = week_dates(date(2025, 6, 2)).collect();
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], date(2025, 6, 2));
        assert_eq!(dates[6], date(2025, 6, 8));
    }

    #[rstest]
    #[case(date(2025, 2, 14), 28)]
    #[case(date(2024, 2, 14), 29)] // leap year
    #[case(date(2025, 12, 25), 31)]
    fn month_lengths(#[case] input: NaiveDate, #[case] expected: i64) {
        assert_eq!(days_in_month(input), expected);
    }

    #[test]
    fn next_month_start_rolls_over_december() {
        assert_eq!(next_month_start(date(2025, 12, 31)), date(2026, 1, 1));
    }
}
