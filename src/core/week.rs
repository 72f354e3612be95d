// Calendar-week bucketing. A week runs Sunday through Saturday; every
// date maps to exactly one bucket identified by its Sunday.

use chrono::{Datelike, Duration, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WeekBounds {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// The most recent Sunday at or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// The Saturday ending the week containing `date`.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

pub fn week_bounds(date: NaiveDate) -> WeekBounds {
    let start = week_start(date);
    WeekBounds {
        start,
        end: start + Duration::days(6),
    }
}

#[cfg(test)]
mod week_tests {
    use super::*;
    use chrono::Weekday;
    use rstest::rstest;

    #[rstest]
    #[case("2025-10-28", "2025-10-26", "2025-11-01")]
    #[case("2025-10-26", "2025-10-26", "2025-11-01")] // a Sunday maps to itself
    #[case("2025-11-01", "2025-10-26", "2025-11-01")] // a Saturday maps back six days
    #[case("2026-01-01", "2025-12-28", "2026-01-03")] // week spanning a year boundary
    #[case("2024-02-29", "2024-02-25", "2024-03-02")] // leap day
    fn it_should_bucket_dates_into_sunday_to_saturday_weeks(
        #[case] date: NaiveDate,
        #[case] expected_start: NaiveDate,
        #[case] expected_end: NaiveDate,
    ) {
        assert_eq!(week_start(date), expected_start);
        assert_eq!(week_end(date), expected_end);
        assert_eq!(
            week_bounds(date),
            WeekBounds {
                start: expected_start,
                end: expected_end
            }
        );
    }

    // Second formulation of the same bucket: step back one day at a time
    // until a Sunday is reached. Both must agree for every date.
    fn week_start_by_walking(date: NaiveDate) -> NaiveDate {
        let mut day = date;
        while day.weekday() != Weekday::Sun {
            day = day.pred_opt().unwrap();
        }
        day
    }

    #[rstest]
    fn it_should_agree_with_the_day_by_day_formulation_for_every_date() {
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        while date <= last {
            assert_eq!(week_start(date), week_start_by_walking(date), "{date}");
            date = date.succ_opt().unwrap();
        }
    }

    #[rstest]
    fn it_should_satisfy_the_week_bounds_properties_for_every_date() {
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        while date <= last {
            let bounds = week_bounds(date);
            assert_eq!(bounds.start.weekday(), Weekday::Sun, "{date}");
            assert_eq!(bounds.end - bounds.start, Duration::days(6), "{date}");
            assert!(bounds.start <= date && date <= bounds.end, "{date}");
            date = date.succ_opt().unwrap();
        }
    }
}
