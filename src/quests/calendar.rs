//! Week numbering
//!
//! Weeks are counted from the Sunday on or before January 1st: week 1 runs
//! from January 1st to the first Saturday, and every Sunday starts a new
//! week. Dates are taken in UTC so a given instant maps to the same week
//! (and therefore the same quest ids) everywhere.

use chrono::{Datelike, NaiveDate, Utc};

use crate::model::WeekStamp;

/// Source of "today"
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The system clock, read in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock pinned to one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Week number and year for a date
pub fn week_of(date: NaiveDate) -> WeekStamp {
    let day_of_year = date.ordinal0();
    let weekday = date.weekday().num_days_from_sunday();
    let jan1_weekday = (i64::from(weekday) - i64::from(day_of_year)).rem_euclid(7) as u32;
    let week_number = (day_of_year + jan1_weekday + 1).div_ceil(7);
    WeekStamp::new(week_number, date.year())
}

/// Week number and year for the clock's current date
pub fn current_week(clock: &impl Clock) -> WeekStamp {
    week_of(clock.today())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_partial_week_is_week_one() {
        // 2024-01-01 is a Monday
        assert_eq!(week_of(date(2024, 1, 1)), WeekStamp::new(1, 2024));
        assert_eq!(week_of(date(2024, 1, 6)), WeekStamp::new(1, 2024));
        assert_eq!(week_of(date(2024, 1, 7)), WeekStamp::new(2, 2024));
    }

    #[test]
    fn year_starting_on_sunday() {
        // 2023-01-01 is a Sunday
        assert_eq!(week_of(date(2023, 1, 1)), WeekStamp::new(1, 2023));
        assert_eq!(week_of(date(2023, 1, 7)), WeekStamp::new(1, 2023));
        assert_eq!(week_of(date(2023, 1, 8)), WeekStamp::new(2, 2023));
    }

    #[test]
    fn weeks_five_and_six_of_2024() {
        assert_eq!(week_of(date(2024, 1, 30)), WeekStamp::new(5, 2024));
        assert_eq!(week_of(date(2024, 2, 6)), WeekStamp::new(6, 2024));
    }

    #[test]
    fn end_of_leap_year() {
        assert_eq!(week_of(date(2024, 12, 31)), WeekStamp::new(53, 2024));
    }

    #[test]
    fn fixed_clock_reports_its_date() {
        let clock = FixedClock(date(2025, 3, 14));
        assert_eq!(current_week(&clock), week_of(date(2025, 3, 14)));
    }

    proptest! {
        #[test]
        fn sundays_start_new_weeks(ordinal in 1u32..=365) {
            let day = NaiveDate::from_yo_opt(2025, ordinal).unwrap();
            let previous = day.pred_opt().unwrap();
            let this_week = week_of(day);
            if day.weekday().num_days_from_sunday() == 0 && ordinal > 1 {
                prop_assert_eq!(this_week.week_number, week_of(previous).week_number + 1);
            } else if ordinal > 1 {
                prop_assert_eq!(this_week.week_number, week_of(previous).week_number);
            }
            prop_assert!((1..=54).contains(&this_week.week_number));
        }
    }
}
