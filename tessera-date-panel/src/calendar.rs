//! Calendar primitives and month stepping for the date panel.
//!
//! Month arithmetic never rolls a day over into the following month: adding
//! one month to January 31 yields the last day of February.
use chrono::{Datelike, Local, Months, NaiveDate, Weekday};

use crate::{error::DatePanelError, granularity::Granularity};

/// Returns the current local date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Adds `months` to `date`, clamping the day to the end of the target month.
///
/// Saturates at [`NaiveDate::MAX`] when the result leaves chrono's range.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(NaiveDate::MAX)
}

/// Subtracts `months` from `date`, clamping the day to the end of the target
/// month.
///
/// Saturates at [`NaiveDate::MIN`] when the result leaves chrono's range.
pub fn subtract_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(NaiveDate::MIN)
}

/// Maps a host weekday index (0 = Sunday .. 6 = Saturday) to a [`Weekday`].
pub fn weekday_from_index(index: u8) -> Result<Weekday, DatePanelError> {
    match index {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        other => Err(DatePanelError::InvalidFirstDayOfWeek(other)),
    }
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> Result<NaiveDate, DatePanelError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| DatePanelError::InvalidDate(text.to_string()))
}

/// Header navigation requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepDirection {
    /// Move back by one step of the active granularity.
    Previous,
    /// Move forward by one step of the active granularity.
    Next,
    /// Jump to the current real-world month.
    Today,
}

/// A displayed year and zero-based month.
///
/// Always backed by a valid first-of-month date, so `month0` stays within
/// `0..=11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first_day: NaiveDate,
}

impl YearMonth {
    /// Creates a year/month pair if `month0` is in `0..=11` and the year is
    /// representable.
    pub fn new(year: i32, month0: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month0.checked_add(1)?, 1)
            .map(|first_day| Self { first_day })
    }

    /// The year/month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// Returns the zero-based month (0 = January).
    pub fn month0(&self) -> u32 {
        self.first_day.month0()
    }

    /// Returns the first day of this month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Returns the last day of this month.
    pub fn last_day(&self) -> NaiveDate {
        add_months(self.first_day, 1).pred_opt().unwrap_or(self.first_day)
    }

    /// Number of days in this month.
    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// Keeps the month and replaces the year.
    pub fn with_year(self, year: i32) -> Self {
        YearMonth::new(year, self.month0()).unwrap_or(self)
    }

    /// Applies one header step of `granularity` in `direction`.
    ///
    /// `today` is only consulted for [`StepDirection::Today`].
    pub fn step(
        self,
        direction: StepDirection,
        granularity: Granularity,
        today: NaiveDate,
    ) -> Self {
        let months = granularity.step_months();
        match direction {
            StepDirection::Previous => Self::from_date(subtract_months(self.first_day, months)),
            StepDirection::Next => Self::from_date(add_months(self.first_day, months)),
            StepDirection::Today => Self::from_date(today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_months_clamps_to_month_end() {
        assert_eq!(add_months(date(2023, 1, 31), 1), date(2023, 2, 28));
        assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(add_months(date(2024, 3, 31), 1), date(2024, 4, 30));
        assert_eq!(add_months(date(2024, 8, 31), 1), date(2024, 9, 30));
    }

    #[test]
    fn subtract_months_clamps_to_month_end() {
        assert_eq!(subtract_months(date(2024, 3, 31), 1), date(2024, 2, 29));
        assert_eq!(subtract_months(date(2023, 3, 29), 1), date(2023, 2, 28));
        assert_eq!(subtract_months(date(2024, 2, 29), 12), date(2023, 2, 28));
    }

    #[test]
    fn month_arithmetic_crosses_year_boundaries() {
        assert_eq!(add_months(date(2024, 12, 15), 1), date(2025, 1, 15));
        assert_eq!(subtract_months(date(2024, 1, 15), 1), date(2023, 12, 15));
        assert_eq!(add_months(date(2024, 6, 1), 120), date(2034, 6, 1));
        assert_eq!(subtract_months(date(2024, 6, 1), 120), date(2014, 6, 1));
    }

    #[test]
    fn round_trip_is_exact_without_clamping() {
        for month in 1..=12 {
            for day in [1, 15, 28] {
                let start = date(2024, month, day);
                for n in [0, 1, 5, 11, 12, 13, 120] {
                    assert_eq!(subtract_months(add_months(start, n), n), start);
                }
            }
        }
    }

    #[test]
    fn round_trip_lands_on_clamped_day() {
        let start = date(2024, 1, 31);
        assert_eq!(subtract_months(add_months(start, 1), 1), date(2024, 1, 29));
        assert_eq!(subtract_months(add_months(start, 2), 2), date(2024, 1, 31));
    }

    #[test]
    fn arithmetic_saturates_at_range_edges() {
        assert_eq!(add_months(NaiveDate::MAX, 1), NaiveDate::MAX);
        assert_eq!(subtract_months(NaiveDate::MIN, 1), NaiveDate::MIN);
    }

    #[test]
    fn weekday_index_follows_sunday_first_numbering() {
        assert_eq!(weekday_from_index(0), Ok(Weekday::Sun));
        assert_eq!(weekday_from_index(1), Ok(Weekday::Mon));
        assert_eq!(weekday_from_index(6), Ok(Weekday::Sat));
        assert_eq!(
            weekday_from_index(7),
            Err(DatePanelError::InvalidFirstDayOfWeek(7))
        );
    }

    #[test]
    fn parse_date_accepts_iso_only() {
        assert_eq!(parse_date("2024-03-10"), Ok(date(2024, 3, 10)));
        assert_eq!(parse_date(" 2024-03-10 "), Ok(date(2024, 3, 10)));
        assert!(parse_date("10/03/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn year_month_rejects_out_of_range_month() {
        assert!(YearMonth::new(2024, 12).is_none());
        let march = YearMonth::new(2024, 2).unwrap();
        assert_eq!(march.year(), 2024);
        assert_eq!(march.month0(), 2);
        assert_eq!(march.days_in_month(), 31);
        assert_eq!(YearMonth::new(2024, 1).unwrap().days_in_month(), 29);
    }

    #[test]
    fn step_moves_by_granularity() {
        let today = date(2030, 7, 4);
        let start = YearMonth::new(2024, 0).unwrap();

        let prev = start.step(StepDirection::Previous, Granularity::Date, today);
        assert_eq!((prev.year(), prev.month0()), (2023, 11));

        let next = start.step(StepDirection::Next, Granularity::Month, today);
        assert_eq!((next.year(), next.month0()), (2025, 0));

        let decade = start.step(StepDirection::Next, Granularity::Year, today);
        assert_eq!((decade.year(), decade.month0()), (2034, 0));

        let now = start.step(StepDirection::Today, Granularity::Year, today);
        assert_eq!((now.year(), now.month0()), (2030, 6));
    }
}
