//! Read-only selection constraints handed to the table generator.
use std::{collections::BTreeSet, fmt, sync::Arc};

use chrono::{Datelike, NaiveDate, Weekday};

use crate::{calendar::YearMonth, error::DatePanelError};

/// Decides which dates cannot be picked.
///
/// Closures of the form `Fn(NaiveDate) -> bool` implement this trait, where
/// `true` means the date is disabled.
pub trait DisabledDates: Send + Sync {
    /// Returns true when `date` must not be selectable.
    fn is_disabled(&self, _date: NaiveDate) -> bool {
        false
    }
}

impl<F> DisabledDates for F
where
    F: Fn(NaiveDate) -> bool + Send + Sync,
{
    fn is_disabled(&self, date: NaiveDate) -> bool {
        self(date)
    }
}

struct NeverDisabled;

impl DisabledDates for NeverDisabled {}

/// Disables whole weekdays and individual dates.
///
/// This is the predicate produced from configuration files, where closures
/// cannot be expressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisabledDateSet {
    weekdays: Vec<Weekday>,
    dates: BTreeSet<NaiveDate>,
}

impl DisabledDateSet {
    /// Creates a set from weekdays and explicit dates.
    pub fn new(
        weekdays: impl IntoIterator<Item = Weekday>,
        dates: impl IntoIterator<Item = NaiveDate>,
    ) -> Self {
        Self {
            weekdays: weekdays.into_iter().collect(),
            dates: dates.into_iter().collect(),
        }
    }

    /// Returns true when nothing is disabled.
    pub fn is_empty(&self) -> bool {
        self.weekdays.is_empty() && self.dates.is_empty()
    }
}

impl DisabledDates for DisabledDateSet {
    fn is_disabled(&self, date: NaiveDate) -> bool {
        self.weekdays.contains(&date.weekday()) || self.dates.contains(&date)
    }
}

/// Default values shared by panel arguments and constraints.
pub struct DatePanelDefaults;

impl DatePanelDefaults {
    /// First column of the date grid when the host does not choose one.
    pub const FIRST_DAY_OF_WEEK: Weekday = Weekday::Sun;

    /// A predicate that never disables anything.
    pub fn never_disabled() -> Arc<dyn DisabledDates> {
        Arc::new(NeverDisabled)
    }
}

/// Bounds and predicates applied to every generated cell.
#[derive(Clone)]
pub struct DateConstraints {
    min_date: Option<NaiveDate>,
    max_date: Option<NaiveDate>,
    first_day_of_week: Weekday,
    disable_date: Arc<dyn DisabledDates>,
}

impl DateConstraints {
    /// Creates constraints, rejecting a `min_date` that lies after `max_date`.
    pub fn new(
        min_date: Option<NaiveDate>,
        max_date: Option<NaiveDate>,
        first_day_of_week: Weekday,
        disable_date: Arc<dyn DisabledDates>,
    ) -> Result<Self, DatePanelError> {
        if let (Some(min), Some(max)) = (min_date, max_date)
            && min > max
        {
            return Err(DatePanelError::InvertedRange { min, max });
        }
        Ok(Self {
            min_date,
            max_date,
            first_day_of_week,
            disable_date,
        })
    }

    /// Returns the inclusive lower bound, if any.
    pub fn min_date(&self) -> Option<NaiveDate> {
        self.min_date
    }

    /// Returns the inclusive upper bound, if any.
    pub fn max_date(&self) -> Option<NaiveDate> {
        self.max_date
    }

    /// Returns the weekday shown in the first grid column.
    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    /// Returns true when `date` lies outside `[min_date, max_date]`.
    pub fn is_out_of_range(&self, date: NaiveDate) -> bool {
        self.min_date.is_some_and(|min| date < min) || self.max_date.is_some_and(|max| date > max)
    }

    /// Returns true when a single day cannot be selected.
    pub fn is_date_disabled(&self, date: NaiveDate) -> bool {
        self.is_out_of_range(date) || self.disable_date.is_disabled(date)
    }

    /// Returns true when every day of `month` is disabled.
    pub fn is_month_disabled(&self, month: YearMonth) -> bool {
        let entirely_before = self.min_date.is_some_and(|min| month.last_day() < min);
        let entirely_after = self.max_date.is_some_and(|max| month.first_day() > max);
        if entirely_before || entirely_after {
            return true;
        }
        month
            .first_day()
            .iter_days()
            .take(month.days_in_month() as usize)
            .all(|day| self.is_date_disabled(day))
    }

    /// Returns true when every month of `year` is disabled.
    pub fn is_year_disabled(&self, year: i32) -> bool {
        (0..12)
            .filter_map(|month0| YearMonth::new(year, month0))
            .all(|month| self.is_month_disabled(month))
    }
}

impl Default for DateConstraints {
    fn default() -> Self {
        Self {
            min_date: None,
            max_date: None,
            first_day_of_week: DatePanelDefaults::FIRST_DAY_OF_WEEK,
            disable_date: DatePanelDefaults::never_disabled(),
        }
    }
}

impl fmt::Debug for DateConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateConstraints")
            .field("min_date", &self.min_date)
            .field("max_date", &self.max_date)
            .field("first_day_of_week", &self.first_day_of_week)
            .finish_non_exhaustive()
    }
}
