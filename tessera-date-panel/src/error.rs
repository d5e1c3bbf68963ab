//! Errors raised while validating panel inputs.
use chrono::NaiveDate;
use thiserror::Error;

/// Boundary validation failures for date panel props and configuration.
///
/// The panel itself never fails once constructed; these errors only surface
/// when raw host input (strings, indices, config files) is turned into typed
/// arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatePanelError {
    /// The mode string is not one of `year`, `month` or `date`.
    #[error("invalid panel mode `{0}`, expected one of: year, month, date")]
    InvalidMode(String),
    /// First day of week index outside `0..=6`.
    #[error("invalid weekday index {0}, expected 0 (Sunday) through 6 (Saturday)")]
    InvalidFirstDayOfWeek(u8),
    /// `min_date` is after `max_date`.
    #[error("min date {min} is after max date {max}")]
    InvertedRange {
        /// Lower bound as configured.
        min: NaiveDate,
        /// Upper bound as configured.
        max: NaiveDate,
    },
    /// Date text that is not `YYYY-MM-DD`.
    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),
}
