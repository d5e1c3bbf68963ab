//! Declarative panel configuration loaded from TOML or JSON.
//!
//! Values stay textual until [`DatePanelConfig::into_args`] so that invalid
//! modes, weekdays and dates are reported as [`DatePanelError`]s instead of
//! opaque deserializer failures.
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    calendar::{parse_date, weekday_from_index},
    constraints::DisabledDateSet,
    error::DatePanelError,
    granularity::Granularity,
    panel::DatePanelArgs,
};

/// Serializable form of [`DatePanelArgs`].
///
/// ```toml
/// mode = "month"
/// value = "2024-03-10"
/// min_date = "2020-01-01"
/// first_day_of_week = 1
/// disabled_weekdays = [0, 6]
/// disabled_dates = ["2024-12-25"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatePanelConfig {
    /// `year`, `month` or `date`.
    pub mode: Option<String>,
    /// Selected date; today when absent.
    pub value: Option<String>,
    /// Inclusive lower bound.
    pub min_date: Option<String>,
    /// Inclusive upper bound.
    pub max_date: Option<String>,
    /// 0 = Sunday through 6 = Saturday.
    pub first_day_of_week: Option<u8>,
    /// Weekdays that can never be selected, same numbering.
    pub disabled_weekdays: Vec<u8>,
    /// Individual dates that can never be selected.
    pub disabled_dates: Vec<String>,
}

impl DatePanelConfig {
    /// Validates every field and builds panel arguments.
    pub fn into_args(self) -> Result<DatePanelArgs, DatePanelError> {
        let mut args = DatePanelArgs::default();
        if let Some(mode) = &self.mode {
            args.mode = mode.parse::<Granularity>()?;
        }
        if let Some(value) = &self.value {
            args.value = parse_date(value)?;
        }
        args.min_date = self.min_date.as_deref().map(parse_date).transpose()?;
        args.max_date = self.max_date.as_deref().map(parse_date).transpose()?;
        if let Some(index) = self.first_day_of_week {
            args.first_day_of_week = weekday_from_index(index)?;
        }

        let weekdays = self
            .disabled_weekdays
            .iter()
            .map(|index| weekday_from_index(*index))
            .collect::<Result<Vec<_>, _>>()?;
        let dates = self
            .disabled_dates
            .iter()
            .map(|text| parse_date(text))
            .collect::<Result<Vec<_>, _>>()?;
        let disabled = DisabledDateSet::new(weekdays, dates);
        if !disabled.is_empty() {
            args.disable_date = Arc::new(disabled);
        }

        // Surface inverted bounds here rather than at panel construction.
        args.constraints()?;
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Weekday};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn toml_config_builds_args() {
        let config: DatePanelConfig = toml::from_str(
            r#"
            mode = "month"
            value = "2024-03-10"
            min_date = "2020-01-01"
            max_date = "2030-12-31"
            first_day_of_week = 1
            disabled_weekdays = [0, 6]
            disabled_dates = ["2024-12-25"]
            "#,
        )
        .unwrap();
        let args = config.into_args().unwrap();
        assert_eq!(args.mode, Granularity::Month);
        assert_eq!(args.value, date(2024, 3, 10));
        assert_eq!(args.min_date, Some(date(2020, 1, 1)));
        assert_eq!(args.first_day_of_week, Weekday::Mon);

        let constraints = args.constraints().unwrap();
        assert!(constraints.is_date_disabled(date(2024, 3, 9)));
        assert!(constraints.is_date_disabled(date(2024, 12, 25)));
        assert!(!constraints.is_date_disabled(date(2024, 3, 11)));
        assert!(constraints.is_date_disabled(date(2019, 12, 31)));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let args = DatePanelConfig::default().into_args().unwrap();
        assert_eq!(args.mode, Granularity::Date);
        assert_eq!(args.first_day_of_week, Weekday::Sun);
        assert_eq!(args.min_date, None);
    }

    #[test]
    fn invalid_fields_are_rejected() {
        let bad_mode = DatePanelConfig {
            mode: Some("week".into()),
            ..Default::default()
        };
        assert_eq!(
            bad_mode.into_args().unwrap_err(),
            DatePanelError::InvalidMode("week".into())
        );

        let bad_weekday = DatePanelConfig {
            disabled_weekdays: vec![9],
            ..Default::default()
        };
        assert_eq!(
            bad_weekday.into_args().unwrap_err(),
            DatePanelError::InvalidFirstDayOfWeek(9)
        );

        let bad_date = DatePanelConfig {
            value: Some("2024-13-01".into()),
            ..Default::default()
        };
        assert!(matches!(
            bad_date.into_args(),
            Err(DatePanelError::InvalidDate(_))
        ));

        let inverted = DatePanelConfig {
            min_date: Some("2024-05-01".into()),
            max_date: Some("2024-01-01".into()),
            ..Default::default()
        };
        assert!(matches!(
            inverted.into_args(),
            Err(DatePanelError::InvertedRange { .. })
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed =
            serde_json::from_str::<DatePanelConfig>(r#"{"mode": "date", "theme": "dark"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn granularity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Granularity::Month).unwrap(),
            "\"month\""
        );
        assert_eq!(
            serde_json::from_str::<Granularity>("\"year\"").unwrap(),
            Granularity::Year
        );
    }
}
