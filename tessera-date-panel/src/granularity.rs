//! View granularity shared by the panel mode and the active grid.
use std::{fmt, str::FromStr};

use crate::error::DatePanelError;

/// Precision level of the displayed grid.
///
/// Variants are ordered coarse to fine, so `Granularity::Year <
/// Granularity::Date` holds and the configured mode can act as a ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Granularity {
    /// A decade of year cells.
    Year,
    /// Twelve month cells of one year.
    Month,
    /// Day cells of one month.
    #[default]
    Date,
}

impl Granularity {
    /// Number of months one header step moves at this granularity.
    pub const fn step_months(self) -> u32 {
        match self {
            Granularity::Date => 1,
            Granularity::Month => 12,
            Granularity::Year => 120,
        }
    }

    /// The next finer granularity, if any.
    pub const fn finer(self) -> Option<Self> {
        match self {
            Granularity::Year => Some(Granularity::Month),
            Granularity::Month => Some(Granularity::Date),
            Granularity::Date => None,
        }
    }

    /// Lowercase name used by hosts and configuration files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Granularity::Year => "year",
            Granularity::Month => "month",
            Granularity::Date => "date",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = DatePanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(Granularity::Year),
            "month" => Ok(Granularity::Month),
            "date" => Ok(Granularity::Date),
            other => Err(DatePanelError::InvalidMode(other.to_string())),
        }
    }
}
