//! Year, month and date panel logic for tessera date pickers.
//!
//! The panel shows one of three grids (a decade of years, the twelve months
//! of a year, or six weeks of days) and drills from coarse to fine until a
//! click lands on the configured mode, at which point the selection is
//! reported through the change handler.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use tessera_date_panel::{DatePanelArgs, DatePanelState, Granularity, StepDirection};
//!
//! let args = DatePanelArgs::default()
//!     .value(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
//!     .mode(Granularity::Month)
//!     .on_change(|date| println!("picked {date}"));
//! let mut panel = DatePanelState::from_args(args).unwrap();
//!
//! panel.step(StepDirection::Next);
//! assert_eq!(panel.displayed_year(), 2025);
//!
//! for row in panel.table().rows() {
//!     let labels: Vec<String> = row.iter().map(|cell| cell.label()).collect();
//!     println!("{}", labels.join(" "));
//! }
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod calendar;
#[cfg(feature = "serde")]
pub mod config;
pub mod constraints;
pub mod error;
pub mod granularity;
pub mod panel;
pub mod table;

pub use calendar::{StepDirection, YearMonth, add_months, subtract_months};
#[cfg(feature = "serde")]
pub use config::DatePanelConfig;
pub use constraints::{DateConstraints, DatePanelDefaults, DisabledDateSet, DisabledDates};
pub use error::DatePanelError;
pub use granularity::Granularity;
pub use panel::{ChangeHandler, DatePanelArgs, DatePanelHeader, DatePanelState, SelectOutcome};
pub use table::{Cell, CellKind, TableData};
