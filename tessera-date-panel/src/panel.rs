//! View-state controller for the year / month / date panel.
//!
//! ## Usage
//!
//! Hosts own a [`DatePanelState`], render [`DatePanelState::table`] and
//! [`DatePanelState::header`], and forward clicks and header navigation back
//! into it. Prop changes are explicit: call
//! [`DatePanelState::on_value_changed`] and [`DatePanelState::on_mode_changed`]
//! when the corresponding inputs change.
//!
//! ```
//! use chrono::NaiveDate;
//! use tessera_date_panel::{DatePanelArgs, DatePanelState, Granularity, SelectOutcome};
//!
//! let value = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! let mut panel = DatePanelState::from_args(DatePanelArgs::default().value(value)).unwrap();
//!
//! let march = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
//! panel.select_cell(march, Granularity::Month);
//! assert_eq!(panel.granularity(), Granularity::Date);
//! assert_eq!(panel.select_cell(march, Granularity::Date), SelectOutcome::Changed(march));
//! ```
use std::{fmt, sync::Arc};

use chrono::{Datelike, NaiveDate, Weekday};
use derive_setters::Setters;
use tracing::debug;

use crate::{
    calendar::{self, StepDirection, YearMonth},
    constraints::{DateConstraints, DatePanelDefaults, DisabledDates},
    error::DatePanelError,
    granularity::Granularity,
    table::{self, Cell, TableData, YEARS_PER_PAGE},
};

/// Handler invoked once per terminal selection.
pub type ChangeHandler = Arc<dyn Fn(NaiveDate) + Send + Sync>;

/// Props accepted by [`DatePanelState::from_args`].
#[derive(Clone, Setters)]
pub struct DatePanelArgs {
    /// Selected date. Seeds the displayed year and month.
    pub value: NaiveDate,
    /// Finest granularity the panel drills to; clicks at this level emit.
    pub mode: Granularity,
    /// Inclusive lower bound for selectable dates.
    #[setters(strip_option)]
    pub min_date: Option<NaiveDate>,
    /// Inclusive upper bound for selectable dates.
    #[setters(strip_option)]
    pub max_date: Option<NaiveDate>,
    /// Weekday shown in the first column of the date grid.
    pub first_day_of_week: Weekday,
    /// Predicate disabling individual dates.
    #[setters(skip)]
    pub disable_date: Arc<dyn DisabledDates>,
    /// Change handler for terminal selections.
    #[setters(skip)]
    pub on_change: Option<ChangeHandler>,
}

impl DatePanelArgs {
    /// Sets the disable predicate from a closure returning true for disabled
    /// dates.
    pub fn disable_date<F>(mut self, f: F) -> Self
    where
        F: Fn(NaiveDate) -> bool + Send + Sync + 'static,
    {
        self.disable_date = Arc::new(f);
        self
    }

    /// Sets the disable predicate using a shared policy.
    pub fn disable_date_shared(mut self, policy: Arc<dyn DisabledDates>) -> Self {
        self.disable_date = policy;
        self
    }

    /// Sets the change handler.
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: Fn(NaiveDate) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(f));
        self
    }

    /// Sets the change handler using a shared callback.
    pub fn on_change_shared(mut self, f: ChangeHandler) -> Self {
        self.on_change = Some(f);
        self
    }

    /// Validates the bounds and builds the generator constraints.
    pub fn constraints(&self) -> Result<DateConstraints, DatePanelError> {
        DateConstraints::new(
            self.min_date,
            self.max_date,
            self.first_day_of_week,
            self.disable_date.clone(),
        )
    }
}

impl Default for DatePanelArgs {
    fn default() -> Self {
        Self {
            value: calendar::today(),
            mode: Granularity::Date,
            min_date: None,
            max_date: None,
            first_day_of_week: DatePanelDefaults::FIRST_DAY_OF_WEEK,
            disable_date: DatePanelDefaults::never_disabled(),
            on_change: None,
        }
    }
}

impl fmt::Debug for DatePanelArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePanelArgs")
            .field("value", &self.value)
            .field("mode", &self.mode)
            .field("min_date", &self.min_date)
            .field("max_date", &self.max_date)
            .field("first_day_of_week", &self.first_day_of_week)
            .field("on_change", &self.on_change.is_some())
            .finish_non_exhaustive()
    }
}

/// Result of a cell selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Terminal selection; the change handler has been called with the date.
    Changed(NaiveDate),
    /// The panel narrowed its view instead of finalizing a value.
    DrilledDown {
        /// Granularity after the drill-down.
        granularity: Granularity,
        /// Year and month now displayed.
        displayed: YearMonth,
    },
    /// The clicked cell is disabled.
    Ignored,
}

/// Header content for the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePanelHeader {
    /// Displayed year.
    pub year: i32,
    /// Displayed zero-based month.
    pub month0: u32,
    /// Active granularity.
    pub granularity: Granularity,
    /// Title text, e.g. `Mar 2024`, `2024` or `2020 - 2029`.
    pub title: String,
    /// Column labels for the date grid; empty for month and year grids.
    pub weekday_labels: Vec<&'static str>,
}

/// Displayed period, active granularity and selection state of a date panel.
pub struct DatePanelState {
    value: NaiveDate,
    mode: Granularity,
    displayed: YearMonth,
    granularity: Granularity,
    constraints: DateConstraints,
    on_change: Option<ChangeHandler>,
}

impl DatePanelState {
    /// Initializes the panel at `value`, showing the `mode` grid.
    pub fn new(value: NaiveDate, mode: Granularity) -> Self {
        Self {
            value,
            mode,
            displayed: YearMonth::from_date(value),
            granularity: mode,
            constraints: DateConstraints::default(),
            on_change: None,
        }
    }

    /// Initializes the panel from host props.
    pub fn from_args(args: DatePanelArgs) -> Result<Self, DatePanelError> {
        let constraints = args.constraints()?;
        let mut state = Self::new(args.value, args.mode);
        state.constraints = constraints;
        state.on_change = args.on_change;
        debug!(
            value = %state.value,
            mode = %state.mode,
            "initialized date panel"
        );
        Ok(state)
    }

    /// Returns the selected value.
    pub fn value(&self) -> NaiveDate {
        self.value
    }

    /// Returns the configured mode.
    pub fn mode(&self) -> Granularity {
        self.mode
    }

    /// Returns the granularity of the visible grid.
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Returns the displayed year and month.
    pub fn displayed(&self) -> YearMonth {
        self.displayed
    }

    /// Returns the displayed year.
    pub fn displayed_year(&self) -> i32 {
        self.displayed.year()
    }

    /// Returns the displayed zero-based month.
    pub fn displayed_month0(&self) -> u32 {
        self.displayed.month0()
    }

    /// Returns the active constraints.
    pub fn constraints(&self) -> &DateConstraints {
        &self.constraints
    }

    /// Replaces the constraints used by later table recomputes.
    pub fn set_constraints(&mut self, constraints: DateConstraints) {
        self.constraints = constraints;
    }

    /// Replaces the change handler.
    pub fn set_on_change(&mut self, on_change: Option<ChangeHandler>) {
        self.on_change = on_change;
    }

    /// Resets the granularity to a new mode.
    pub fn on_mode_changed(&mut self, mode: Granularity) {
        debug!(from = %self.mode, to = %mode, "date panel mode changed");
        self.mode = mode;
        self.granularity = mode;
    }

    /// Re-seeds the displayed year and month from a new value.
    pub fn on_value_changed(&mut self, value: NaiveDate) {
        debug!(%value, "date panel value changed");
        self.value = value;
        self.displayed = YearMonth::from_date(value);
    }

    /// Handles a click on a `clicked`-granularity cell selecting `date`.
    ///
    /// Date clicks always emit. Month and year clicks emit when the mode
    /// stops at their level and otherwise drill one level finer.
    pub fn select_cell(&mut self, date: NaiveDate, clicked: Granularity) -> SelectOutcome {
        match clicked {
            Granularity::Date => self.emit(date),
            Granularity::Month => {
                if self.mode == Granularity::Month {
                    self.emit(date)
                } else {
                    self.drill_down(Granularity::Date, YearMonth::from_date(date))
                }
            }
            Granularity::Year => {
                if self.mode == Granularity::Year {
                    self.emit(date)
                } else {
                    let displayed = self.displayed.with_year(date.year());
                    self.drill_down(Granularity::Month, displayed)
                }
            }
        }
    }

    /// Handles a grid click at the current granularity.
    pub fn click(&mut self, date: NaiveDate) -> SelectOutcome {
        self.select_cell(date, self.granularity)
    }

    /// Handles a click on a generated cell, ignoring disabled ones.
    pub fn click_cell(&mut self, cell: &Cell) -> SelectOutcome {
        if cell.is_disabled {
            debug!(date = %cell.date, "ignored click on disabled cell");
            return SelectOutcome::Ignored;
        }
        self.select_cell(cell.date, cell.kind.granularity())
    }

    /// Switches the visible grid from the header, never finer than the mode.
    ///
    /// Returns the granularity actually applied.
    pub fn switch_view(&mut self, granularity: Granularity) -> Granularity {
        let applied = granularity.min(self.mode);
        debug!(requested = %granularity, %applied, "date panel view switched");
        self.granularity = applied;
        applied
    }

    /// Moves the displayed period by one header step.
    pub fn step(&mut self, direction: StepDirection) {
        self.step_with_today(direction, calendar::today());
    }

    /// Like [`DatePanelState::step`], with an explicit current date.
    pub fn step_with_today(&mut self, direction: StepDirection, today: NaiveDate) {
        let next = self.displayed.step(direction, self.granularity, today);
        debug!(
            ?direction,
            granularity = %self.granularity,
            year = next.year(),
            month0 = next.month0(),
            "date panel stepped"
        );
        self.displayed = next;
    }

    /// Generates the grid for the current view.
    pub fn table(&self) -> TableData {
        self.table_with_today(calendar::today())
    }

    /// Like [`DatePanelState::table`], with an explicit current date.
    pub fn table_with_today(&self, today: NaiveDate) -> TableData {
        table::build(
            self.displayed,
            self.granularity,
            self.active_anchor(),
            &self.constraints,
            today,
        )
    }

    /// Describes the header for the current view.
    pub fn header(&self) -> DatePanelHeader {
        let year = self.displayed.year();
        let (title, weekday_labels) = match self.granularity {
            Granularity::Date => (
                format!("{} {year}", table::month_short_name(self.displayed.month0())),
                table::weekday_labels(self.constraints.first_day_of_week()).to_vec(),
            ),
            Granularity::Month => (year.to_string(), Vec::new()),
            Granularity::Year => {
                let start = table::decade_start(year);
                (
                    format!("{start} - {}", start + YEARS_PER_PAGE - 1),
                    Vec::new(),
                )
            }
        };
        DatePanelHeader {
            year,
            month0: self.displayed.month0(),
            granularity: self.granularity,
            title,
            weekday_labels,
        }
    }

    fn active_anchor(&self) -> NaiveDate {
        if self.granularity == Granularity::Date || self.granularity == self.mode {
            self.value
        } else {
            self.displayed.first_day()
        }
    }

    fn emit(&self, date: NaiveDate) -> SelectOutcome {
        debug!(%date, mode = %self.mode, "date panel selection changed");
        if let Some(on_change) = &self.on_change {
            on_change(date);
        }
        SelectOutcome::Changed(date)
    }

    fn drill_down(&mut self, granularity: Granularity, displayed: YearMonth) -> SelectOutcome {
        debug!(
            from = %self.granularity,
            to = %granularity,
            year = displayed.year(),
            month0 = displayed.month0(),
            "date panel drilled down"
        );
        self.granularity = granularity;
        self.displayed = displayed;
        SelectOutcome::DrilledDown {
            granularity,
            displayed,
        }
    }
}

impl fmt::Debug for DatePanelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePanelState")
            .field("value", &self.value)
            .field("mode", &self.mode)
            .field("displayed", &self.displayed)
            .field("granularity", &self.granularity)
            .field("constraints", &self.constraints)
            .finish_non_exhaustive()
    }
}
