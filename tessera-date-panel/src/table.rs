//! Table data generation for the year, month and date grids.
//!
//! Every function here is pure: the same view and constraints always produce
//! the same cells, and tables are rebuilt from scratch on each recompute.
use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::{calendar::YearMonth, constraints::DateConstraints, granularity::Granularity};

/// Columns of the date grid.
pub const DATE_COLUMNS: usize = 7;
/// Rows of the date grid, enough for any month at any first weekday.
pub const DATE_ROWS: usize = 6;
/// Columns of the month and year grids.
pub const PERIOD_COLUMNS: usize = 4;
/// Year cells shown per year page.
pub const YEARS_PER_PAGE: i32 = 10;

/// Where a cell sits relative to the displayed period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Padding day from the month before the displayed one.
    PreviousMonth,
    /// Day of the displayed month.
    CurrentMonth,
    /// Padding day from the month after the displayed one.
    NextMonth,
    /// A month of the displayed year.
    Month,
    /// A year of the displayed decade.
    Year,
}

impl CellKind {
    /// Returns true for padding days borrowed from adjacent months.
    pub fn is_padding(self) -> bool {
        matches!(self, CellKind::PreviousMonth | CellKind::NextMonth)
    }

    /// Granularity a click on this cell selects at.
    pub fn granularity(self) -> Granularity {
        match self {
            CellKind::PreviousMonth | CellKind::CurrentMonth | CellKind::NextMonth => {
                Granularity::Date
            }
            CellKind::Month => Granularity::Month,
            CellKind::Year => Granularity::Year,
        }
    }
}

/// One selectable grid entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The date this cell selects. Month and year cells use the first day of
    /// their period.
    pub date: NaiveDate,
    /// Position of the cell relative to the displayed period.
    pub kind: CellKind,
    /// Matches the active anchor at the grid's granularity.
    pub is_active: bool,
    /// Cannot be selected.
    pub is_disabled: bool,
    /// Contains the current real-world date.
    pub is_today: bool,
}

impl Cell {
    /// Text shown inside the cell.
    pub fn label(&self) -> String {
        match self.kind {
            CellKind::PreviousMonth | CellKind::CurrentMonth | CellKind::NextMonth => {
                self.date.day().to_string()
            }
            CellKind::Month => month_short_name(self.date.month0()).to_string(),
            CellKind::Year => self.date.year().to_string(),
        }
    }
}

/// Cells of one grid, grouped into display rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableData {
    granularity: Granularity,
    rows: Vec<Vec<Cell>>,
}

impl TableData {
    fn from_cells(granularity: Granularity, cells: Vec<Cell>, columns: usize) -> Self {
        let rows = cells.chunks(columns).map(<[Cell]>::to_vec).collect();
        Self { granularity, rows }
    }

    /// Granularity of every cell in this table.
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Display rows in order.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Iterates cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    /// Cells flagged active.
    pub fn active_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells().filter(|cell| cell.is_active)
    }

    /// Finds the cell selecting `date` at this table's granularity.
    pub fn find(&self, date: NaiveDate) -> Option<&Cell> {
        self.cells().find(|cell| is_same(cell.date, date, self.granularity))
    }
}

/// Returns true when `a` and `b` fall in the same period of `granularity`.
pub fn is_same(a: NaiveDate, b: NaiveDate, granularity: Granularity) -> bool {
    match granularity {
        Granularity::Year => a.year() == b.year(),
        Granularity::Month => a.year() == b.year() && a.month0() == b.month0(),
        Granularity::Date => a == b,
    }
}

/// First year of the page containing `year`.
pub fn decade_start(year: i32) -> i32 {
    year.div_euclid(YEARS_PER_PAGE) * YEARS_PER_PAGE
}

/// Day cells of `month`, padded to six full weeks.
pub fn weeks(month: YearMonth, constraints: &DateConstraints, today: NaiveDate) -> TableData {
    let first = month.first_day();
    let offset = leading_days(first.weekday(), constraints.first_day_of_week());
    let start = first.checked_sub_days(Days::new(offset)).unwrap_or(first);

    let cells = start
        .iter_days()
        .take(DATE_COLUMNS * DATE_ROWS)
        .map(|date| {
            let kind = match YearMonth::from_date(date).cmp(&month) {
                std::cmp::Ordering::Less => CellKind::PreviousMonth,
                std::cmp::Ordering::Equal => CellKind::CurrentMonth,
                std::cmp::Ordering::Greater => CellKind::NextMonth,
            };
            Cell {
                date,
                kind,
                is_active: false,
                is_disabled: constraints.is_date_disabled(date),
                is_today: date == today,
            }
        })
        .collect();
    TableData::from_cells(Granularity::Date, cells, DATE_COLUMNS)
}

/// Twelve month cells of `year`.
pub fn months(year: i32, constraints: &DateConstraints, today: NaiveDate) -> TableData {
    let cells = (0..12)
        .filter_map(|month0| YearMonth::new(year, month0))
        .map(|month| Cell {
            date: month.first_day(),
            kind: CellKind::Month,
            is_active: false,
            is_disabled: constraints.is_month_disabled(month),
            is_today: is_same(month.first_day(), today, Granularity::Month),
        })
        .collect();
    TableData::from_cells(Granularity::Month, cells, PERIOD_COLUMNS)
}

/// Year cells of the decade containing `year`.
pub fn years(year: i32, constraints: &DateConstraints, today: NaiveDate) -> TableData {
    let start = decade_start(year);
    let cells = (start..start + YEARS_PER_PAGE)
        .filter_map(|page_year| YearMonth::new(page_year, 0))
        .map(|january| Cell {
            date: january.first_day(),
            kind: CellKind::Year,
            is_active: false,
            is_disabled: constraints.is_year_disabled(january.year()),
            is_today: january.year() == today.year(),
        })
        .collect();
    TableData::from_cells(Granularity::Year, cells, PERIOD_COLUMNS)
}

/// Flags every cell in the same `granularity` period as `anchor`.
pub fn flag_active(table: TableData, anchor: NaiveDate, granularity: Granularity) -> TableData {
    let rows = table
        .rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| Cell {
                    is_active: is_same(cell.date, anchor, granularity),
                    ..cell
                })
                .collect()
        })
        .collect();
    TableData {
        granularity: table.granularity,
        rows,
    }
}

/// Generates the grid for a view and flags the cells matching `anchor`.
pub fn build(
    month: YearMonth,
    granularity: Granularity,
    anchor: NaiveDate,
    constraints: &DateConstraints,
    today: NaiveDate,
) -> TableData {
    let table = match granularity {
        Granularity::Date => weeks(month, constraints, today),
        Granularity::Month => months(month.year(), constraints, today),
        Granularity::Year => years(month.year(), constraints, today),
    };
    tracing::trace!(
        %granularity,
        year = month.year(),
        month0 = month.month0(),
        rows = table.rows.len(),
        "rebuilt date panel table"
    );
    flag_active(table, anchor, granularity)
}

/// Short weekday labels in column order, starting at `first_day_of_week`.
pub fn weekday_labels(first_day_of_week: Weekday) -> [&'static str; DATE_COLUMNS] {
    let mut labels = [""; DATE_COLUMNS];
    let mut day = first_day_of_week;
    for slot in &mut labels {
        *slot = weekday_short_name(day);
        day = day.succ();
    }
    labels
}

/// Abbreviated month name for a zero-based month.
pub fn month_short_name(month0: u32) -> &'static str {
    match month0 {
        0 => "Jan",
        1 => "Feb",
        2 => "Mar",
        3 => "Apr",
        4 => "May",
        5 => "Jun",
        6 => "Jul",
        7 => "Aug",
        8 => "Sep",
        9 => "Oct",
        10 => "Nov",
        _ => "Dec",
    }
}

fn weekday_short_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

fn leading_days(first_weekday: Weekday, first_day_of_week: Weekday) -> u64 {
    let first = i64::from(first_weekday.num_days_from_sunday());
    let column_zero = i64::from(first_day_of_week.num_days_from_sunday());
    (first - column_zero).rem_euclid(DATE_COLUMNS as i64) as u64
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, month0: u32) -> YearMonth {
        YearMonth::new(y, month0).unwrap()
    }

    fn starting_on(first_day_of_week: Weekday) -> DateConstraints {
        DateConstraints::new(
            None,
            None,
            first_day_of_week,
            crate::constraints::DatePanelDefaults::never_disabled(),
        )
        .unwrap()
    }

    #[test]
    fn date_grid_is_six_full_weeks() {
        let table = weeks(month(2024, 2), &DateConstraints::default(), date(2000, 1, 1));
        assert_eq!(table.rows().len(), DATE_ROWS);
        assert!(table.rows().iter().all(|row| row.len() == DATE_COLUMNS));
        assert_eq!(table.granularity(), Granularity::Date);
    }

    #[test]
    fn date_grid_respects_first_day_of_week() {
        // March 1st 2024 is a Friday.
        let sunday_first = weeks(month(2024, 2), &starting_on(Weekday::Sun), date(2000, 1, 1));
        assert_eq!(sunday_first.rows()[0][0].date, date(2024, 2, 25));
        assert_eq!(sunday_first.rows()[0][5].date, date(2024, 3, 1));

        let monday_first = weeks(month(2024, 2), &starting_on(Weekday::Mon), date(2000, 1, 1));
        assert_eq!(monday_first.rows()[0][0].date, date(2024, 2, 26));
        assert_eq!(monday_first.rows()[0][4].date, date(2024, 3, 1));

        let friday_first = weeks(month(2024, 2), &starting_on(Weekday::Fri), date(2000, 1, 1));
        assert_eq!(friday_first.rows()[0][0].date, date(2024, 3, 1));
    }

    #[test]
    fn date_grid_marks_padding_days() {
        let table = weeks(month(2024, 2), &starting_on(Weekday::Sun), date(2000, 1, 1));
        let kinds: Vec<CellKind> = table.cells().map(|cell| cell.kind).collect();
        assert_eq!(kinds[0], CellKind::PreviousMonth);
        assert_eq!(kinds[5], CellKind::CurrentMonth);
        assert_eq!(
            kinds.iter().filter(|kind| **kind == CellKind::CurrentMonth).count(),
            31
        );
        assert_eq!(kinds[41], CellKind::NextMonth);
        assert!(kinds[41].is_padding());
    }

    #[test]
    fn month_grid_has_twelve_cells_in_rows_of_four() {
        let table = months(2024, &DateConstraints::default(), date(2024, 5, 9));
        assert_eq!(table.rows().len(), 3);
        assert_eq!(table.cells().count(), 12);
        assert_eq!(table.rows()[1][0].date, date(2024, 5, 1));
        assert_eq!(table.rows()[1][0].label(), "May");
        let today: Vec<_> = table.cells().filter(|cell| cell.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, date(2024, 5, 1));
    }

    #[test]
    fn year_grid_covers_containing_decade() {
        let table = years(2024, &DateConstraints::default(), date(2024, 5, 9));
        let years: Vec<i32> = table.cells().map(|cell| cell.date.year()).collect();
        assert_eq!(years, (2020..=2029).collect::<Vec<_>>());
        assert_eq!(table.rows().len(), 3);
        assert_eq!(table.rows()[2].len(), 2);
        assert_eq!(table.rows()[0][0].label(), "2020");
    }

    #[test]
    fn decade_start_floors_negative_years() {
        assert_eq!(decade_start(2029), 2020);
        assert_eq!(decade_start(2030), 2030);
        assert_eq!(decade_start(-1), -10);
    }

    #[test]
    fn disabled_flags_follow_constraints() {
        let constraints = DateConstraints::new(
            Some(date(2024, 3, 5)),
            Some(date(2024, 3, 28)),
            Weekday::Sun,
            Arc::new(|d: NaiveDate| d.weekday() == Weekday::Wed),
        )
        .unwrap();
        let table = weeks(month(2024, 2), &constraints, date(2000, 1, 1));
        let cell = |d| *table.find(d).unwrap();
        assert!(cell(date(2024, 3, 4)).is_disabled);
        assert!(!cell(date(2024, 3, 5)).is_disabled);
        assert!(cell(date(2024, 3, 6)).is_disabled);
        assert!(cell(date(2024, 3, 29)).is_disabled);

        let months = months(2024, &constraints, date(2000, 1, 1));
        let enabled: Vec<u32> = months
            .cells()
            .filter(|cell| !cell.is_disabled)
            .map(|cell| cell.date.month())
            .collect();
        assert_eq!(enabled, vec![3]);
    }

    #[test]
    fn flag_active_matches_anchor_period() {
        let anchor = date(2024, 3, 10);
        let table = build(
            month(2024, 2),
            Granularity::Date,
            anchor,
            &DateConstraints::default(),
            date(2000, 1, 1),
        );
        let active: Vec<_> = table.active_cells().map(|cell| cell.date).collect();
        assert_eq!(active, vec![anchor]);

        let table = build(
            month(2024, 2),
            Granularity::Month,
            anchor,
            &DateConstraints::default(),
            date(2000, 1, 1),
        );
        let active: Vec<_> = table.active_cells().map(|cell| cell.date).collect();
        assert_eq!(active, vec![date(2024, 3, 1)]);

        let table = build(
            month(2024, 2),
            Granularity::Year,
            anchor,
            &DateConstraints::default(),
            date(2000, 1, 1),
        );
        let active: Vec<_> = table.active_cells().map(|cell| cell.date).collect();
        assert_eq!(active, vec![date(2024, 1, 1)]);
    }

    #[test]
    fn anchor_outside_view_flags_nothing() {
        let table = build(
            month(2024, 2),
            Granularity::Date,
            date(2023, 7, 1),
            &DateConstraints::default(),
            date(2000, 1, 1),
        );
        assert_eq!(table.active_cells().count(), 0);
    }

    #[test]
    fn weekday_labels_rotate_from_first_day() {
        assert_eq!(
            weekday_labels(Weekday::Sun),
            ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        );
        assert_eq!(weekday_labels(Weekday::Mon)[6], "Sun");
    }
}
