use std::fmt::Write as _;

use owo_colors::OwoColorize;
use tessera_date_panel::{Cell, DatePanelHeader, Granularity, TableData};

const DATE_CELL_WIDTH: usize = 4;
const PERIOD_CELL_WIDTH: usize = 7;

/// Renders the header and grid as terminal text.
pub fn render(header: &DatePanelHeader, table: &TableData, color: bool) -> String {
    let width = match table.granularity() {
        Granularity::Date => DATE_CELL_WIDTH,
        Granularity::Month | Granularity::Year => PERIOD_CELL_WIDTH,
    };
    let mut out = String::new();
    let _ = writeln!(out, "  <  {}  >   [{}]", header.title, header.granularity);
    if !header.weekday_labels.is_empty() {
        for label in &header.weekday_labels {
            let _ = write!(out, "{label:>width$}");
        }
        out.push('\n');
    }
    for row in table.rows() {
        for cell in row {
            out.push_str(&render_cell(cell, width, color));
        }
        out.push('\n');
    }
    out
}

fn render_cell(cell: &Cell, width: usize, color: bool) -> String {
    if !color {
        let marker = if cell.is_active {
            '*'
        } else if cell.is_disabled {
            'x'
        } else {
            ' '
        };
        let pad = width.saturating_sub(1);
        return format!("{:>pad$}{marker}", cell.label());
    }
    let text = format!("{:>width$}", cell.label());
    if cell.is_active {
        text.bold().reversed().to_string()
    } else if cell.is_disabled || cell.kind.is_padding() {
        text.dimmed().to_string()
    } else if cell.is_today {
        text.underline().to_string()
    } else {
        text
    }
}
