//! Operator-facing rendering
//!
//! Everything here is a projection of desk state into text. Nothing in this
//! module decides or stores state.

use prettytable::{format, Cell, Row, Table};

use crate::core::styles::StyleRole;
use crate::manifest::{Flight, ManifestStatus};
use crate::reconcile::{BagScanState, Outcome};

use super::desk::DeskSummary;

/// `[LABEL] message` line for a classification
pub fn outcome_line(outcome: &Outcome, color: bool) -> String {
    let label = format!("[{}]", outcome.label());
    format!("{} {}", outcome.role().paint(&label, color), outcome)
}

pub fn status_line(status: &ManifestStatus, color: bool) -> String {
    status.role().paint(&status.to_string(), color)
}

/// Description of a freshly selected flight
pub fn selection_line(flight: &Flight) -> String {
    let mut line = format!("Flight loaded: {}", flight.key());
    if let Some(loader) = &flight.loader {
        line.push_str(&format!(" - Loader: {}", loader));
    }
    if let Some(total) = flight.total_planned {
        line.push_str(&format!(" - Planned total: {}", total));
    }
    line.push_str(&format!(" - Bags in list: {}", flight.bag_codes.len()));
    line
}

/// Scanned counter for the selected flight
pub fn counter_line(summary: &DeskSummary, color: bool) -> String {
    match &summary.flight {
        None => StyleRole::Pending.paint("No flight selected", color),
        Some(key) => {
            let role = if summary.total_bags > 0 && summary.scanned == summary.total_bags {
                StyleRole::Ok
            } else {
                StyleRole::Value
            };
            format!(
                "{}: {}",
                key,
                role.paint(
                    &format!("{} / {} bags scanned", summary.scanned, summary.total_bags),
                    color
                )
            )
        }
    }
}

/// One line per bag, scanned bags ticked
pub fn bag_lines(state: &BagScanState, color: bool) -> Vec<String> {
    state
        .entries()
        .map(|(code, scanned)| {
            if scanned {
                StyleRole::Scanned.paint(&format!("[x] {}", code), color)
            } else {
                StyleRole::Pending.paint(&format!("[ ] {}", code), color)
            }
        })
        .collect()
}

/// Heading above a flight listing
pub fn flights_heading(date: Option<&str>, count: usize, color: bool) -> String {
    match (date, count) {
        (Some(date), 0) => StyleRole::Warn.paint(&format!("No flights for date {}.", date), color),
        (Some(date), n) => {
            StyleRole::Ok.paint(&format!("Flights found for {}: {}", date, n), color)
        }
        (None, n) => StyleRole::Header.paint(&format!("Flights in manifest: {}", n), color),
    }
}

fn header_cell(text: &str, color: bool) -> Cell {
    let cell = Cell::new(text);
    match StyleRole::Header.to_prettytable_spec() {
        Some(spec) if color => cell.style_spec(&format!("b{}", spec)),
        _ => cell,
    }
}

/// Table of flights: date, flight, loader, planned total and bags in list
pub fn flights_table(flights: &[(usize, &Flight)], color: bool) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(Row::new(vec![
        header_cell("Date", color),
        header_cell("Flight", color),
        header_cell("Loader", color),
        header_cell("Total", color),
        header_cell("Bags", color),
    ]));

    for (_, flight) in flights {
        table.add_row(Row::new(vec![
            Cell::new(&flight.date),
            Cell::new(&flight.flight_number),
            Cell::new(flight.loader.as_deref().unwrap_or("-")),
            Cell::new(
                &flight
                    .total_planned
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            )
            .style_spec("r"),
            Cell::new(&flight.bag_codes.len().to_string()).style_spec("r"),
        ]));
    }
    table
}

/// Table rendered as plain lines
pub fn table_lines(table: &Table) -> Vec<String> {
    table.to_string().lines().map(str::to_string).collect()
}

pub const CONSOLE_HELP: &[&str] = &[
    "Scanner input is read while the command line is closed.",
    "Tab              open or close the command line",
    "Esc / Ctrl-C     quit",
    "Commands:",
    "  select <date> <flight>   load a flight for scanning",
    "  flights [date]           list flights (all, or on a date)",
    "  bags                     list bags of the loaded flight",
    "  status                   manifest status and scanned counter",
    "  reload                   reload the manifest (drops the selection)",
    "  clear                    drop the selected flight",
    "  help                     this text",
    "  quit                     leave the console",
];
