//! Output formatting for report rows.
//!
//! Supports table and JSON output formats.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use comfy_table::{Cell, ContentArrangement, Table};
use serde::Serialize;

use crate::error::AppResult;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Formatted table output.
    #[default]
    Table,
    /// JSON output.
    Json,
}

/// Renders `rows` in the chosen format.
///
/// `cells` turns one row into the table cells, in `headers` order. JSON
/// output serializes the rows themselves and ignores `headers`.
pub fn render<T, F>(format: OutputFormat, headers: &[&str], rows: &[T], cells: F) -> AppResult<String>
where
    T: Serialize,
    F: Fn(&T) -> Vec<String>,
{
    match format {
        OutputFormat::Table => Ok(format_table(headers, rows.iter().map(cells))),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
    }
}

/// Formats rows as a table.
fn format_table(headers: &[&str], rows: impl Iterator<Item = Vec<String>>) -> String {
    let mut table = Table::new();

    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    table.set_header(headers.iter().map(|h| Cell::new(h)));

    for row in rows {
        table.add_row(row.into_iter().map(Cell::new));
    }

    table.to_string()
}

/// Timestamp as shown in reports.
pub fn timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Coordinates and distances, two decimals.
pub fn coordinate(value: f64) -> String {
    format!("{value:.2}")
}
