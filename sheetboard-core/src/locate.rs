//! Label and header locator.
//!
//! Sheets are maintained by hand, so tables move around and header spelling
//! drifts. Both lookups here are linear scans, top-to-bottom and left-to-right,
//! that stop at the first hit.
//!
//! Matching is case-insensitive on trimmed text. A required header containing
//! both "date" and "time" is fuzzy: any cell containing both words satisfies
//! it, so "Date & Time Opened" and "Date/Time" both match "date & time".

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::number::parse_cell;

/// A located header row and the column resolved for each required header,
/// in the order the headers were requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMatch {
    pub row_index: usize,
    pub columns: Vec<usize>,
}

impl HeaderMatch {
    /// First row after the header.
    pub fn data_start(&self) -> usize {
        self.row_index + 1
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// True if the text mentions both "date" and "time" (case-insensitive).
pub fn is_date_time_header(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("date") && lower.contains("time")
}

/// Whether a header cell satisfies a required header.
pub fn header_matches(required: &str, cell: &str) -> bool {
    let req = normalize(required);
    if is_date_time_header(&req) {
        return is_date_time_header(cell);
    }
    normalize(cell) == req
}

/// Position `(row, col)` of the first cell equal to `label`.
pub fn find_label(grid: &Grid, label: &str) -> Option<(usize, usize)> {
    let wanted = normalize(label);
    grid.rows().iter().enumerate().find_map(|(r, row)| {
        row.iter()
            .position(|cell| normalize(cell) == wanted)
            .map(|c| (r, c))
    })
}

/// Numeric value of the cell immediately right of the first `label` match.
///
/// Only the first match is considered; if its neighbour is missing or not a
/// number the result is `None` even when a later match would have a value.
pub fn find_value_adjacent_to_label(grid: &Grid, label: &str) -> Option<f64> {
    let (r, c) = find_label(grid, label)?;
    parse_cell(grid.cell(r, c + 1))
}

/// First row in which every required header resolves to a column.
///
/// Repeated required headers each claim a distinct column, leftmost unclaimed
/// first; a single required header resolves to its leftmost match.
pub fn find_header_row(grid: &Grid, required: &[&str]) -> Option<HeaderMatch> {
    grid.rows()
        .iter()
        .enumerate()
        .find_map(|(row_index, row)| {
            resolve_columns(row, required).map(|columns| HeaderMatch { row_index, columns })
        })
}

fn resolve_columns(row: &[String], required: &[&str]) -> Option<Vec<usize>> {
    let mut claimed = vec![false; row.len()];
    let mut columns = Vec::with_capacity(required.len());
    for header in required {
        let col = row
            .iter()
            .enumerate()
            .position(|(i, cell)| !claimed[i] && header_matches(header, cell))?;
        claimed[col] = true;
        columns.push(col);
    }
    Some(columns)
}
