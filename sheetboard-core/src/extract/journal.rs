//! Trade journal — cash received/paid totals, activity count, last activity.
//!
//! The journal is a two-section table sharing one header row: a credits
//! section (action, date & time, total $ received) and a debits section
//! (action, date & time, total $ paid). Sections are described by
//! [`JOURNAL_SECTIONS`] rather than fixed offsets, so either section may sit
//! anywhere in the row.
//!
//! When no combined header row exists, a fallback looks for standalone
//! "total $ received" and "total $ paid" columns independently and sums each
//! below its own header.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grid::{is_blank_row, Grid};
use crate::locate::{find_header_row, is_date_time_header};
use crate::number::parse_cell;

pub const ACTION_HEADER: &str = "action";
pub const DATE_TIME_HEADER: &str = "date & time";
pub const RECEIVED_HEADER: &str = "total $ received";
pub const PAID_HEADER: &str = "total $ paid";

/// Rows past the header before the trailing-emptiness check kicks in.
const EARLY_STOP_AFTER: usize = 20;
/// Rows peeked ahead by the trailing-emptiness check.
const EARLY_STOP_WINDOW: usize = 10;

/// Which side of the ledger a journal section records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionRole {
    Credits,
    Debits,
}

/// One section of the combined journal header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalSection {
    pub role: SectionRole,
    pub amount_header: &'static str,
}

pub const JOURNAL_SECTIONS: [JournalSection; 2] = [
    JournalSection {
        role: SectionRole::Credits,
        amount_header: RECEIVED_HEADER,
    },
    JournalSection {
        role: SectionRole::Debits,
        amount_header: PAID_HEADER,
    },
];

/// How the journal was located.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JournalLayout {
    /// Combined credits/debits header row.
    Combined { header_row: usize },
    /// Standalone received and/or paid columns, each found on its own.
    Fallback {
        received_row: Option<usize>,
        paid_row: Option<usize>,
    },
    #[default]
    NotFound,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalTotals {
    pub layout: JournalLayout,
    pub credits_total: f64,
    pub debits_total: f64,
    pub trades: usize,
    /// Raw text of the last non-blank date cell in scan order.
    pub last_activity: Option<String>,
}

/// Resolved columns of the combined journal header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CombinedColumns {
    header_row: usize,
    received: usize,
    paid: usize,
    date: Option<usize>,
}

/// Required headers for the combined layout: each section contributes its
/// action, date & time and amount columns.
fn combined_required_headers() -> Vec<&'static str> {
    JOURNAL_SECTIONS
        .iter()
        .flat_map(|s| [ACTION_HEADER, DATE_TIME_HEADER, s.amount_header])
        .collect()
}

fn locate_combined(grid: &Grid) -> Option<CombinedColumns> {
    let required = combined_required_headers();
    let header = find_header_row(grid, &required)?;

    let mut received = None;
    let mut paid = None;
    for (section, chunk) in JOURNAL_SECTIONS.iter().zip(header.columns.chunks(3)) {
        let amount_col = chunk[2];
        match section.role {
            SectionRole::Credits => received = Some(amount_col),
            SectionRole::Debits => paid = Some(amount_col),
        }
    }

    // The later date column belongs to the debit side, which carries the
    // most recent activity.
    let date = grid.row(header.row_index).and_then(|row| {
        row.iter()
            .enumerate()
            .filter(|(_, cell)| is_date_time_header(cell))
            .map(|(i, _)| i)
            .max()
    });

    Some(CombinedColumns {
        header_row: header.row_index,
        received: received?,
        paid: paid?,
        date,
    })
}

fn has_activity(row: &[String]) -> bool {
    row.iter().any(|c| {
        let t = c.trim();
        !t.is_empty() && t != "0"
    })
}

/// True if rows `from..from + EARLY_STOP_WINDOW` are all blank.
fn window_is_blank(grid: &Grid, from: usize) -> bool {
    let end = (from + EARLY_STOP_WINDOW).min(grid.len());
    (from..end).all(|r| grid.row(r).map_or(true, is_blank_row))
}

fn non_blank_cell(grid: &Grid, row: usize, col: usize) -> Option<&str> {
    grid.cell(row, col).map(str::trim).filter(|t| !t.is_empty())
}

fn sum_combined(grid: &Grid, cols: CombinedColumns) -> JournalTotals {
    let mut totals = JournalTotals {
        layout: JournalLayout::Combined {
            header_row: cols.header_row,
        },
        ..JournalTotals::default()
    };

    for r in cols.header_row + 1..grid.len() {
        let received = parse_cell(grid.cell(r, cols.received));
        let paid = parse_cell(grid.cell(r, cols.paid));

        if r > cols.header_row + EARLY_STOP_AFTER
            && received.is_none()
            && paid.is_none()
            && window_is_blank(grid, r + 1)
        {
            break;
        }

        let row = grid.row(r).unwrap_or(&[]);
        if has_activity(row) && (received.is_some() || paid.is_some()) {
            totals.trades += 1;
        }
        totals.credits_total += received.unwrap_or(0.0);
        totals.debits_total += paid.unwrap_or(0.0);

        if let Some(date) = cols.date.and_then(|c| non_blank_cell(grid, r, c)) {
            totals.last_activity = Some(date.to_string());
        }
    }
    totals
}

/// Header cell of a standalone totals column, searched on its own.
fn locate_column(grid: &Grid, header: &str) -> Option<(usize, usize)> {
    find_header_row(grid, &[header]).map(|m| (m.row_index, m.columns[0]))
}

/// Amount in a standalone column, only below that column's own header.
fn column_cell(grid: &Grid, column: Option<(usize, usize)>, r: usize) -> Option<&str> {
    column
        .filter(|(header_row, _)| r > *header_row)
        .and_then(|(_, c)| non_blank_cell(grid, r, c))
}

fn sum_fallback(grid: &Grid) -> Option<JournalTotals> {
    let received = locate_column(grid, RECEIVED_HEADER);
    let paid = locate_column(grid, PAID_HEADER);
    let first_header = match (received, paid) {
        (Some((a, _)), Some((b, _))) => a.min(b),
        (Some((a, _)), None) | (None, Some((a, _))) => a,
        (None, None) => return None,
    };
    let is_header_row = |r: usize| {
        received.is_some_and(|(h, _)| h == r) || paid.is_some_and(|(h, _)| h == r)
    };

    let mut totals = JournalTotals {
        layout: JournalLayout::Fallback {
            received_row: received.map(|(h, _)| h),
            paid_row: paid.map(|(h, _)| h),
        },
        ..JournalTotals::default()
    };

    for r in first_header + 1..grid.len() {
        if is_header_row(r) {
            continue;
        }
        let received_cell = column_cell(grid, received, r);
        let paid_cell = column_cell(grid, paid, r);
        totals.credits_total += parse_cell(received_cell).unwrap_or(0.0);
        totals.debits_total += parse_cell(paid_cell).unwrap_or(0.0);

        if received_cell.or(paid_cell).is_some() {
            totals.trades += 1;
        }
    }
    Some(totals)
}

/// Extract journal totals, preferring the combined two-section header.
pub fn extract_journal(grid: &Grid) -> JournalTotals {
    if let Some(cols) = locate_combined(grid) {
        let totals = sum_combined(grid, cols);
        debug!(
            header_row = cols.header_row,
            trades = totals.trades,
            "journal extracted from combined header"
        );
        return totals;
    }

    match sum_fallback(grid) {
        Some(totals) => {
            debug!(trades = totals.trades, "journal extracted from standalone totals column");
            totals
        }
        None => {
            debug!("journal header not found");
            JournalTotals::default()
        }
    }
}
