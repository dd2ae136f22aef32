//! Sheetboard Core — resilient extraction of trading figures from sheet exports.
//!
//! This crate turns one participant's spreadsheet tab (delimited text) into a
//! standardized statistics record:
//! - Tabular text parser (quoting, CR/LF variants, trailing blank rows)
//! - Numeric normalizer (currency, thousands separators, percent, accounting negatives)
//! - Label and header locator with fuzzy date/time header matching
//! - Open positions and two-section journal extractors
//! - Aggregator producing `PlayerStats`
//!
//! Every operation is pure and synchronous; malformed data degrades to
//! absent values and zero totals instead of errors.

pub mod extract;
pub mod grid;
pub mod locate;
pub mod number;
pub mod stats;

pub use extract::{
    extract_journal, extract_open_positions, JournalLayout, JournalTotals, OpenPositions, Position,
};
pub use grid::{parse, parse_with_report, Grid, ParseReport};
pub use locate::{find_header_row, find_value_adjacent_to_label, HeaderMatch};
pub use number::parse_number;
pub use stats::{
    compute_stats, effective_capital, extract_sheet, PlayerStats, SheetExtraction, StatsDetails,
    DEFAULT_INITIAL_CAPITAL, REALIZED_LABEL,
};
