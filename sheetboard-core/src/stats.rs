//! Per-participant statistics — pure functions over one tab's text.
//!
//! `compute_stats` is parse → extract → aggregate. Nothing here fails: a tab
//! with no recognisable tables yields a record of zeros.

use serde::{Deserialize, Serialize};

use crate::extract::{extract_journal, extract_open_positions, JournalTotals, OpenPositions};
use crate::grid::{parse, Grid};
use crate::locate::find_value_adjacent_to_label;
use crate::number::finite;

/// Capital assumed when the configured value is missing or not positive.
pub const DEFAULT_INITIAL_CAPITAL: f64 = 10_000.0;

/// Label whose right-hand neighbour states realized P/L directly.
pub const REALIZED_LABEL: &str = "Realized P/L:";

/// Everything the aggregator reads from a grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetExtraction {
    pub realized_label: Option<f64>,
    pub positions: OpenPositions,
    pub journal: JournalTotals,
}

/// Run the label lookup and both section extractors.
pub fn extract_sheet(grid: &Grid) -> SheetExtraction {
    SheetExtraction {
        realized_label: find_value_adjacent_to_label(grid, REALIZED_LABEL),
        positions: extract_open_positions(grid),
        journal: extract_journal(grid),
    }
}

/// Cash totals behind the realized figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsDetails {
    pub credits_total: f64,
    pub debits_total: f64,
}

/// Standardized performance record for one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub name: String,
    pub realized_pl: f64,
    pub unrealized_pl: f64,
    pub total_pl: f64,
    pub return_pct: f64,
    pub equity: f64,
    pub trades: usize,
    pub last_activity: Option<String>,
    pub details: StatsDetails,
}

impl PlayerStats {
    /// Aggregate extracted figures.
    ///
    /// Realized P/L is the labelled value when present, otherwise credits
    /// minus debits from the journal.
    pub fn from_extraction(
        name: impl Into<String>,
        extraction: &SheetExtraction,
        initial_capital: f64,
    ) -> Self {
        let capital = effective_capital(initial_capital);
        let journal = &extraction.journal;

        let realized_pl = extraction
            .realized_label
            .unwrap_or(journal.credits_total - journal.debits_total);
        let unrealized_pl = extraction.positions.unrealized_total;
        let total_pl = realized_pl + unrealized_pl;

        Self {
            name: name.into(),
            realized_pl,
            unrealized_pl,
            total_pl,
            return_pct: total_pl / capital,
            equity: capital + total_pl,
            trades: journal.trades,
            last_activity: journal.last_activity.clone(),
            details: StatsDetails {
                credits_total: journal.credits_total,
                debits_total: journal.debits_total,
            },
        }
    }
}

/// Supplied capital if finite and positive, else [`DEFAULT_INITIAL_CAPITAL`].
pub fn effective_capital(initial_capital: f64) -> f64 {
    finite(initial_capital)
        .filter(|c| *c > 0.0)
        .unwrap_or(DEFAULT_INITIAL_CAPITAL)
}

/// Compute one participant's stats from the raw text of their tab.
pub fn compute_stats(name: impl Into<String>, raw_text: &str, initial_capital: f64) -> PlayerStats {
    let grid = parse(raw_text);
    PlayerStats::from_extraction(name, &extract_sheet(&grid), initial_capital)
}
