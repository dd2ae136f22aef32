//! Board runner — fetches every tab, computes stats in parallel, ranks.
//!
//! Two entry points:
//! - `score_tab()`: one tab's text to a fingerprinted stats record, no I/O.
//! - `run_board()`: all configured tabs through a `SheetSource`. Used by the CLI.

use chrono::{NaiveDateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use sheetboard_core::{effective_capital, extract_sheet, parse_with_report, PlayerStats};

use crate::leaderboard::{Leaderboard, RankingMetric, ScoredTab};
use crate::settings::BoardSettings;
use crate::source::{SheetSource, SourceError};

/// Current schema version for exported reports.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to fetch tab '{tab}': {source}")]
    Fetch {
        tab: String,
        #[source]
        source: SourceError,
    },
}

/// What to do when a tab cannot be fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Fail the whole run with the first failing tab (in configured order).
    #[default]
    Abort,
    /// Rank the tabs that succeeded and list the failures.
    Partial,
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub metric: RankingMetric,
    pub failure_policy: FailurePolicy,
    /// Overrides the capital from the settings file.
    pub initial_capital: Option<f64>,
}

/// A tab left out of the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabFailure {
    pub tab: String,
    pub message: String,
}

/// Complete result of one board run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardReport {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub sheet_id: String,
    pub source: String,
    pub generated_at: NaiveDateTime,
    /// Capital actually used, after substituting the default for invalid values.
    pub initial_capital: f64,
    pub leaderboard: Leaderboard,
    pub failures: Vec<TabFailure>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl BoardReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// BLAKE3 hex digest of a tab's raw text.
pub fn source_hash(raw_text: &str) -> String {
    blake3::hash(raw_text.as_bytes()).to_hex().to_string()
}

/// Compute one tab's stats and fingerprint. No I/O.
pub fn score_tab(name: &str, raw_text: &str, initial_capital: f64) -> ScoredTab {
    let report = parse_with_report(raw_text);
    if report.unterminated_quote {
        warn!(tab = name, "unterminated quote; remainder of tab read as one cell");
    }
    let extraction = extract_sheet(&report.grid);
    ScoredTab {
        stats: PlayerStats::from_extraction(name, &extraction, initial_capital),
        source_hash: source_hash(raw_text),
    }
}

/// Fetch, score and rank every tab in `settings`.
///
/// Tabs are processed in parallel; results are put back into configured tab
/// order before ranking and failure handling.
pub fn run_board(
    settings: &BoardSettings,
    source: &dyn SheetSource,
    options: &RunOptions,
) -> Result<BoardReport, RunError> {
    let requested = options.initial_capital.unwrap_or(settings.initial_capital);
    let capital = effective_capital(requested);
    if capital != requested {
        warn!(requested, used = capital, "initial capital invalid; using default");
    }

    info!(
        sheet_id = %settings.sheet_id,
        tabs = settings.tabs.len(),
        source = source.name(),
        "running board"
    );

    let outcomes: Vec<(&String, Result<ScoredTab, SourceError>)> = settings
        .tabs
        .par_iter()
        .map(|tab| {
            let outcome = source
                .fetch_tab(&settings.sheet_id, tab)
                .map(|text| score_tab(tab, &text, capital));
            (tab, outcome)
        })
        .collect();

    let mut scored = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();
    for (tab, outcome) in outcomes {
        match outcome {
            Ok(s) => {
                info!(
                    tab = %tab,
                    total_pl = s.stats.total_pl,
                    trades = s.stats.trades,
                    "tab scored"
                );
                scored.push(s);
            }
            Err(err) => match options.failure_policy {
                FailurePolicy::Abort => {
                    return Err(RunError::Fetch {
                        tab: tab.clone(),
                        source: err,
                    })
                }
                FailurePolicy::Partial => {
                    warn!(tab = %tab, error = %err, "tab skipped");
                    failures.push(TabFailure {
                        tab: tab.clone(),
                        message: err.to_string(),
                    });
                }
            },
        }
    }

    Ok(BoardReport {
        schema_version: SCHEMA_VERSION,
        sheet_id: settings.sheet_id.clone(),
        source: source.name().to_string(),
        generated_at: Utc::now().naive_utc(),
        initial_capital: capital,
        leaderboard: Leaderboard::rank(scored, options.metric),
        failures,
    })
}
