//! Board export (JSON report / CSV leaderboard).

use std::path::Path;

use anyhow::{Context, Result};

use crate::leaderboard::Leaderboard;
use crate::runner::BoardReport;

const CSV_HEADER: [&str; 12] = [
    "rank",
    "name",
    "realized_pl",
    "unrealized_pl",
    "total_pl",
    "return_pct",
    "equity",
    "trades",
    "last_activity",
    "credits_total",
    "debits_total",
    "source_hash",
];

pub fn write_report_json(path: &Path, report: &BoardReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize board report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write board report {}", path.display()))?;
    Ok(())
}

pub fn read_report_json(path: &Path) -> Result<BoardReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read board report {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid board report {}", path.display()))
}

pub fn write_leaderboard_csv(path: &Path, leaderboard: &Leaderboard) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create leaderboard CSV {}", path.display()))?;

    writer.write_record(CSV_HEADER)?;
    for entry in leaderboard.entries() {
        let s = &entry.stats;
        writer.write_record([
            entry.rank.to_string(),
            s.name.clone(),
            format!("{:.2}", s.realized_pl),
            format!("{:.2}", s.unrealized_pl),
            format!("{:.2}", s.total_pl),
            format!("{:.6}", s.return_pct),
            format!("{:.2}", s.equity),
            s.trades.to_string(),
            s.last_activity.clone().unwrap_or_default(),
            format!("{:.2}", s.details.credits_total),
            format!("{:.2}", s.details.debits_total),
            entry.source_hash.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
