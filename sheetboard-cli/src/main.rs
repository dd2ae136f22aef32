//! Sheetboard CLI — rank a board of participant tabs, inspect a single tab.
//!
//! Commands:
//! - `rank` — score every tab listed in a TOML board file and print the leaderboard
//! - `inspect` — show what the extractors found in one exported tab

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use sheetboard_core::{extract_sheet, parse_with_report, PlayerStats};
use sheetboard_runner::{
    run_board, write_leaderboard_csv, write_report_json, BoardReport, BoardSettings,
    DirectorySource, FailurePolicy, RankingMetric, RunOptions,
};

#[derive(Parser)]
#[command(
    name = "sheetboard",
    about = "Sheetboard CLI — trading competition leaderboard from sheet exports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every tab in a board file and print the ranked leaderboard.
    Rank {
        /// Path to the TOML board file.
        #[arg(long)]
        config: PathBuf,

        /// Directory holding one `<tab>.csv` per tab. Overrides `source_dir`
        /// from the board file; defaults to the board file's directory.
        #[arg(long)]
        source_dir: Option<PathBuf>,

        /// Ranking metric: total-pl, return-pct, equity, realized-pl, unrealized-pl, trades.
        #[arg(long, default_value = "total-pl")]
        sort: RankingMetric,

        /// Override the initial capital from the board file.
        #[arg(long)]
        initial_capital: Option<f64>,

        /// Rank the tabs that could be read instead of failing on the first missing tab.
        #[arg(long, default_value_t = false)]
        partial: bool,

        /// Write the full report as JSON.
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write the leaderboard as CSV.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Show the grid, located tables and stats for one exported tab.
    Inspect {
        /// Exported tab (delimited text).
        file: PathBuf,

        /// Participant name. Defaults to the file stem.
        #[arg(long)]
        name: Option<String>,

        /// Initial capital for return and equity.
        #[arg(long, default_value_t = sheetboard_core::DEFAULT_INITIAL_CAPITAL)]
        initial_capital: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Rank {
            config,
            source_dir,
            sort,
            initial_capital,
            partial,
            json,
            csv,
        } => {
            let code = run_rank(
                &config,
                source_dir,
                sort,
                initial_capital,
                partial,
                json,
                csv,
            )?;
            std::process::exit(code);
        }
        Commands::Inspect {
            file,
            name,
            initial_capital,
        } => run_inspect(&file, name, initial_capital),
    }
}

/// Returns the process exit code: 0 when every tab was ranked, 2 when the
/// partial policy left some out.
#[allow(clippy::too_many_arguments)]
fn run_rank(
    config_path: &Path,
    source_dir: Option<PathBuf>,
    sort: RankingMetric,
    initial_capital: Option<f64>,
    partial: bool,
    json: Option<PathBuf>,
    csv: Option<PathBuf>,
) -> Result<i32> {
    let settings = BoardSettings::from_file(config_path)?;
    if settings.api_key.is_some() {
        debug!("access credential configured; not used by the directory source");
    }

    let board_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let root = match (source_dir, &settings.source_dir) {
        (Some(dir), _) => dir,
        (None, Some(dir)) => board_dir.join(dir),
        (None, None) => board_dir.to_path_buf(),
    };
    let source = DirectorySource::new(root);

    let options = RunOptions {
        metric: sort,
        failure_policy: if partial {
            FailurePolicy::Partial
        } else {
            FailurePolicy::Abort
        },
        initial_capital,
    };

    let report = run_board(&settings, &source, &options)
        .with_context(|| format!("board '{}' could not be ranked", settings.sheet_id))?;

    print_report(&report);

    if let Some(path) = json {
        write_report_json(&path, &report)?;
        println!("Report saved to: {}", path.display());
    }
    if let Some(path) = csv {
        write_leaderboard_csv(&path, &report.leaderboard)?;
        println!("Leaderboard saved to: {}", path.display());
    }

    Ok(if report.is_complete() { 0 } else { 2 })
}

fn run_inspect(file: &Path, name: Option<String>, initial_capital: f64) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read tab export {}", file.display()))?;
    let name = name.unwrap_or_else(|| {
        file.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "tab".into())
    });

    let report = parse_with_report(&text);
    let grid = &report.grid;
    println!("Tab: {name} ({})", file.display());
    println!("Grid: {} rows x {} columns", grid.len(), grid.width());
    if report.unterminated_quote {
        println!("WARNING: unterminated quote; the remainder of the file was read as one cell");
    }

    let extraction = extract_sheet(grid);
    println!();
    match extraction.realized_label {
        Some(v) => println!("Realized P/L label: {v:.2}"),
        None => println!("Realized P/L label: (not found)"),
    }
    match extraction.positions.header_row {
        Some(row) => println!(
            "Open positions: header at row {}, {} positions, unrealized {:.2}",
            row + 1,
            extraction.positions.positions.len(),
            extraction.positions.unrealized_total
        ),
        None => println!("Open positions: (not found)"),
    }
    let journal = &extraction.journal;
    println!(
        "Journal: {:?}, credits {:.2}, debits {:.2}, {} trades, last activity {}",
        journal.layout,
        journal.credits_total,
        journal.debits_total,
        journal.trades,
        journal.last_activity.as_deref().unwrap_or("-")
    );

    let stats = PlayerStats::from_extraction(name, &extraction, initial_capital);
    println!();
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

fn print_report(report: &BoardReport) {
    let lb = &report.leaderboard;
    println!("=== Board: {} ===", report.sheet_id);
    println!(
        "Ranked by {} | initial capital {:.2} | {} participants",
        lb.metric(),
        report.initial_capital,
        lb.len()
    );
    println!();
    println!(
        "{:>4}  {:<20} {:>12} {:>12} {:>12} {:>9} {:>12} {:>6}  {}",
        "Rank", "Name", "Realized", "Unrealized", "Total P/L", "Return", "Equity", "Trades",
        "Last Activity"
    );
    println!("{}", "-".repeat(112));
    for e in lb.entries() {
        let s = &e.stats;
        println!(
            "{:>4}  {:<20} {:>12.2} {:>12.2} {:>12.2} {:>8.2}% {:>12.2} {:>6}  {}",
            e.rank,
            s.name,
            s.realized_pl,
            s.unrealized_pl,
            s.total_pl,
            s.return_pct * 100.0,
            s.equity,
            s.trades,
            s.last_activity.as_deref().unwrap_or("-")
        );
    }

    if !report.failures.is_empty() {
        println!();
        println!("Skipped tabs:");
        for f in &report.failures {
            println!("  {}: {}", f.tab, f.message);
        }
    }
}
