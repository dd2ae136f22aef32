//! Sheetboard Runner — board orchestration on top of `sheetboard-core`.
//!
//! This crate provides:
//! - TOML board settings (sheet id, tabs, initial capital)
//! - The `SheetSource` trait with directory and in-memory sources
//! - Parallel per-tab scoring with abort/partial failure policies
//! - Leaderboard ranking by a selectable metric
//! - JSON report and CSV leaderboard export

pub mod export;
pub mod leaderboard;
pub mod runner;
pub mod settings;
pub mod source;

pub use export::{read_report_json, write_leaderboard_csv, write_report_json};
pub use leaderboard::{Leaderboard, RankedEntry, RankingMetric, ScoredTab};
pub use runner::{
    run_board, score_tab, source_hash, BoardReport, FailurePolicy, RunError, RunOptions,
    TabFailure, SCHEMA_VERSION,
};
pub use settings::{BoardSettings, SettingsError};
pub use source::{DirectorySource, MemorySource, SheetSource, SourceError};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn settings_are_send_sync() {
        assert_send::<BoardSettings>();
        assert_sync::<BoardSettings>();
    }

    #[test]
    fn sources_are_send_sync() {
        assert_send::<DirectorySource>();
        assert_sync::<DirectorySource>();
        assert_send::<MemorySource>();
        assert_sync::<MemorySource>();
    }

    #[test]
    fn leaderboard_types_are_send_sync() {
        assert_send::<Leaderboard>();
        assert_sync::<Leaderboard>();
        assert_send::<RankedEntry>();
        assert_sync::<RankedEntry>();
        assert_send::<ScoredTab>();
        assert_sync::<ScoredTab>();
    }

    #[test]
    fn report_types_are_send_sync() {
        assert_send::<BoardReport>();
        assert_sync::<BoardReport>();
        assert_send::<TabFailure>();
        assert_sync::<TabFailure>();
        assert_send::<RunError>();
        assert_sync::<RunError>();
    }
}
