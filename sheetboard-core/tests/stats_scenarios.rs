//! End-to-end scenarios: raw tab text in, `PlayerStats` out.

use std::path::PathBuf;

use sheetboard_core::extract::{extract_journal, extract_open_positions, JournalLayout};
use sheetboard_core::grid::parse;
use sheetboard_core::{compute_stats, extract_sheet};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn labelled_realized_plus_open_positions() {
    let text = "\
Realized P/L:,2500
Symbol,Quantity,Open Price,Current Price,Unrealized Gain
AAA,10,100,120,
BBB,,,,100
";
    let s = compute_stats("alice", text, 10_000.0);
    assert_eq!(s.realized_pl, 2500.0);
    assert_eq!(s.unrealized_pl, 300.0);
    assert_eq!(s.total_pl, 2800.0);
    assert!((s.return_pct - 0.28).abs() < 1e-12);
    assert_eq!(s.equity, 12_800.0);
}

#[test]
fn open_positions_example_totals_forty() {
    let text = "\
Quantity,Open Price,Current Price,Unrealized Gain
10,5,7,
-5,,,20
";
    let out = extract_open_positions(&parse(text));
    assert_eq!(out.unrealized_total, 40.0);
}

#[test]
fn realized_falls_back_to_journal_cash() {
    let text = "\
Action,Date & Time,Total $ Received,Action,Date & Time,Total $ Paid
Sell,2024-01-02,1000,Buy,2024-01-01,400
";
    let s = compute_stats("bob", text, 10_000.0);
    assert_eq!(s.realized_pl, 600.0);
    assert_eq!(s.details.credits_total, 1000.0);
    assert_eq!(s.details.debits_total, 400.0);
    assert_eq!(s.trades, 1);
    assert_eq!(s.last_activity.as_deref(), Some("2024-01-01"));
}

#[test]
fn realized_fallback_with_totals_on_separate_rows() {
    let text = "\
Total $ Received
1000

Notes,Total $ Paid
,400
";
    let s = compute_stats("frank", text, 10_000.0);
    assert_eq!(s.details.credits_total, 1000.0);
    assert_eq!(s.details.debits_total, 400.0);
    assert_eq!(s.realized_pl, 600.0);
    assert_eq!(s.trades, 2);
}

#[test]
fn full_player_sheet() {
    let text = fixture("player_tab.csv");
    let grid = parse(&text);
    let extraction = extract_sheet(&grid);

    assert_eq!(extraction.realized_label, Some(2500.0));
    assert_eq!(extraction.positions.positions.len(), 2);
    // AAPL 10 × (170 − 150) + TSLA explicit 100
    assert_eq!(extraction.positions.unrealized_total, 300.0);

    let journal = extract_journal(&grid);
    assert_eq!(journal.layout, JournalLayout::Combined { header_row: 10 });
    assert_eq!(journal.credits_total, 5350.5);
    assert_eq!(journal.debits_total, 5450.0);
    assert_eq!(journal.trades, 3);
    assert_eq!(journal.last_activity.as_deref(), Some("2024-03-11 15:59"));

    let s = compute_stats("carol", &text, 10_000.0);
    assert_eq!(s.realized_pl, 2500.0);
    assert_eq!(s.total_pl, 2800.0);
    assert_eq!(s.equity, 12_800.0);
    assert_eq!(s.trades, 3);
}

#[test]
fn sheet_without_tables_is_zeroed() {
    let s = compute_stats("dave", "just,some\nnotes,here", 10_000.0);
    assert_eq!(s.total_pl, 0.0);
    assert_eq!(s.return_pct, 0.0);
    assert_eq!(s.equity, 10_000.0);
    assert_eq!(s.trades, 0);
}

#[test]
fn non_positive_capital_uses_default() {
    for capital in [0.0, -1_000.0] {
        let s = compute_stats("erin", "Realized P/L:,1000", capital);
        assert_eq!(s.return_pct, 0.1);
        assert_eq!(s.equity, 11_000.0);
    }
}

#[test]
fn repeated_computation_is_byte_identical() {
    let text = fixture("player_tab.csv");
    let a = serde_json::to_string(&compute_stats("carol", &text, 10_000.0)).unwrap();
    let b = serde_json::to_string(&compute_stats("carol", &text, 10_000.0)).unwrap();
    assert_eq!(a, b);
}
