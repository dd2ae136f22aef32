//! Board leaderboard — participants ranked by a selectable metric.
//!
//! Ordering is fully deterministic: descending by metric value, non-finite
//! values last, ties broken by participant name.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use sheetboard_core::PlayerStats;

/// Which stat to rank participants by. Higher is better for all of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankingMetric {
    #[default]
    TotalPl,
    ReturnPct,
    Equity,
    RealizedPl,
    UnrealizedPl,
    Trades,
}

impl RankingMetric {
    pub const ALL: [RankingMetric; 6] = [
        Self::TotalPl,
        Self::ReturnPct,
        Self::Equity,
        Self::RealizedPl,
        Self::UnrealizedPl,
        Self::Trades,
    ];

    /// Extract the ranked value from a stats record.
    pub fn extract(&self, stats: &PlayerStats) -> f64 {
        match self {
            Self::TotalPl => stats.total_pl,
            Self::ReturnPct => stats.return_pct,
            Self::Equity => stats.equity,
            Self::RealizedPl => stats.realized_pl,
            Self::UnrealizedPl => stats.unrealized_pl,
            Self::Trades => stats.trades as f64,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TotalPl => "total-pl",
            Self::ReturnPct => "return-pct",
            Self::Equity => "equity",
            Self::RealizedPl => "realized-pl",
            Self::UnrealizedPl => "unrealized-pl",
            Self::Trades => "trades",
        }
    }
}

impl fmt::Display for RankingMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|m| m.as_str()).collect();
                format!("unknown ranking metric '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

/// A participant's stats plus a fingerprint of the text they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTab {
    pub stats: PlayerStats,
    /// BLAKE3 hex digest of the raw tab text.
    pub source_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based position.
    pub rank: usize,
    pub stats: PlayerStats,
    pub source_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    metric: RankingMetric,
    entries: Vec<RankedEntry>,
}

impl Leaderboard {
    /// Rank scored tabs by `metric`.
    pub fn rank(scored: Vec<ScoredTab>, metric: RankingMetric) -> Self {
        let mut scored = scored;
        scored.sort_by(|a, b| compare(metric, &a.stats, &b.stats));
        let entries = scored
            .into_iter()
            .enumerate()
            .map(|(i, s)| RankedEntry {
                rank: i + 1,
                stats: s.stats,
                source_hash: s.source_hash,
            })
            .collect();
        Self { metric, entries }
    }

    pub fn metric(&self) -> RankingMetric {
        self.metric
    }

    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for a participant by exact name.
    pub fn get(&self, name: &str) -> Option<&RankedEntry> {
        self.entries.iter().find(|e| e.stats.name == name)
    }
}

fn compare(metric: RankingMetric, a: &PlayerStats, b: &PlayerStats) -> Ordering {
    let (va, vb) = (metric.extract(a), metric.extract(b));
    let by_value = match (va.is_finite(), vb.is_finite()) {
        (true, true) => vb.partial_cmp(&va).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    };
    by_value.then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetboard_core::StatsDetails;

    fn stats(name: &str, total_pl: f64, trades: usize) -> PlayerStats {
        PlayerStats {
            name: name.into(),
            realized_pl: total_pl,
            unrealized_pl: 0.0,
            total_pl,
            return_pct: total_pl / 10_000.0,
            equity: 10_000.0 + total_pl,
            trades,
            last_activity: None,
            details: StatsDetails::default(),
        }
    }

    fn scored(name: &str, total_pl: f64, trades: usize) -> ScoredTab {
        ScoredTab {
            stats: stats(name, total_pl, trades),
            source_hash: format!("hash-{name}"),
        }
    }

    #[test]
    fn ranks_descending_by_total_pl() {
        let lb = Leaderboard::rank(
            vec![scored("a", 100.0, 1), scored("b", 300.0, 1), scored("c", -50.0, 9)],
            RankingMetric::TotalPl,
        );
        let names: Vec<&str> = lb.entries().iter().map(|e| e.stats.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(lb.entries()[0].rank, 1);
        assert_eq!(lb.entries()[2].rank, 3);
        assert_eq!(lb.get("a").unwrap().source_hash, "hash-a");
    }

    #[test]
    fn other_metric_changes_order() {
        let lb = Leaderboard::rank(
            vec![scored("a", 100.0, 1), scored("c", -50.0, 9)],
            RankingMetric::Trades,
        );
        assert_eq!(lb.entries()[0].stats.name, "c");
        assert_eq!(lb.metric(), RankingMetric::Trades);
    }

    #[test]
    fn ties_break_by_name() {
        let lb = Leaderboard::rank(
            vec![scored("zed", 10.0, 0), scored("amy", 10.0, 0), scored("kim", 10.0, 0)],
            RankingMetric::TotalPl,
        );
        let names: Vec<&str> = lb.entries().iter().map(|e| e.stats.name.as_str()).collect();
        assert_eq!(names, vec!["amy", "kim", "zed"]);
    }

    #[test]
    fn non_finite_sorts_last() {
        let lb = Leaderboard::rank(
            vec![scored("nan", f64::NAN, 0), scored("neg", -1.0, 0)],
            RankingMetric::TotalPl,
        );
        assert_eq!(lb.entries()[0].stats.name, "neg");
        assert_eq!(lb.entries()[1].stats.name, "nan");
    }

    #[test]
    fn empty_board() {
        let lb = Leaderboard::rank(vec![], RankingMetric::Equity);
        assert!(lb.is_empty());
        assert_eq!(lb.len(), 0);
    }

    #[test]
    fn metric_names_round_trip() {
        for m in RankingMetric::ALL {
            assert_eq!(m.to_string().parse::<RankingMetric>().unwrap(), m);
        }
        assert_eq!("Return_Pct".parse::<RankingMetric>().unwrap(), RankingMetric::ReturnPct);
        assert!("sharpe".parse::<RankingMetric>().is_err());
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&RankingMetric::UnrealizedPl).unwrap();
        assert_eq!(json, "\"unrealized-pl\"");
    }
}
