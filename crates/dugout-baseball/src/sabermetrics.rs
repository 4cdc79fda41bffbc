// Sabermetric formula engine.
//
// Rate stats return 0.0 on a zero denominator (the conventional "no data"
// display). League-context stats return `None` instead, because a zero there
// would read as a real value.

use crate::stats::{BattingStats, CalculatedStats, LeagueStats, RunEnvironment, WeightedStats};
use dugout_core::numeric::ratio_or_zero;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Rate stats
// ---------------------------------------------------------------------------

/// AVG = H / AB
pub fn avg(b: &BattingStats) -> f64 {
    ratio_or_zero(b.hits as f64, b.ab as f64)
}

/// OBP = (H + BB) / (AB + BB + SF)
///
/// HBP is not tracked, so it is omitted from both sides.
pub fn obp(b: &BattingStats) -> f64 {
    let denominator = b.ab as f64 + b.bb as f64 + b.sf as f64;
    ratio_or_zero(b.hits as f64 + b.bb as f64, denominator)
}

/// SLG = TB / AB
pub fn slg(b: &BattingStats) -> f64 {
    ratio_or_zero(b.total_bases as f64, b.ab as f64)
}

/// OPS = OBP + SLG
pub fn ops(b: &BattingStats) -> f64 {
    obp(b) + slg(b)
}

/// ISO = SLG - AVG
pub fn iso(b: &BattingStats) -> f64 {
    slg(b) - avg(b)
}

/// BABIP = (H - HR) / (AB - SO - HR + SF)
///
/// Inconsistent counts can push the denominator below zero; any
/// non-positive denominator yields 0.
pub fn babip(b: &BattingStats) -> f64 {
    let denominator = b.ab as i64 - b.so as i64 - b.hr as i64 + b.sf as i64;
    if denominator <= 0 {
        return 0.0;
    }
    (b.hits as f64 - b.hr as f64) / denominator as f64
}

/// K% = SO / PA × 100
pub fn k_pct(b: &BattingStats) -> f64 {
    ratio_or_zero(b.so as f64, b.pa as f64) * 100.0
}

/// BB% = BB / PA × 100
pub fn bb_pct(b: &BattingStats) -> f64 {
    ratio_or_zero(b.bb as f64, b.pa as f64) * 100.0
}

// ---------------------------------------------------------------------------
// League-context stats
// ---------------------------------------------------------------------------

/// wOBA = (wBB×BB + w1B×1B + w2B×2B + w3B×3B + wHR×HR) / PA
pub fn woba(b: &BattingStats, league: &LeagueStats) -> Option<f64> {
    if b.pa == 0 {
        return None;
    }
    let w = &league.woba_weights;
    let weighted = w.bb * b.bb as f64
        + w.single * b.singles as f64
        + w.double * b.doubles as f64
        + w.triple * b.triples as f64
        + w.hr * b.hr as f64;
    Some(weighted / b.pa as f64)
}

/// wRC = ((wOBA - lgwOBA) / wOBAScale) × PA
pub fn wrc(b: &BattingStats, league: &LeagueStats, league_woba: f64) -> Option<f64> {
    let woba = woba(b, league)?;
    if league.woba_scale == 0.0 {
        return None;
    }
    Some(((woba - league_woba) / league.woba_scale) * b.pa as f64)
}

/// wRC+ = ((wRC / PA) / lgRunsPerPA) × 100
pub fn wrc_plus(b: &BattingStats, league: &LeagueStats, env: &RunEnvironment) -> Option<f64> {
    let wrc = wrc(b, league, env.league_woba)?;
    if b.pa == 0 || env.runs_per_pa == 0.0 {
        return None;
    }
    Some(((wrc / b.pa as f64) / env.runs_per_pa) * 100.0)
}

/// OPS+ = 100 × (OBP/lgOBP + SLG/lgSLG - 1)
pub fn ops_plus(b: &BattingStats, league: &LeagueStats) -> Option<f64> {
    if league.avg_obp == 0.0 || league.avg_slg == 0.0 {
        return None;
    }
    Some(100.0 * (obp(b) / league.avg_obp + slg(b) / league.avg_slg - 1.0))
}

// ---------------------------------------------------------------------------
// Combined entry point
// ---------------------------------------------------------------------------

/// Both stat blocks for one batting line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AllStats {
    pub calculated: CalculatedStats,
    pub weighted: WeightedStats,
}

pub fn calculate_stats(b: &BattingStats) -> CalculatedStats {
    CalculatedStats {
        avg: avg(b),
        obp: obp(b),
        slg: slg(b),
        ops: ops(b),
        iso: iso(b),
        babip: babip(b),
        k_pct: k_pct(b),
        bb_pct: bb_pct(b),
    }
}

pub fn weighted_stats(
    b: &BattingStats,
    league: Option<&LeagueStats>,
    env: &RunEnvironment,
) -> WeightedStats {
    let Some(league) = league else {
        return WeightedStats::default();
    };
    WeightedStats {
        woba: woba(b, league),
        wrc: wrc(b, league, env.league_woba),
        wrc_plus: wrc_plus(b, league, env),
        ops_plus: ops_plus(b, league),
    }
}

/// Compute every stat for a batting line. Without a league context the
/// weighted block is entirely `None`.
pub fn calculate_all_stats(
    b: &BattingStats,
    league: Option<&LeagueStats>,
    env: &RunEnvironment,
) -> AllStats {
    AllStats {
        calculated: calculate_stats(b),
        weighted: weighted_stats(b, league, env),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
