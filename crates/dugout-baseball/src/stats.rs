// Shared statistical records passed between the parsers, the formula engine,
// and the league aggregator.

use dugout_core::config::{EnvironmentConfig, WeightsConfig};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Batting
// ---------------------------------------------------------------------------

/// Per player-season batting counting stats.
///
/// `hits >= singles + doubles + triples + hr` is expected of clean data but
/// not enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattingStats {
    pub games: u32,
    pub pa: u32,
    pub ab: u32,
    pub hits: u32,
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    pub hr: u32,
    pub rbi: u32,
    pub runs: u32,
    pub bb: u32,
    pub so: u32,
    pub sb: u32,
    pub sf: u32,
    pub total_bases: u32,
}

/// Rate stats derived from [`BattingStats`] alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedStats {
    pub avg: f64,
    pub obp: f64,
    pub slg: f64,
    pub ops: f64,
    pub iso: f64,
    pub babip: f64,
    pub k_pct: f64,
    pub bb_pct: f64,
}

/// League-context stats. `None` means the value could not be computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightedStats {
    #[serde(rename = "wOBA")]
    pub woba: Option<f64>,
    #[serde(rename = "wRC")]
    pub wrc: Option<f64>,
    #[serde(rename = "wRCPlus")]
    pub wrc_plus: Option<f64>,
    #[serde(rename = "opsPlus")]
    pub ops_plus: Option<f64>,
}

// ---------------------------------------------------------------------------
// Pitching
// ---------------------------------------------------------------------------

/// Per player-season pitching counting stats.
///
/// `ip` keeps the scorer's notation: `6.1` and `6.2` mean six and one/two
/// thirds innings. It is never renormalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchingStats {
    pub games: u32,
    pub ip: f64,
    pub bf: u32,
    pub so: u32,
    pub bb: u32,
    pub h: u32,
    pub hr: u32,
    pub r: u32,
    pub er: u32,
    pub w: u32,
    pub l: u32,
    pub sv: u32,
    pub hld: u32,
    pub cs: u32,
    /// Successful plus failed caught-stealing attempts.
    pub cs_attempts: u32,
}

/// Pitching rates derived at parse time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchingCalculated {
    pub era: f64,
    pub whip: f64,
    /// Pre-computed upstream; `None` when the source value was not positive.
    pub fip: Option<f64>,
    pub k_per9: f64,
    pub bb_per9: f64,
    pub h_per9: f64,
    pub cs_percentage: f64,
}

// ---------------------------------------------------------------------------
// League context
// ---------------------------------------------------------------------------

/// wOBA linear weights for one league year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WobaWeights {
    #[serde(rename = "BB")]
    pub bb: f64,
    #[serde(rename = "HBP")]
    pub hbp: f64,
    #[serde(rename = "1B")]
    pub single: f64,
    #[serde(rename = "2B")]
    pub double: f64,
    #[serde(rename = "3B")]
    pub triple: f64,
    #[serde(rename = "HR")]
    pub hr: f64,
}

impl From<&WeightsConfig> for WobaWeights {
    fn from(w: &WeightsConfig) -> Self {
        WobaWeights {
            bb: w.bb,
            hbp: w.hbp,
            single: w.single,
            double: w.double,
            triple: w.triple,
            hr: w.hr,
        }
    }
}

impl Default for WobaWeights {
    fn default() -> Self {
        WobaWeights::from(&WeightsConfig::default())
    }
}

/// League-wide averages for one season.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueStats {
    pub year: u32,
    pub avg_batting_avg: f64,
    #[serde(rename = "avgOBP")]
    pub avg_obp: f64,
    #[serde(rename = "avgSLG")]
    pub avg_slg: f64,
    #[serde(rename = "avgOPS")]
    pub avg_ops: f64,
    #[serde(rename = "totalPA")]
    pub total_pa: u64,
    #[serde(rename = "totalAB")]
    pub total_ab: u64,
    #[serde(rename = "wOBAScale")]
    pub woba_scale: f64,
    #[serde(rename = "wOBAWeights")]
    pub woba_weights: WobaWeights,
}

/// League run environment for wRC and wRC+.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunEnvironment {
    pub league_woba: f64,
    pub runs_per_pa: f64,
}

impl From<&EnvironmentConfig> for RunEnvironment {
    fn from(env: &EnvironmentConfig) -> Self {
        RunEnvironment {
            league_woba: env.league_woba,
            runs_per_pa: env.runs_per_pa,
        }
    }
}

impl Default for RunEnvironment {
    fn default() -> Self {
        RunEnvironment::from(&EnvironmentConfig::default())
    }
}
