// League-wide aggregates and per-team summaries over a season's records.

use crate::sabermetrics::avg;
use crate::season::SeasonRecord;
use crate::stats::{LeagueStats, WobaWeights};
use dugout_core::config::{Config, WeightsConfig};
use dugout_core::numeric::ratio_or_zero;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

// ---------------------------------------------------------------------------
// League aggregate
// ---------------------------------------------------------------------------

impl LeagueStats {
    /// Aggregate every record of `year` into league context.
    ///
    /// A year with no at-bats yields zero rates; OPS+ against such a league
    /// is undefined.
    pub fn aggregate(year: u32, records: &[SeasonRecord], weights: &WeightsConfig) -> Self {
        let mut ab = 0u64;
        let mut hits = 0u64;
        let mut bb = 0u64;
        let mut pa = 0u64;
        let mut total_bases = 0u64;

        for record in records.iter().filter(|r| r.year == year) {
            let b = &record.batting;
            ab += u64::from(b.ab);
            hits += u64::from(b.hits);
            bb += u64::from(b.bb);
            pa += u64::from(b.pa);
            total_bases += u64::from(b.total_bases);
        }

        let avg_batting_avg = ratio_or_zero(hits as f64, ab as f64);
        let avg_obp = ratio_or_zero((hits + bb) as f64, (ab + bb) as f64);
        let avg_slg = ratio_or_zero(total_bases as f64, ab as f64);

        debug!(year, pa, ab, "aggregated league stats");

        LeagueStats {
            year,
            avg_batting_avg,
            avg_obp,
            avg_slg,
            avg_ops: avg_obp + avg_slg,
            total_pa: pa,
            total_ab: ab,
            woba_scale: weights.scale,
            woba_weights: WobaWeights::from(weights),
        }
    }
}

// ---------------------------------------------------------------------------
// Team directory
// ---------------------------------------------------------------------------

/// Team name to team id lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamDirectory {
    ids: HashMap<String, String>,
}

impl TeamDirectory {
    pub fn new(ids: HashMap<String, String>) -> Self {
        TeamDirectory { ids }
    }

    pub fn from_config(config: &Config) -> Self {
        TeamDirectory::new(config.teams.clone())
    }

    /// Id for a team name; names without an entry are their own id.
    pub fn id_for<'a>(&'a self, name: &'a str) -> &'a str {
        self.ids.get(name).map(String::as_str).unwrap_or(name)
    }
}

// ---------------------------------------------------------------------------
// Team summaries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub team_id: String,
    pub team_name: String,
    pub year: u32,
    pub total_players: usize,
    /// Mean of per-player batting averages; players without at-bats count
    /// as 0.
    pub avg_batting_avg: f64,
    pub total_home_runs: u32,
}

#[derive(Default)]
struct TeamTally {
    players: usize,
    avg_sum: f64,
    hr: u32,
}

/// Summaries for every team with a record in `year`, ordered by team name.
pub fn summarize_teams(
    year: u32,
    records: &[SeasonRecord],
    directory: &TeamDirectory,
) -> Vec<TeamSummary> {
    let mut tallies: BTreeMap<&str, TeamTally> = BTreeMap::new();
    for record in records.iter().filter(|r| r.year == year) {
        let tally = tallies.entry(record.team.as_str()).or_default();
        tally.players += 1;
        tally.avg_sum += avg(&record.batting);
        tally.hr = tally.hr.saturating_add(record.batting.hr);
    }

    tallies
        .into_iter()
        .map(|(name, tally)| TeamSummary {
            team_id: directory.id_for(name).to_string(),
            team_name: name.to_string(),
            year,
            total_players: tally.players,
            avg_batting_avg: ratio_or_zero(tally.avg_sum, tally.players as f64),
            total_home_runs: tally.hr,
        })
        .collect()
}
