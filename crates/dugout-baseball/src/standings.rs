// League standings: points, win rate, games behind, and rank.
//
// Points rules: win = 3, draw = 1, loss = 0.
// Win rate = W / (W + L); draws count in neither.
// Games behind = (leader W - team W + team L - leader L) / 2.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

const POINTS_WIN: u64 = 3;
const POINTS_DRAW: u64 = 1;

/// Won-loss-draw record for one team, as supplied by the schedule feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecordRaw {
    pub team_id: String,
    pub team_name: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Average runs allowed per game.
    pub runs_allowed: f64,
    /// Average runs scored per game.
    pub runs_scored: f64,
}

/// A ranked standings entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    #[serde(flatten)]
    pub record: TeamRecordRaw,
    pub rank: usize,
    pub games_played: u64,
    pub points: u64,
    pub win_rate: f64,
    /// `None` for the league leader only.
    pub games_behind: Option<f64>,
}

/// Counts are widened to `u64`, so any pair of `u32` counts fits.
pub fn points(wins: u32, draws: u32) -> u64 {
    u64::from(wins) * POINTS_WIN + u64::from(draws) * POINTS_DRAW
}

/// Fraction of decisions won. Returns 0.0 when the team has no decisions.
pub fn win_rate(wins: u32, losses: u32) -> f64 {
    let decisions = u64::from(wins) + u64::from(losses);
    if decisions == 0 {
        return 0.0;
    }
    wins as f64 / decisions as f64
}

/// Games behind `leader`, given as `(wins, losses)` pairs. Can be fractional
/// in half-game steps.
pub fn games_behind(leader: (u32, u32), team: (u32, u32)) -> f64 {
    let (leader_wins, leader_losses) = leader;
    let (team_wins, team_losses) = team;
    (leader_wins as f64 - team_wins as f64 + team_losses as f64 - leader_losses as f64) / 2.0
}

/// Rank teams by points, then win rate, both descending.
///
/// The sort is stable, so teams tied on both keys come out in input order.
/// That order carries no meaning (no further tiebreak is defined) and
/// callers should not depend on it.
pub fn calculate_standings(teams: &[TeamRecordRaw]) -> Vec<TeamRecord> {
    let mut entries: Vec<TeamRecord> = teams
        .iter()
        .map(|team| TeamRecord {
            record: team.clone(),
            rank: 0,
            games_played: u64::from(team.wins) + u64::from(team.losses) + u64::from(team.draws),
            points: points(team.wins, team.draws),
            win_rate: win_rate(team.wins, team.losses),
            games_behind: None,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.points.cmp(&a.points).then_with(|| {
            b.win_rate
                .partial_cmp(&a.win_rate)
                .unwrap_or(Ordering::Equal)
        })
    });

    let Some(leader) = entries.first().map(|e| (e.record.wins, e.record.losses)) else {
        return entries;
    };

    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = index + 1;
        if index > 0 {
            entry.games_behind = Some(games_behind(
                leader,
                (entry.record.wins, entry.record.losses),
            ));
        }
    }

    entries
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
