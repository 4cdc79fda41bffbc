// Season export parsing and per-player aggregation.
//
// The season export is a header-labeled CSV whose labels are the league's
// Chinese column names. Line 1 is a league summary line and is skipped;
// line 2 carries the labels. Each following row is one player-year.

use crate::stats::{BattingStats, PitchingCalculated, PitchingStats};
use dugout_core::numeric::{parse_count, parse_decimal, ratio_or_zero};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Column labels
// ---------------------------------------------------------------------------

/// Source column labels, used verbatim as lookup keys.
pub mod labels {
    pub const CODE: &str = "聯盟編碼";
    pub const YEAR: &str = "年份";
    pub const TEAM: &str = "所屬球團";
    pub const NUMBER: &str = "背號";
    pub const NAME: &str = "球員";
    pub const PHOTO: &str = "頒獎照片";

    pub const GAMES: &str = "出賽";
    pub const PA: &str = "打席";
    pub const AB: &str = "打數";
    pub const HITS: &str = "安打";
    pub const SINGLES: &str = "一安";
    pub const DOUBLES: &str = "二安";
    pub const TRIPLES: &str = "三安";
    pub const HR: &str = "全打";
    pub const RBI: &str = "打點";
    pub const RUNS: &str = "得分";
    /// Walks plus hit-by-pitch. The export uses this one column for both the
    /// batting and the pitching side.
    pub const BB: &str = "四死";
    pub const SO: &str = "三振";
    pub const SB: &str = "盜壘成功";
    pub const SF: &str = "犧打";
    pub const TOTAL_BASES: &str = "壘打數";

    pub const IP: &str = "局數";
    pub const BF: &str = "人次";
    pub const PITCHING_SO: &str = "奪三振";
    pub const HITS_ALLOWED: &str = "被安打";
    pub const HR_ALLOWED: &str = "被HR";
    pub const RUNS_ALLOWED: &str = "失分";
    pub const EARNED_RUNS: &str = "責失";
    pub const PITCHING_GAMES: &str = "出場";
    pub const WINS: &str = "勝";
    pub const LOSSES: &str = "負";
    pub const SAVES: &str = "救援點";
    pub const HOLDS: &str = "和";
    pub const CS: &str = "阻殺成功";
    pub const CS_FAILED: &str = "阻殺失敗";
    pub const FIP: &str = "FIP數據";

    pub const RC: &str = "RC數據";

    pub const RANK_RC: &str = "RC排名";
    pub const RANK_HITS: &str = "安打排名";
    pub const RANK_HR: &str = "全壘打排名";
    pub const RANK_RBI: &str = "打點排名";
    pub const RANK_AVG: &str = "打擊率排名";
    pub const RANK_W: &str = "勝排名";
    pub const RANK_SV: &str = "救援排名";
    pub const RANK_SO: &str = "奪三振排名";
    pub const RANK_ERA: &str = "防禦率排名";
    pub const RANK_WHIP: &str = "WHIP排名";
    pub const RANK_FIP: &str = "FIP排名";
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One labeled row of the season export. Missing labels read as "".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSeasonRow {
    cells: HashMap<String, String>,
}

impl RawSeasonRow {
    pub fn new() -> Self {
        RawSeasonRow::default()
    }

    /// Insert a value; a repeated label replaces the earlier value.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(label.into(), value.into());
    }

    pub fn get(&self, label: &str) -> &str {
        self.cells.get(label).map(|v| v.trim()).unwrap_or("")
    }

    fn count(&self, label: &str) -> u32 {
        parse_count(self.get(label))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawSeasonRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawSeasonRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

/// Pitching block of a season, present only when the player pitched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonPitching {
    pub stats: PitchingStats,
    pub calculated: PitchingCalculated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvancedStats {
    /// Runs created, pre-computed upstream.
    pub rc: f64,
}

/// League leaderboard positions. 0 means unranked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRankings {
    pub rc: u32,
    pub hits: u32,
    pub hr: u32,
    pub rbi: u32,
    pub avg: u32,
    pub w: u32,
    pub sv: u32,
    pub so: u32,
    pub era: u32,
    pub whip: u32,
    pub fip: u32,
}

/// A fully typed player-year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonRecord {
    /// Player code followed by the season year.
    pub id: String,
    pub code: String,
    pub year: u32,
    pub team: String,
    pub number: String,
    pub name: String,
    pub photo: String,
    pub batting: BattingStats,
    /// `None` when the player did not pitch this season.
    pub pitching: Option<SeasonPitching>,
    pub advanced: AdvancedStats,
    pub rankings: SeasonRankings,
}

impl SeasonRecord {
    pub fn has_pitching_data(&self) -> bool {
        self.pitching.is_some()
    }
}

/// One season as listed on a player card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeason {
    pub year: u32,
    pub team: String,
    pub number: String,
    pub batting: BattingStats,
    pub pitching: Option<SeasonPitching>,
    pub rankings: SeasonRankings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Career {
    /// Earliest season year.
    pub debut: u32,
    /// Distinct teams in first-seen order.
    pub teams: Vec<String>,
    pub total_seasons: usize,
}

/// A player with every season grouped under their code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub code: String,
    pub name: String,
    pub photo: String,
    pub career: Career,
    /// Newest season first.
    pub seasons: Vec<PlayerSeason>,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SeasonError {
    #[error("failed to read season export: {source}")]
    Csv { source: csv::Error },

    #[error("season export has no column label row")]
    MissingHeader,
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// Parse one labeled row into a [`SeasonRecord`]. Never fails: unparseable
/// or negative counts become 0.
pub fn parse_season_row(row: &RawSeasonRow) -> SeasonRecord {
    let code = row.get(labels::CODE).to_string();
    let year_raw = row.get(labels::YEAR);

    let batting = BattingStats {
        games: row.count(labels::GAMES),
        pa: row.count(labels::PA),
        ab: row.count(labels::AB),
        hits: row.count(labels::HITS),
        singles: row.count(labels::SINGLES),
        doubles: row.count(labels::DOUBLES),
        triples: row.count(labels::TRIPLES),
        hr: row.count(labels::HR),
        rbi: row.count(labels::RBI),
        runs: row.count(labels::RUNS),
        bb: row.count(labels::BB),
        so: row.count(labels::SO),
        sb: row.count(labels::SB),
        sf: row.count(labels::SF),
        total_bases: row.count(labels::TOTAL_BASES),
    };

    SeasonRecord {
        id: format!("{code}{year_raw}"),
        year: parse_count(year_raw),
        code,
        team: row.get(labels::TEAM).to_string(),
        number: row.get(labels::NUMBER).to_string(),
        name: row.get(labels::NAME).to_string(),
        photo: row.get(labels::PHOTO).to_string(),
        batting,
        pitching: parse_pitching(row),
        advanced: AdvancedStats {
            rc: parse_decimal(row.get(labels::RC)),
        },
        rankings: SeasonRankings {
            rc: row.count(labels::RANK_RC),
            hits: row.count(labels::RANK_HITS),
            hr: row.count(labels::RANK_HR),
            rbi: row.count(labels::RANK_RBI),
            avg: row.count(labels::RANK_AVG),
            w: row.count(labels::RANK_W),
            sv: row.count(labels::RANK_SV),
            so: row.count(labels::RANK_SO),
            era: row.count(labels::RANK_ERA),
            whip: row.count(labels::RANK_WHIP),
            fip: row.count(labels::RANK_FIP),
        },
    }
}

fn parse_pitching(row: &RawSeasonRow) -> Option<SeasonPitching> {
    let ip = parse_decimal(row.get(labels::IP));
    if ip <= 0.0 {
        return None;
    }

    let cs = row.count(labels::CS);
    let stats = PitchingStats {
        games: row.count(labels::PITCHING_GAMES),
        ip,
        bf: row.count(labels::BF),
        so: row.count(labels::PITCHING_SO),
        bb: row.count(labels::BB),
        h: row.count(labels::HITS_ALLOWED),
        hr: row.count(labels::HR_ALLOWED),
        r: row.count(labels::RUNS_ALLOWED),
        er: row.count(labels::EARNED_RUNS),
        w: row.count(labels::WINS),
        l: row.count(labels::LOSSES),
        sv: row.count(labels::SAVES),
        hld: row.count(labels::HOLDS),
        cs,
        cs_attempts: cs.saturating_add(row.count(labels::CS_FAILED)),
    };

    let fip = parse_decimal(row.get(labels::FIP));
    let per9 = |n: u32| ratio_or_zero(n as f64 * 9.0, ip);

    let calculated = PitchingCalculated {
        era: per9(stats.er),
        whip: ratio_or_zero(stats.h as f64 + stats.bb as f64, ip),
        fip: (fip > 0.0).then_some(fip),
        k_per9: per9(stats.so),
        bb_per9: per9(stats.bb),
        h_per9: per9(stats.h),
        cs_percentage: ratio_or_zero(stats.cs as f64, stats.cs_attempts as f64),
    };

    Some(SeasonPitching { stats, calculated })
}

// ---------------------------------------------------------------------------
// Export reading
// ---------------------------------------------------------------------------

/// Read a whole season export.
///
/// Rows without a season year or player name are dropped. Records the CSV
/// reader cannot decode are logged and skipped; only I/O failures and a
/// missing label row are errors.
pub fn read_season_export<R: Read>(rdr: R) -> Result<Vec<SeasonRecord>, SeasonError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let mut headers: Option<Vec<String>> = None;
    let mut records = Vec::new();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(SeasonError::Csv { source: e }),
            Err(e) => {
                warn!("skipping malformed season row: {}", e);
                continue;
            }
        };

        // Line 1 is the league summary line.
        if record.position().is_some_and(|p| p.line() == 1) {
            continue;
        }

        if headers.is_none() {
            headers = Some(record.iter().map(str::to_string).collect());
            continue;
        }
        let columns = headers.as_deref().unwrap_or_default();

        let row: RawSeasonRow = columns
            .iter()
            .zip(record.iter())
            .filter(|(label, _)| !label.is_empty())
            .map(|(label, value)| (label.as_str(), value))
            .collect();

        let parsed = parse_season_row(&row);
        if parsed.year == 0 || parsed.name.is_empty() {
            debug!(
                line = record.position().map(|p| p.line()),
                "dropping season row without year or player name"
            );
            continue;
        }
        records.push(parsed);
    }

    if headers.is_none() {
        return Err(SeasonError::MissingHeader);
    }

    debug!("parsed {} season rows", records.len());
    Ok(records)
}

// ---------------------------------------------------------------------------
// Player aggregation
// ---------------------------------------------------------------------------

/// Group season records by player code. Players come out ordered by code;
/// each player's seasons are ordered newest first.
pub fn aggregate_players(records: &[SeasonRecord]) -> Vec<Player> {
    let mut by_code: BTreeMap<&str, Vec<&SeasonRecord>> = BTreeMap::new();
    for record in records {
        by_code.entry(record.code.as_str()).or_default().push(record);
    }

    by_code
        .into_iter()
        .filter_map(|(code, rows)| {
            let first = rows.first()?;

            let mut teams: Vec<String> = Vec::new();
            for row in &rows {
                if !teams.contains(&row.team) {
                    teams.push(row.team.clone());
                }
            }

            let career = Career {
                debut: rows.iter().map(|r| r.year).min().unwrap_or(0),
                teams,
                total_seasons: rows.len(),
            };

            let mut seasons: Vec<PlayerSeason> = rows
                .iter()
                .map(|r| PlayerSeason {
                    year: r.year,
                    team: r.team.clone(),
                    number: r.number.clone(),
                    batting: r.batting,
                    pitching: r.pitching,
                    rankings: r.rankings,
                })
                .collect();
            seasons.sort_by(|a, b| b.year.cmp(&a.year));

            Some(Player {
                id: code.to_string(),
                code: code.to_string(),
                name: first.name.clone(),
                photo: first.photo.clone(),
                career,
                seasons,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
