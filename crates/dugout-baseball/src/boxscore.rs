// Single-game box score parsing from the scoresheet template export.
//
// The scoresheet has no header row to key on: every value sits at a fixed
// row/column coordinate of the spreadsheet template. All coordinates live in
// `layout` so a template change is a one-place edit.

use dugout_core::grid::{parse_grid, Grid};
use dugout_core::numeric::{parse_count, parse_decimal, parse_optional_count};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of inning slots per side in the line score.
pub const INNING_SLOTS: usize = 9;

/// Fixed cell coordinates of the scoresheet template.
pub mod layout {
    pub const DATE_ROW: usize = 0;
    pub const DATE_COL: usize = 13;

    pub const HOME_LINE_ROW: usize = 2;
    pub const AWAY_LINE_ROW: usize = 3;
    /// Columns 4-9 hold innings 1-6 and 11-13 innings 7-9. Column 10 is a
    /// visual spacer in the template and never holds data.
    pub const INNING_COLS: [usize; super::INNING_SLOTS] = [4, 5, 6, 7, 8, 9, 11, 12, 13];
    pub const SPACER_COL: usize = 10;
    pub const RUNS_COL: usize = 14;
    pub const HITS_COL: usize = 15;
    pub const ERRORS_COL: usize = 16;

    pub const TEAM_NAME_ROW: usize = 4;
    pub const HOME_NAME_COL: usize = 1;
    pub const AWAY_NAME_COL: usize = 11;

    pub const PITCHER_ROWS: std::ops::RangeInclusive<usize> = 5..=7;

    /// Team batting average cell on the batter section header row.
    pub const BATTING_AVG_ROW: usize = 9;
    pub const HOME_BATTING_AVG_COL: usize = 9;
    pub const FIRST_BATTER_ROW: usize = 10;

    /// First column of each side's player block.
    pub const HOME_BLOCK: usize = 0;
    pub const AWAY_BLOCK: usize = 10;

    // Offsets within a pitcher block.
    pub const P_NUMBER: usize = 0;
    pub const P_NAME: usize = 1;
    pub const P_IP: usize = 2;
    pub const P_PITCHES: usize = 3;
    pub const P_STRIKEOUTS: usize = 4;
    pub const P_WALKS: usize = 5;
    pub const P_HITS: usize = 6;
    pub const P_HOME_RUNS: usize = 7;
    pub const P_RUNS: usize = 8;

    // Offsets within a batter block.
    pub const B_NUMBER: usize = 0;
    pub const B_NAME: usize = 1;
    pub const B_PA: usize = 2;
    pub const B_HITS: usize = 3;
    pub const B_STRIKEOUTS: usize = 4;
    pub const B_WALKS: usize = 5;
    pub const B_RBI: usize = 6;
    pub const B_RUNS: usize = 7;
    pub const B_STOLEN_BASES: usize = 8;

    /// Name used by the template's summary rows.
    pub const TOTAL_LABEL: &str = "TOTAL";
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One pitcher's line for a single game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitcherLine {
    pub number: String,
    pub name: String,
    /// Innings pitched exactly as written on the scoresheet (`6.2`).
    pub ip: String,
    /// Pitches thrown.
    pub np: u32,
    pub k: u32,
    pub bb: u32,
    pub h: u32,
    pub hr: u32,
    pub r: u32,
    /// The scoresheet has no earned-runs column, so this mirrors `r`.
    /// ERA derived from it is a runs-allowed average, not a true ERA.
    pub er: u32,
}

/// One batter's line for a single game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatterLine {
    pub number: String,
    pub name: String,
    pub pa: u32,
    /// Derived as `pa - bb`; the sheet records neither sacrifice flies nor
    /// hit-by-pitch per batter.
    pub ab: u32,
    pub r: u32,
    pub h: u32,
    pub rbi: u32,
    pub bb: u32,
    pub so: u32,
    pub sb: u32,
}

/// One side's totals and player lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamGameStats {
    pub name: String,
    pub runs: u32,
    pub hits: u32,
    pub errors: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batting_avg: Option<f64>,
    pub pitchers: Vec<PitcherLine>,
    pub batters: Vec<BatterLine>,
}

/// Inning-by-inning runs. `None` marks an inning that was not played or in
/// which the side did not bat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineScore {
    pub home: [Option<u32>; INNING_SLOTS],
    pub away: [Option<u32>; INNING_SLOTS],
}

impl LineScore {
    /// Number of innings with a recorded score for whichever side batted
    /// more often.
    pub fn innings_played(&self) -> usize {
        let count = |side: &[Option<u32>; INNING_SLOTS]| side.iter().filter(|s| s.is_some()).count();
        count(&self.home).max(count(&self.away))
    }
}

/// A complete single-game box score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameReport {
    pub game_number: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    pub innings: LineScore,
    pub home_team: TeamGameStats,
    pub away_team: TeamGameStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Home,
    Away,
}

impl Side {
    fn block(self) -> usize {
        match self {
            Side::Home => layout::HOME_BLOCK,
            Side::Away => layout::AWAY_BLOCK,
        }
    }

    fn line_row(self) -> usize {
        match self {
            Side::Home => layout::HOME_LINE_ROW,
            Side::Away => layout::AWAY_LINE_ROW,
        }
    }

    fn name_col(self) -> usize {
        match self {
            Side::Home => layout::HOME_NAME_COL,
            Side::Away => layout::AWAY_NAME_COL,
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a scoresheet export into a [`GameReport`].
///
/// Never fails. Missing cells read as empty, so a short or empty sheet
/// yields empty team names, zero totals and an all-`None` line score.
pub fn parse_game_report(text: &str, game_number: &str, venue: Option<&str>) -> GameReport {
    let grid = parse_grid(text);
    report_from_grid(&grid, game_number, venue)
}

/// Build a [`GameReport`] from an already-parsed grid.
pub fn report_from_grid(grid: &Grid, game_number: &str, venue: Option<&str>) -> GameReport {
    let date = grid.trimmed(layout::DATE_ROW, layout::DATE_COL).replace('/', "-");

    let innings = LineScore {
        home: inning_slots(grid, Side::Home),
        away: inning_slots(grid, Side::Away),
    };

    let mut home_team = team_totals(grid, Side::Home);
    let mut away_team = team_totals(grid, Side::Away);

    home_team.pitchers = pitcher_lines(grid, Side::Home);
    away_team.pitchers = pitcher_lines(grid, Side::Away);

    home_team.batting_avg = Some(parse_decimal(
        grid.trimmed(layout::BATTING_AVG_ROW, layout::HOME_BATTING_AVG_COL),
    ));

    home_team.batters = batter_lines(grid, Side::Home, &home_team.name);
    away_team.batters = batter_lines(grid, Side::Away, &away_team.name);

    debug!(
        game_number,
        home = %home_team.name,
        away = %away_team.name,
        innings = innings.innings_played(),
        "parsed box score"
    );

    GameReport {
        game_number: game_number.to_string(),
        date,
        venue: venue.map(str::to_string),
        innings,
        home_team,
        away_team,
    }
}

fn inning_slots(grid: &Grid, side: Side) -> [Option<u32>; INNING_SLOTS] {
    let row = side.line_row();
    layout::INNING_COLS.map(|col| parse_optional_count(grid.trimmed(row, col)))
}

fn team_totals(grid: &Grid, side: Side) -> TeamGameStats {
    let row = side.line_row();
    TeamGameStats {
        name: grid.trimmed(layout::TEAM_NAME_ROW, side.name_col()).to_string(),
        runs: parse_count(grid.trimmed(row, layout::RUNS_COL)),
        hits: parse_count(grid.trimmed(row, layout::HITS_COL)),
        errors: parse_count(grid.trimmed(row, layout::ERRORS_COL)),
        ..TeamGameStats::default()
    }
}

fn pitcher_lines(grid: &Grid, side: Side) -> Vec<PitcherLine> {
    let base = side.block();
    let cell = |row: usize, offset: usize| grid.trimmed(row, base + offset);

    layout::PITCHER_ROWS
        .filter_map(|row| {
            let name = cell(row, layout::P_NAME);
            if name.is_empty() || name == layout::TOTAL_LABEL {
                return None;
            }
            let ip = cell(row, layout::P_IP);
            let runs = parse_count(cell(row, layout::P_RUNS));
            Some(PitcherLine {
                number: cell(row, layout::P_NUMBER).to_string(),
                name: name.to_string(),
                ip: if ip.is_empty() { "0".to_string() } else { ip.to_string() },
                np: parse_count(cell(row, layout::P_PITCHES)),
                k: parse_count(cell(row, layout::P_STRIKEOUTS)),
                bb: parse_count(cell(row, layout::P_WALKS)),
                h: parse_count(cell(row, layout::P_HITS)),
                hr: parse_count(cell(row, layout::P_HOME_RUNS)),
                r: runs,
                er: runs,
            })
        })
        .collect()
}

fn batter_lines(grid: &Grid, side: Side, team_name: &str) -> Vec<BatterLine> {
    let base = side.block();
    let cell = |row: usize, offset: usize| grid.trimmed(row, base + offset);

    (layout::FIRST_BATTER_ROW..grid.row_count())
        .filter_map(|row| {
            let name = cell(row, layout::B_NAME);
            if name.is_empty() || name == layout::TOTAL_LABEL || name == team_name {
                return None;
            }
            let pa = parse_count(cell(row, layout::B_PA));
            let bb = parse_count(cell(row, layout::B_WALKS));
            Some(BatterLine {
                number: cell(row, layout::B_NUMBER).to_string(),
                name: name.to_string(),
                pa,
                ab: pa.saturating_sub(bb),
                r: parse_count(cell(row, layout::B_RUNS)),
                h: parse_count(cell(row, layout::B_HITS)),
                rbi: parse_count(cell(row, layout::B_RBI)),
                bb,
                so: parse_count(cell(row, layout::B_STRIKEOUTS)),
                sb: parse_count(cell(row, layout::B_STOLEN_BASES)),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
