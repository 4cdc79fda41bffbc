// Integration tests for the stats engine.
//
// These exercise the public API end to end: a season export flows through
// row parsing, player aggregation, league context and the formula layer into
// display strings; a scoresheet export becomes a box score; raw team records
// become ranked standings.

use std::collections::HashMap;

use dugout_baseball::boxscore::parse_game_report;
use dugout_baseball::format::*;
use dugout_baseball::league::{summarize_teams, TeamDirectory};
use dugout_baseball::sabermetrics::calculate_all_stats;
use dugout_baseball::season::{aggregate_players, read_season_export, SeasonRecord};
use dugout_baseball::standings::{calculate_standings, TeamRecordRaw};
use dugout_baseball::stats::{LeagueStats, RunEnvironment};
use dugout_core::config::WeightsConfig;

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture directory path (relative to the crate root, which is the cwd for
/// `cargo test`).
const FIXTURES: &str = "tests/fixtures";

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

fn season_records() -> Vec<SeasonRecord> {
    let file = std::fs::File::open(format!("{FIXTURES}/season.csv")).expect("season fixture should exist");
    read_season_export(file).expect("season fixture should parse")
}

fn find<'a>(records: &'a [SeasonRecord], id: &str) -> &'a SeasonRecord {
    records
        .iter()
        .find(|r| r.id == id)
        .unwrap_or_else(|| panic!("missing record {id}"))
}

/// One scoresheet row of `width` cells from `(column, value)` pairs.
fn sheet_row(width: usize, cells: &[(usize, &str)]) -> String {
    let mut row = vec![String::new(); width];
    for (col, value) in cells {
        row[*col] = (*value).to_string();
    }
    row.join(",")
}

// ===========================================================================
// Season export
// ===========================================================================

#[test]
fn season_export_keeps_only_complete_rows() {
    let records = season_records();
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["P0012025", "P0022025", "P0032025", "P0012024"]);

    let lin = find(&records, "P0012025");
    assert_eq!(lin.team, "Line Drive");
    assert_eq!(lin.number, "39");
    assert_eq!(lin.rankings.avg, 1);
    assert_eq!(lin.rankings.rc, 2);
    assert_eq!(lin.advanced.rc, 9.5);
    assert!(!lin.has_pitching_data());

    // An explicit zero innings still means no pitching block.
    assert!(!find(&records, "P0012024").has_pitching_data());
}

#[test]
fn pitcher_rates_from_export() {
    let records = season_records();
    let pitching = find(&records, "P0022025").pitching.expect("pitched in 2025");

    assert_eq!(pitching.stats.ip, 30.0);
    assert_eq!(pitching.stats.w, 4);
    assert_eq!(pitching.stats.cs_attempts, 4);
    assert!(approx_eq(pitching.calculated.era, 3.0, 1e-12));
    assert!(approx_eq(pitching.calculated.whip, 0.9, 1e-12));
    assert!(approx_eq(pitching.calculated.k_per9, 9.9, 1e-12));
    assert_eq!(pitching.calculated.cs_percentage, 0.25);
    assert_eq!(pitching.calculated.fip, Some(3.10));

    assert_eq!(format_number(Some(pitching.calculated.era), 2), "3.00");
    assert_eq!(format_number(Some(pitching.calculated.whip), 2), "0.90");
    assert_eq!(format_number(pitching.calculated.fip, 2), "3.10");
}

#[test]
fn players_group_seasons_newest_first() {
    let players = aggregate_players(&season_records());
    let codes: Vec<&str> = players.iter().map(|p| p.code.as_str()).collect();
    assert_eq!(codes, vec!["P001", "P002", "P003"]);

    let lin = &players[0];
    assert_eq!(lin.name, "林倫齊");
    assert_eq!(lin.career.debut, 2024);
    assert_eq!(lin.career.total_seasons, 2);
    assert_eq!(lin.career.teams, vec!["Line Drive".to_string(), "Phoenix".to_string()]);
    assert_eq!(lin.seasons[0].year, 2025);
    assert_eq!(lin.seasons[1].year, 2024);
    assert_eq!(lin.seasons[1].team, "Phoenix");
}

// ===========================================================================
// League context and formulas
// ===========================================================================

#[test]
fn league_context_for_a_season() {
    let records = season_records();
    let league = LeagueStats::aggregate(2025, &records, &WeightsConfig::default());

    assert_eq!(league.total_ab, 88);
    assert_eq!(league.total_pa, 100);
    assert!(approx_eq(league.avg_batting_avg, 25.0 / 88.0, 1e-12));
    assert!(approx_eq(league.avg_obp, 35.0 / 98.0, 1e-12));
    assert!(approx_eq(league.avg_slg, 33.0 / 88.0, 1e-12));
}

#[test]
fn batter_line_renders_for_display() {
    let records = season_records();
    let league = LeagueStats::aggregate(2025, &records, &WeightsConfig::default());
    let lin = find(&records, "P0012025");

    let stats = calculate_all_stats(&lin.batting, Some(&league), &RunEnvironment::default());
    let c = &stats.calculated;
    assert_eq!(format_avg(Some(c.avg)), ".375");
    assert_eq!(format_avg(Some(c.obp)), ".460");
    assert_eq!(format_avg(Some(c.slg)), ".550");
    assert_eq!(format_avg(Some(c.ops)), "1.010");
    assert_eq!(format_avg(Some(c.iso)), ".175");
    assert_eq!(format_avg(Some(c.babip)), ".382");
    assert_eq!(format_percentage(Some(c.k_pct), 1), "12.0%");
    assert_eq!(format_percentage(Some(c.bb_pct), 1), "16.0%");
    assert_eq!(format_stat_value(StatKind::from_key("ops"), Some(c.ops)), "1.010");
    assert_eq!(format_stat_value(StatKind::from_key("kPct"), Some(c.k_pct)), "12.0%");

    let w = &stats.weighted;
    assert!(approx_eq(w.woba.unwrap(), 21.94 / 50.0, 1e-9));
    assert_eq!(format_avg(w.woba), ".439");
    assert!(approx_eq(w.wrc.unwrap(), (21.94 / 50.0 - 0.340) / 1.20 * 50.0, 1e-9));
    assert_eq!(format_number(w.wrc_plus, 0), "69");
    assert_eq!(format_number(w.ops_plus, 0), "175");
}

#[test]
fn no_league_context_leaves_weighted_stats_empty() {
    let records = season_records();
    let stats = calculate_all_stats(&find(&records, "P0012025").batting, None, &RunEnvironment::default());

    assert_eq!(format_avg(Some(stats.calculated.avg)), ".375");
    assert!(stats.weighted.woba.is_none());
    assert!(stats.weighted.wrc.is_none());
    assert!(stats.weighted.wrc_plus.is_none());
    assert!(stats.weighted.ops_plus.is_none());
    assert_eq!(format_avg(stats.weighted.woba), "-");
}

#[test]
fn empty_league_year_has_no_ops_plus() {
    let records = season_records();
    let league = LeagueStats::aggregate(1990, &records, &WeightsConfig::default());
    let stats = calculate_all_stats(&find(&records, "P0012025").batting, Some(&league), &RunEnvironment::default());
    assert!(stats.weighted.ops_plus.is_none());
    assert!(stats.weighted.woba.is_some());
}

#[test]
fn team_summaries_for_a_season() {
    let records = season_records();
    let directory = TeamDirectory::new(HashMap::from([("Line Drive".to_string(), "ld".to_string())]));
    let teams = summarize_teams(2025, &records, &directory);

    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].team_id, "ld");
    assert_eq!(teams[0].total_players, 2);
    assert!(approx_eq(teams[0].avg_batting_avg, (0.375 + 4.0 / 18.0) / 2.0, 1e-12));
    assert_eq!(teams[0].total_home_runs, 2);
    assert_eq!(teams[1].team_id, "Phoenix");
    assert_eq!(teams[1].total_players, 1);
}

// ===========================================================================
// Box score
// ===========================================================================

#[test]
fn scoresheet_to_box_score() {
    let w = 20;
    let sheet = [
        sheet_row(w, &[(13, "2025/11/02")]),
        sheet_row(w, &[(4, "1"), (5, "2"), (6, "3")]),
        sheet_row(w, &[(4, "3"), (5, "0"), (6, "2"), (14, "5"), (15, "7"), (16, "1")]),
        sheet_row(w, &[(4, "0"), (5, "1"), (6, ""), (14, "1"), (15, "3"), (16, "2")]),
        sheet_row(w, &[(1, "Line Drive"), (11, "Phoenix")]),
        sheet_row(w, &[(0, "18"), (1, "呂柏融"), (2, "3"), (3, "45"), (4, "5"), (5, "1"), (6, "3"), (7, "0"), (8, "1")]),
        sheet_row(w, &[(10, "7"), (11, "王柏融"), (12, "2.2"), (13, "50"), (14, "2"), (15, "3"), (16, "7"), (17, "1"), (18, "5")]),
        sheet_row(w, &[(1, "TOTAL"), (11, "TOTAL")]),
        String::new(),
        sheet_row(w, &[(1, "Line Drive"), (9, ".412"), (11, "Phoenix")]),
        sheet_row(w, &[(0, "39"), (1, "林倫齊"), (2, "4"), (3, "2"), (4, "0"), (5, "1"), (6, "2"), (7, "1"), (8, "1")]),
        sheet_row(w, &[(1, "TOTAL"), (11, "Phoenix")]),
    ]
    .join("\r\n");

    let report = parse_game_report(&sheet, &format_game_number(2025, 201), None);
    assert_eq!(report.game_number, "2025201");
    assert_eq!(display_game_number(&report.game_number), "No.201");
    assert_eq!(format_date(Some(report.date.as_str())), "2025-11-02");

    assert_eq!(report.innings.home[..3], [Some(3), Some(0), Some(2)]);
    assert_eq!(report.innings.away[..3], [Some(0), Some(1), None]);
    assert_eq!(report.innings.innings_played(), 3);

    assert_eq!(report.home_team.name, "Line Drive");
    assert_eq!((report.home_team.runs, report.home_team.hits, report.home_team.errors), (5, 7, 1));
    assert_eq!(report.home_team.batting_avg, Some(0.412));
    assert_eq!(report.away_team.batting_avg, None);

    assert_eq!(report.home_team.pitchers.len(), 1);
    assert_eq!(report.away_team.pitchers[0].ip, "2.2");
    assert_eq!(report.away_team.pitchers[0].er, 5);

    let batters = &report.home_team.batters;
    assert_eq!(batters.len(), 1);
    assert_eq!(batters[0].name, "林倫齊");
    assert_eq!(batters[0].ab, 3);
    assert!(report.away_team.batters.is_empty());
}

// ===========================================================================
// Standings
// ===========================================================================

#[test]
fn standings_from_json_feed() {
    let feed = r#"[
        {"teamId": "ph", "teamName": "Phoenix", "wins": 8, "losses": 4, "draws": 0, "runsAllowed": 5.1, "runsScored": 6.0},
        {"teamId": "ld", "teamName": "Line Drive", "wins": 10, "losses": 2, "draws": 1, "runsAllowed": 3.2, "runsScored": 7.4},
        {"teamId": "kt", "teamName": "Kites", "wins": 8, "losses": 4, "draws": 2, "runsAllowed": 4.0, "runsScored": 5.5}
    ]"#;
    let raw: Vec<TeamRecordRaw> = serde_json::from_str(feed).unwrap();
    let table = calculate_standings(&raw);

    let order: Vec<&str> = table.iter().map(|t| t.record.team_id.as_str()).collect();
    assert_eq!(order, vec!["ld", "kt", "ph"]);
    assert_eq!(table.iter().map(|t| t.points).collect::<Vec<_>>(), vec![31, 26, 24]);
    assert_eq!(table.iter().map(|t| t.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(table[0].games_behind, None);
    assert_eq!(table[1].games_behind, Some(2.0));
    assert_eq!(table[2].games_behind, Some(2.0));
    assert_eq!(table[1].games_played, 14);
    assert_eq!(format_rank(Some(table[2].rank as u32)), "3rd");
    assert_eq!(format_avg(Some(table[0].win_rate)), ".833");

    let json = serde_json::to_value(&table[0]).unwrap();
    assert_eq!(json["teamName"], "Line Drive");
    assert_eq!(json["gamesBehind"], serde_json::Value::Null);
}
