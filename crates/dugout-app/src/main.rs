// Dugout command-line entry point.
//
// Startup sequence:
// 1. Parse the command line
// 2. Initialize tracing (stderr, so stdout carries only JSON)
// 3. Load config
// 4. Dispatch the subcommand and print its result as JSON

use dugout_baseball::boxscore;
use dugout_baseball::league::{summarize_teams, TeamDirectory};
use dugout_baseball::sabermetrics::calculate_all_stats;
use dugout_baseball::season;
use dugout_baseball::standings::{calculate_standings, TeamRecordRaw};
use dugout_baseball::stats::{LeagueStats, RunEnvironment};
use dugout_core::config::{self, Config};
use dugout_core::logging::init_tracing;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "dugout", version)]
#[command(about = "League statistics from season exports and scoresheets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a single-game scoresheet export into a box score
    Boxscore {
        /// Scoresheet CSV export
        file: PathBuf,
        /// Game identifier, e.g. 2025201
        game_number: String,
        /// Ballpark name
        venue: Option<String>,
    },
    /// Parse a season export; with a year, add league context and rate stats
    Season {
        /// Season CSV export
        file: PathBuf,
        /// Season to compute league context for
        year: Option<u32>,
    },
    /// Rank teams from a JSON array of team records
    Standings {
        /// Team records JSON
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    // 1. Parse the command line
    let cli = Cli::parse();

    // 2. Initialize tracing
    init_tracing().context("failed to set tracing subscriber")?;

    // 3. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!("Config loaded: {} team ids mapped", config.teams.len());

    // 4. Dispatch
    match cli.command {
        Command::Boxscore {
            file,
            game_number,
            venue,
        } => run_boxscore(&file, &game_number, venue.as_deref()),
        Command::Season { file, year } => run_season(&file, year, &config),
        Command::Standings { file } => run_standings(&file),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn run_boxscore(path: &Path, game_number: &str, venue: Option<&str>) -> anyhow::Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read scoresheet {}", path.display()))?;
    let report = boxscore::parse_game_report(&text, game_number, venue);
    info!(
        "Parsed game {}: {} {} - {} {}",
        report.game_number,
        report.home_team.name,
        report.home_team.runs,
        report.away_team.runs,
        report.away_team.name
    );
    print_json(&report)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SeasonBatter<'a> {
    id: &'a str,
    name: &'a str,
    team: &'a str,
    stats: dugout_baseball::sabermetrics::AllStats,
}

#[derive(Serialize)]
struct SeasonReport<'a> {
    league: LeagueStats,
    teams: Vec<dugout_baseball::league::TeamSummary>,
    players: Vec<SeasonBatter<'a>>,
}

fn run_season(path: &Path, year: Option<u32>, config: &Config) -> anyhow::Result<()> {
    let file = fs::File::open(path)
        .with_context(|| format!("failed to open season export {}", path.display()))?;
    let records = season::read_season_export(file)
        .with_context(|| format!("failed to parse season export {}", path.display()))?;
    info!("Loaded {} season rows", records.len());

    let Some(year) = year else {
        let players = season::aggregate_players(&records);
        info!("Aggregated {} players", players.len());
        return print_json(&players);
    };

    let league = LeagueStats::aggregate(year, &records, &config.weights);
    let env = RunEnvironment::from(&config.environment);
    let directory = TeamDirectory::from_config(config);

    let players: Vec<SeasonBatter> = records
        .iter()
        .filter(|r| r.year == year)
        .map(|r| SeasonBatter {
            id: &r.id,
            name: &r.name,
            team: &r.team,
            stats: calculate_all_stats(&r.batting, Some(&league), &env),
        })
        .collect();
    info!("Computed stats for {} players in {}", players.len(), year);

    print_json(&SeasonReport {
        league,
        teams: summarize_teams(year, &records, &directory),
        players,
    })
}

fn run_standings(path: &Path) -> anyhow::Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read team records {}", path.display()))?;
    let teams: Vec<TeamRecordRaw> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse team records {}", path.display()))?;
    let standings = calculate_standings(&teams);
    info!("Ranked {} teams", standings.len());
    print_json(&standings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn boxscore_venue_is_optional() {
        let cli = Cli::try_parse_from(["dugout", "boxscore", "game.csv", "2025201"]).unwrap();
        match cli.command {
            Command::Boxscore {
                file,
                game_number,
                venue,
            } => {
                assert_eq!(file, PathBuf::from("game.csv"));
                assert_eq!(game_number, "2025201");
                assert!(venue.is_none());
            }
            other => panic!("expected Boxscore, got {other:?}"),
        }

        let cli = Cli::try_parse_from(["dugout", "boxscore", "game.csv", "2025201", "Zhongzheng A"]).unwrap();
        match cli.command {
            Command::Boxscore { venue, .. } => assert_eq!(venue.as_deref(), Some("Zhongzheng A")),
            other => panic!("expected Boxscore, got {other:?}"),
        }
    }

    #[test]
    fn season_year_is_optional_and_numeric() {
        let cli = Cli::try_parse_from(["dugout", "season", "season.csv"]).unwrap();
        match cli.command {
            Command::Season { year, .. } => assert_eq!(year, None),
            other => panic!("expected Season, got {other:?}"),
        }

        let cli = Cli::try_parse_from(["dugout", "season", "season.csv", "2025"]).unwrap();
        match cli.command {
            Command::Season { file, year } => {
                assert_eq!(file, PathBuf::from("season.csv"));
                assert_eq!(year, Some(2025));
            }
            other => panic!("expected Season, got {other:?}"),
        }

        assert!(Cli::try_parse_from(["dugout", "season", "season.csv", "twenty"]).is_err());
    }

    #[test]
    fn standings_takes_one_file() {
        let cli = Cli::try_parse_from(["dugout", "standings", "teams.json"]).unwrap();
        assert!(matches!(cli.command, Command::Standings { .. }));
        assert!(Cli::try_parse_from(["dugout", "standings"]).is_err());
        assert!(Cli::try_parse_from(["dugout", "standings", "a.json", "b.json"]).is_err());
    }

    #[test]
    fn help_and_unknown_commands_are_reported_by_clap() {
        let err = Cli::try_parse_from(["dugout", "season", "season.csv", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(Cli::try_parse_from(["dugout", "replay"]).is_err());
        assert!(Cli::try_parse_from(["dugout"]).is_err());
    }
}
