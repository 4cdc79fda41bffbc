// Display formatting for stat values, ranks, dates, and game numbers.
//
// Every formatter is total: missing, negative or non-finite input renders
// as the `-` placeholder instead of failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Placeholder shown for values that cannot be displayed.
pub const PLACEHOLDER: &str = "-";

const LEGACY_GAME_PREFIX: &str = "No.";

fn displayable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// Three-decimal rate with the leading zero dropped: `.375`, `1.000`.
pub fn format_avg(value: Option<f64>) -> String {
    let Some(v) = displayable(value) else {
        return PLACEHOLDER.to_string();
    };
    let fixed = format!("{v:.3}");
    match fixed.strip_prefix('0') {
        Some(rest) => rest.to_string(),
        None => fixed,
    }
}

/// `20.5%` style percentage; `value` is already scaled to 0-100.
pub fn format_percentage(value: Option<f64>, decimals: usize) -> String {
    match displayable(value) {
        Some(v) => format!("{v:.decimals$}%"),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn format_number(value: Option<f64>, decimals: usize) -> String {
    match displayable(value) {
        Some(v) => format!("{v:.decimals$}"),
        None => PLACEHOLDER.to_string(),
    }
}

/// English ordinal: `1st`, `2nd`, `3rd`, `4th`, `11th`, `112th`, `121st`.
pub fn format_rank(rank: Option<u32>) -> String {
    let Some(rank) = rank.filter(|r| *r > 0) else {
        return PLACEHOLDER.to_string();
    };
    let suffix = if (11..=13).contains(&(rank % 100)) {
        "th"
    } else {
        match rank % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{rank}{suffix}")
}

// ---------------------------------------------------------------------------
// Dates, years, names
// ---------------------------------------------------------------------------

fn parse_date(raw: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
    const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Normalize a date string to `YYYY-MM-DD`.
pub fn format_date(date: Option<&str>) -> String {
    date.map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(parse_date)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn format_season_year(year: Option<u32>) -> String {
    match year.filter(|y| *y > 0) {
        Some(y) => y.to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn format_player_name(name: Option<&str>) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(n) => n.to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Per-stat formatting
// ---------------------------------------------------------------------------

/// Which display rule a stat uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Avg,
    Obp,
    Slg,
    Babip,
    Woba,
    Iso,
    Ops,
    KPct,
    BbPct,
    OpsPlus,
    WrcPlus,
    Wrc,
    /// Counting stats (HR, RBI, hits, ...) and anything unrecognized.
    Count,
}

impl StatKind {
    /// Map a stat key as used by the presentation layer (`avg`, `kPct`,
    /// `wRCPlus`, ...). Unknown keys format as counts.
    pub fn from_key(key: &str) -> Self {
        match key {
            "avg" => StatKind::Avg,
            "obp" => StatKind::Obp,
            "slg" => StatKind::Slg,
            "babip" => StatKind::Babip,
            "wOBA" => StatKind::Woba,
            "iso" => StatKind::Iso,
            "ops" => StatKind::Ops,
            "kPct" => StatKind::KPct,
            "bbPct" => StatKind::BbPct,
            "opsPlus" => StatKind::OpsPlus,
            "wRCPlus" => StatKind::WrcPlus,
            "wRC" => StatKind::Wrc,
            _ => StatKind::Count,
        }
    }
}

pub fn format_stat_value(kind: StatKind, value: Option<f64>) -> String {
    match kind {
        StatKind::Avg
        | StatKind::Obp
        | StatKind::Slg
        | StatKind::Babip
        | StatKind::Woba
        | StatKind::Iso => format_avg(value),
        // OPS routinely exceeds 1, so it keeps its leading digit.
        StatKind::Ops => format_number(value, 3),
        StatKind::KPct | StatKind::BbPct => format_percentage(value, 1),
        StatKind::OpsPlus | StatKind::WrcPlus => format_number(value, 0),
        StatKind::Wrc => format_number(value, 1),
        StatKind::Count => format_number(value, 0),
    }
}

// ---------------------------------------------------------------------------
// Game numbers
// ---------------------------------------------------------------------------

/// A decoded game identifier: season year plus sequential game number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameNumber {
    pub season: u32,
    pub number: u64,
}

/// Encode `season` and `number` as `"{season:04}{number}"`, e.g. `2025201`.
/// Returns an empty string when either part is out of range.
pub fn format_game_number(season: i64, number: i64) -> String {
    if !(1..=9999).contains(&season) || number < 1 {
        return String::new();
    }
    format!("{season:04}{number}")
}

/// Decode a game identifier. The first four digits are the season and the
/// rest the game number. Anything else, including the legacy `No.NNN`
/// display form, yields `None`.
pub fn parse_game_number(raw: &str) -> Option<GameNumber> {
    if raw.len() < 5 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (season, number) = raw.split_at(4);
    let season: u32 = season.parse().ok()?;
    let number: u64 = number.parse().ok()?;
    if season == 0 || number == 0 {
        return None;
    }
    Some(GameNumber { season, number })
}

/// Short display form, `No.201`. Legacy identifiers already in that form
/// pass through; unparseable input renders as the placeholder.
pub fn display_game_number(raw: &str) -> String {
    if let Some(game) = parse_game_number(raw) {
        return format!("{LEGACY_GAME_PREFIX}{}", game.number);
    }
    if raw.starts_with(LEGACY_GAME_PREFIX) {
        return raw.to_string();
    }
    PLACEHOLDER.to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
