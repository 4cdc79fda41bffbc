// Baseball league statistics: season and scoresheet parsing, sabermetric
// formulas, standings, and display formatting.

pub mod boxscore;
pub mod format;
pub mod league;
pub mod sabermetrics;
pub mod season;
pub mod standings;
pub mod stats;
