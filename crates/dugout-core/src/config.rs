// Configuration loading and validation (league.toml).
//
// Linear weights and run-environment constants vary by league year, so they
// are read from configuration rather than compiled in. Every section is
// optional; missing keys fall back to the built-in defaults.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Assembled configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub weights: WeightsConfig,
    pub environment: EnvironmentConfig,
    /// Team display name -> team id.
    pub teams: HashMap<String, String>,
}

/// wOBA linear weights and scale. Field names match the TOML keys
/// (`BB`, `HBP`, `1B`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeightsConfig {
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
    pub scale: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        WeightsConfig {
            bb: 0.69,
            hbp: 0.72,
            single: 0.88,
            double: 1.24,
            triple: 1.56,
            hr: 1.95,
            scale: 1.20,
        }
    }
}

/// League run environment used by wRC and wRC+.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub league_woba: f64,
    pub runs_per_pa: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        EnvironmentConfig {
            league_woba: 0.340,
            runs_per_pa: 0.12,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate a single league.toml file.
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Load configuration relative to `base_dir`.
///
/// Looks for `config/league.toml`, then `defaults/league.toml`. When neither
/// exists the built-in defaults are returned.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let candidates = [
        base_dir.join("config").join("league.toml"),
        base_dir.join("defaults").join("league.toml"),
    ];
    for path in &candidates {
        if path.is_file() {
            debug!("loading config from {}", path.display());
            return load_config_file(path);
        }
    }
    warn!(
        "no league.toml under {}; using built-in weights",
        base_dir.display()
    );
    Ok(Config::default())
}

/// Convenience wrapper: loads config relative to the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let w = &config.weights;
    let weight_fields: &[(&str, f64)] = &[
        ("weights.BB", w.bb),
        ("weights.HBP", w.hbp),
        ("weights.1B", w.single),
        ("weights.2B", w.double),
        ("weights.3B", w.triple),
        ("weights.HR", w.hr),
        ("weights.scale", w.scale),
    ];
    for (name, val) in weight_fields {
        if !val.is_finite() || *val <= 0.0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be > 0, got {val}"),
            });
        }
    }

    let env = &config.environment;
    if !(env.league_woba > 0.0 && env.league_woba < 1.0) {
        return Err(ConfigError::ValidationError {
            field: "environment.league_woba".into(),
            message: format!("must be between 0.0 and 1.0 exclusive, got {}", env.league_woba),
        });
    }
    if !env.runs_per_pa.is_finite() || env.runs_per_pa <= 0.0 {
        return Err(ConfigError::ValidationError {
            field: "environment.runs_per_pa".into(),
            message: format!("must be > 0, got {}", env.runs_per_pa),
        });
    }

    for (name, id) in &config.teams {
        if id.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("teams.{name}"),
                message: "team id must not be empty".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
