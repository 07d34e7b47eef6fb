//! Runtime configuration loaded from the environment
//!
//! Every value has a default so the dashboard runs with an empty environment.
//! A `.env` file is honoured when the binaries call `dotenvy::dotenv()`.

use chrono::NaiveDate;
use std::env;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_SYMBOL: &str = "AAPL";
pub const DEFAULT_FAST_WINDOW: usize = 100;
pub const DEFAULT_SLOW_WINDOW: usize = 200;
pub const DEFAULT_TABLE_ROWS: usize = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Deployment environment name (`production`, `sandbox`, ...)
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// Parameters of a single analysis run that do not come from the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSettings {
    pub fast_window: usize,
    pub slow_window: usize,
    pub table_rows: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            fast_window: DEFAULT_FAST_WINDOW,
            slow_window: DEFAULT_SLOW_WINDOW,
            table_rows: DEFAULT_TABLE_ROWS,
        }
    }
}

/// Defaults for the three input fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDefaults {
    pub symbol: String,
    pub start_date: NaiveDate,
}

impl Default for InputDefaults {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            start_date: default_start_date(),
        }
    }
}

pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 1).unwrap_or(NaiveDate::MIN)
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub yahoo_base_url: String,
    pub inputs: InputDefaults,
    pub analysis: AnalysisSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            inputs: InputDefaults::default(),
            analysis: AnalysisSettings::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let start_date = match lookup("DEFAULT_START_DATE") {
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
                ConfigError::InvalidValue {
                    key: "DEFAULT_START_DATE",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => defaults.inputs.start_date,
        };

        let symbol = lookup("DEFAULT_SYMBOL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.inputs.symbol);

        let analysis = AnalysisSettings {
            fast_window: parse_var(&lookup, "SMA_FAST_WINDOW", defaults.analysis.fast_window)?,
            slow_window: parse_var(&lookup, "SMA_SLOW_WINDOW", defaults.analysis.slow_window)?,
            table_rows: parse_var(&lookup, "TABLE_ROWS", defaults.analysis.table_rows)?,
        };

        for (key, value) in [
            ("SMA_FAST_WINDOW", analysis.fast_window),
            ("SMA_SLOW_WINDOW", analysis.slow_window),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key,
                    value: value.to_string(),
                    reason: "window must be at least 1".to_string(),
                });
            }
        }

        Ok(Self {
            port: parse_var(&lookup, "PORT", defaults.port)?,
            yahoo_base_url: lookup("YAHOO_BASE_URL").unwrap_or(defaults.yahoo_base_url),
            inputs: InputDefaults { symbol, start_date },
            analysis,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            value: raw,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
