// Runtime configuration read from the environment.
//
// Variables
// - PROJECT_METRICS_DATA_DIR: directory holding the per-kind JSON exports (default ./data).
// - PROJECT_METRICS_PERIOD: today | week | month | all (default week).
// - PROJECT_METRICS_UTC_OFFSET_MINUTES: reference zone offset; the system zone when unset.
// - PROJECT_METRICS_TOP_PROJECTS: how many projects the allocation chart keeps (default 6).

use crate::core::metrics::period::{Period, PeriodParseError};
use chrono::FixedOffset;
use std::path::PathBuf;
use thiserror::Error;

pub const DATA_DIR: &str = "PROJECT_METRICS_DATA_DIR";
pub const PERIOD: &str = "PROJECT_METRICS_PERIOD";
pub const UTC_OFFSET_MINUTES: &str = "PROJECT_METRICS_UTC_OFFSET_MINUTES";
pub const TOP_PROJECTS: &str = "PROJECT_METRICS_TOP_PROJECTS";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error(transparent)]
    Period(#[from] PeriodParseError),

    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub period: Period,
    pub utc_offset: Option<FixedOffset>,
    pub top_projects: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            period: Period::Week,
            utc_offset: None,
            top_projects: 6,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let value = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let data_dir = value(DATA_DIR).map(PathBuf::from).unwrap_or(defaults.data_dir);
        let period = match value(PERIOD) {
            Some(raw) => raw.parse::<Period>()?,
            None => defaults.period,
        };
        let utc_offset = match value(UTC_OFFSET_MINUTES) {
            Some(raw) => Some(
                raw.parse::<i32>()
                    .ok()
                    .and_then(|minutes| minutes.checked_mul(60))
                    .and_then(FixedOffset::east_opt)
                    .ok_or(ConfigError::Invalid {
                        name: UTC_OFFSET_MINUTES,
                        expected: "whole minutes between -1439 and 1439",
                        value: raw,
                    })?,
            ),
            None => defaults.utc_offset,
        };
        let top_projects = match value(TOP_PROJECTS) {
            Some(raw) => raw.parse::<usize>().map_err(|_| ConfigError::Invalid {
                name: TOP_PROJECTS,
                expected: "a non-negative integer",
                value: raw,
            })?,
            None => defaults.top_projects,
        };

        Ok(Self {
            data_dir,
            period,
            utc_offset,
            top_projects,
        })
    }
}
