use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::ReportError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/project/";
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Bangkok;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for reaching the backend and windowing its history.
///
/// Stored as a JSON object on disk, every key optional:
/// ```json
/// {
///   "base_url": "http://127.0.0.1:8000/project/",
///   "timezone": "Asia/Bangkok",
///   "timeout_secs": 30,
///   "headers": { "ngrok-skip-browser-warning": "69420" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub base_url: String,
    /// Reference timezone for every day and hour boundary.
    pub timezone: Tz,
    pub timeout_secs: u64,
    /// Extra headers sent with every backend request.
    pub headers: BTreeMap<String, String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timezone: DEFAULT_TIMEZONE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            headers: BTreeMap::new(),
        }
    }
}

impl ReportConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{path}'"))?;
        Self::from_json(&content).with_context(|| format!("Invalid config file '{path}'"))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Builds the config from `REPORT_BASE_URL`, `REPORT_TIMEZONE` and
    /// `REPORT_TIMEOUT_SECS`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("REPORT_BASE_URL") {
            config.base_url = url;
        }
        if let Some(name) = lookup("REPORT_TIMEZONE") {
            config.timezone = parse_timezone(&name)?;
        }
        if let Some(secs) = lookup("REPORT_TIMEOUT_SECS") {
            config.timeout_secs = secs
                .parse()
                .with_context(|| format!("REPORT_TIMEOUT_SECS is not a number: '{secs}'"))?;
        }

        Ok(config)
    }

    /// URL of the report endpoint under `base_url`.
    pub fn report_url(&self) -> String {
        format!("{}/report/", self.base_url.trim_end_matches('/'))
    }
}

/// Parses an IANA timezone name such as `Asia/Bangkok`.
pub fn parse_timezone(name: &str) -> Result<Tz, ReportError> {
    name.parse::<Tz>()
        .map_err(|e| ReportError::invalid(format!("unknown timezone '{name}': {e}")))
}
