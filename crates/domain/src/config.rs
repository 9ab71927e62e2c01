//! Configuration management

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_WINDOW_DAYS, DEFAULT_MIN_GAP_MINUTES, DEFAULT_TIMEZONE};
use crate::{PeriodGrouping, Result, TallylineError};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Report and timeline query configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Largest query window accepted, in days
    pub max_window_days: u32,
    /// Grouping used when a request does not name one
    pub default_grouping: PeriodGrouping,
    /// IANA timezone whose calendar defines period boundaries
    pub timezone: String,
    /// Untracked stretches shorter than this are not reported as gaps
    pub min_gap_minutes: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_window_days: DEFAULT_MAX_WINDOW_DAYS,
            default_grouping: PeriodGrouping::Day,
            timezone: DEFAULT_TIMEZONE.to_string(),
            min_gap_minutes: DEFAULT_MIN_GAP_MINUTES,
        }
    }
}

impl ReportConfig {
    /// Resolve the configured timezone name.
    ///
    /// # Errors
    /// Returns `TallylineError::Config` for names outside the IANA database.
    pub fn parsed_timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| TallylineError::Config(format!("Invalid timezone '{}': {}", self.timezone, e)))
    }

    /// Minimum reported gap as a chrono duration
    pub fn min_gap(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.min_gap_minutes))
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.report.max_window_days, 400);
        assert_eq!(config.report.default_grouping, PeriodGrouping::Day);
        assert_eq!(config.report.parsed_timezone().unwrap(), Tz::UTC);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_invalid_timezone_is_config_error() {
        let config = ReportConfig { timezone: "Mars/Olympus".to_string(), ..Default::default() };
        assert!(matches!(config.parsed_timezone(), Err(TallylineError::Config(_))));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"report": {"timezone": "Europe/Berlin"}}"#).unwrap();
        assert_eq!(config.report.timezone, "Europe/Berlin");
        assert_eq!(config.report.max_window_days, 400);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_min_gap_in_minutes() {
        let config = ReportConfig { min_gap_minutes: 15, ..Default::default() };
        assert_eq!(config.min_gap(), chrono::Duration::minutes(15));
    }
}
