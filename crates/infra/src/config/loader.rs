//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Loads a `.env` file into the environment if one exists
//! 2. Attempts to load from environment variables
//! 3. If required variables are missing, falls back to loading from file
//! 4. Probes multiple paths for config files
//! 5. Supports JSON and TOML formats
//! 6. With no file anywhere, uses the defaults
//!
//! ## Environment Variables
//! - `TALLYLINE_TIMEZONE`: IANA timezone for period boundaries (required)
//! - `TALLYLINE_MAX_WINDOW_DAYS`: Largest query window in days (required)
//! - `TALLYLINE_DEFAULT_GROUPING`: `day`, `week`, `month` or `custom`
//! - `TALLYLINE_MIN_GAP_MINUTES`: Shortest reported gap in minutes
//! - `TALLYLINE_LOG_LEVEL`: Default tracing filter directive
//! - `TALLYLINE_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./tallyline.json` or `./tallyline.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use tallyline_domain::constants::{DEFAULT_MIN_GAP_MINUTES, DEFAULT_MAX_WINDOW_DAYS};
use tallyline_domain::{Config, LoggingConfig, PeriodGrouping, ReportConfig, Result, TallylineError};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to a config file, and to the defaults
/// when no file exists.
///
/// # Errors
/// Returns `TallylineError::Config` if:
/// - A config file exists but cannot be read or parsed
/// - The loaded configuration fails [`validate_config`]
pub fn load() -> Result<Config> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) => tracing::debug!(error = %e, "No .env file loaded"),
    }

    // Try loading from environment first
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            match probe_config_paths() {
                Some(path) => load_from_file(Some(path)),
                None => {
                    tracing::info!("No config file found; using defaults");
                    Ok(Config::default())
                }
            }
        }
    }
}

/// Load configuration from environment variables
///
/// `TALLYLINE_TIMEZONE` and `TALLYLINE_MAX_WINDOW_DAYS` must be present;
/// the rest fall back to their defaults.
///
/// # Errors
/// Returns `TallylineError::Config` if required variables are missing
/// or any variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let timezone = env_var("TALLYLINE_TIMEZONE")?;
    let max_window_days = env_var("TALLYLINE_MAX_WINDOW_DAYS").and_then(|s| {
        s.parse::<u32>().map_err(|e| TallylineError::Config(format!("Invalid max window days: {}", e)))
    })?;

    let default_grouping = match std::env::var("TALLYLINE_DEFAULT_GROUPING") {
        Ok(s) => s
            .parse::<PeriodGrouping>()
            .map_err(|e| TallylineError::Config(format!("Invalid default grouping: {}", e)))?,
        Err(_) => PeriodGrouping::default(),
    };
    let min_gap_minutes = match std::env::var("TALLYLINE_MIN_GAP_MINUTES") {
        Ok(s) => s
            .parse::<u32>()
            .map_err(|e| TallylineError::Config(format!("Invalid min gap minutes: {}", e)))?,
        Err(_) => DEFAULT_MIN_GAP_MINUTES,
    };

    let logging_defaults = LoggingConfig::default();
    let level = std::env::var("TALLYLINE_LOG_LEVEL").unwrap_or(logging_defaults.level);
    let json = env_bool("TALLYLINE_LOG_JSON", logging_defaults.json);

    let config = Config {
        report: ReportConfig { max_window_days, default_grouping, timezone, min_gap_minutes },
        logging: LoggingConfig { level, json },
    };
    validate_config(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
/// Missing sections and fields take their defaults.
///
/// # Errors
/// Returns `TallylineError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The parsed configuration fails [`validate_config`]
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(TallylineError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            TallylineError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| TallylineError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Check values serde cannot check on its own
///
/// # Errors
/// Returns `TallylineError::Config` for an unknown timezone or a zero-day
/// query window.
pub fn validate_config(config: &Config) -> Result<()> {
    config.report.parsed_timezone()?;
    if config.report.max_window_days == 0 {
        return Err(TallylineError::Config(format!(
            "max_window_days must be at least 1 (default {})",
            DEFAULT_MAX_WINDOW_DAYS
        )));
    }
    Ok(())
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `TallylineError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => {
            toml::from_str(contents).map_err(|e| TallylineError::Config(format!("Invalid TOML format: {}", e)))
        }
        "json" => {
            serde_json::from_str(contents).map_err(|e| TallylineError::Config(format!("Invalid JSON format: {}", e)))
        }
        _ => Err(TallylineError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./tallyline.{json,toml}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidate_files(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidate_files(exe_dir));
        }
    }

    // Return first existing candidate
    candidates.into_iter().find(|path| path.exists())
}

fn candidate_files(base: &Path) -> Vec<PathBuf> {
    vec![
        base.join("config.json"),
        base.join("config.toml"),
        base.join("tallyline.json"),
        base.join("tallyline.toml"),
        base.join("../config.json"),
        base.join("../config.toml"),
        base.join("../../config.json"),
        base.join("../../config.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `TallylineError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| TallylineError::Config(format!("Missing required environment variable: {}", key)))
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use once_cell::sync::Lazy;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: [&str; 6] = [
        "TALLYLINE_TIMEZONE",
        "TALLYLINE_MAX_WINDOW_DAYS",
        "TALLYLINE_DEFAULT_GROUPING",
        "TALLYLINE_MIN_GAP_MINUTES",
        "TALLYLINE_LOG_LEVEL",
        "TALLYLINE_LOG_JSON",
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("TALLYLINE_TEST_BOOL_YES", "YES");
        std::env::set_var("TALLYLINE_TEST_BOOL_OFF", "off");
        assert!(env_bool("TALLYLINE_TEST_BOOL_YES", false));
        assert!(!env_bool("TALLYLINE_TEST_BOOL_OFF", true));

        std::env::remove_var("TALLYLINE_TEST_BOOL_MISSING");
        assert!(env_bool("TALLYLINE_TEST_BOOL_MISSING", true));

        std::env::remove_var("TALLYLINE_TEST_BOOL_YES");
        std::env::remove_var("TALLYLINE_TEST_BOOL_OFF");
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("TALLYLINE_TIMEZONE", "Europe/Berlin");
        std::env::set_var("TALLYLINE_MAX_WINDOW_DAYS", "90");
        std::env::set_var("TALLYLINE_DEFAULT_GROUPING", "Week");
        std::env::set_var("TALLYLINE_MIN_GAP_MINUTES", "5");
        std::env::set_var("TALLYLINE_LOG_LEVEL", "debug");
        std::env::set_var("TALLYLINE_LOG_JSON", "true");

        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.report.timezone, "Europe/Berlin");
        assert_eq!(config.report.max_window_days, 90);
        assert_eq!(config.report.default_grouping, PeriodGrouping::Week);
        assert_eq!(config.report.min_gap_minutes, 5);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_load_from_env_optional_vars_default() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("TALLYLINE_TIMEZONE", "UTC");
        std::env::set_var("TALLYLINE_MAX_WINDOW_DAYS", "30");

        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.report.default_grouping, PeriodGrouping::Day);
        assert_eq!(config.report.min_gap_minutes, DEFAULT_MIN_GAP_MINUTES);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_load_from_env_missing_var() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, TallylineError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_load_from_env_invalid_values() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("TALLYLINE_TIMEZONE", "UTC");
        std::env::set_var("TALLYLINE_MAX_WINDOW_DAYS", "not-a-number");
        assert!(matches!(load_from_env(), Err(TallylineError::Config(_))));

        std::env::set_var("TALLYLINE_MAX_WINDOW_DAYS", "30");
        std::env::set_var("TALLYLINE_DEFAULT_GROUPING", "fortnight");
        assert!(matches!(load_from_env(), Err(TallylineError::Config(_))));

        std::env::remove_var("TALLYLINE_DEFAULT_GROUPING");
        std::env::set_var("TALLYLINE_TIMEZONE", "Atlantis/Capital");
        assert!(matches!(load_from_env(), Err(TallylineError::Config(_))));

        clear_env();
    }

    #[test]
    fn test_parse_config_json() {
        let content = r#"{"report": {"max_window_days": 31, "default_grouping": "month"}}"#;
        let config = parse_config(content, &PathBuf::from("test.json")).unwrap();
        assert_eq!(config.report.max_window_days, 31);
        assert_eq!(config.report.default_grouping, PeriodGrouping::Month);
        assert_eq!(config.report.timezone, "UTC");
    }

    #[test]
    fn test_parse_config_toml() {
        let content = r#"
[report]
timezone = "America/Chicago"
min_gap_minutes = 10

[logging]
json = true
"#;
        let config = parse_config(content, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(config.report.timezone, "America/Chicago");
        assert_eq!(config.report.min_gap_minutes, 10);
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", &PathBuf::from("test.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }

    #[test]
    fn test_validate_config_rejects_zero_window() {
        let mut config = Config::default();
        config.report.max_window_days = 0;
        assert!(matches!(validate_config(&config), Err(TallylineError::Config(_))));
    }
}
