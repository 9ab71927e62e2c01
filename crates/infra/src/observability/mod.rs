//! Tracing subscriber setup
//!
//! Installs a `tracing-subscriber` fmt subscriber driven by
//! [`LoggingConfig`]. `RUST_LOG`, when set, takes precedence over the
//! configured level.

use tallyline_domain::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` if set and valid, else the configured level,
/// else `info`
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// Returns `false` when a global subscriber was already set, so repeated
/// calls (tests, embedding hosts) are harmless.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = env_filter(config);
    let installed = if config.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).with_current_span(true).try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init()
    };

    match installed {
        Ok(()) => {
            tracing::debug!(level = %config.level, json = config.json, "Tracing initialized");
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_noop() {
        let config = LoggingConfig::default();
        let first = init_tracing(&config);
        let second = init_tracing(&config);
        // another test may have installed a subscriber first
        assert!(!second);
        let _ = first;
    }

    #[test]
    fn test_invalid_level_falls_back() {
        let config = LoggingConfig { level: "[[not a directive".to_string(), json: false };
        let filter = env_filter(&config);
        assert!(!filter.to_string().is_empty());
    }
}
