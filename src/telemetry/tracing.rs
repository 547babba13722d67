use std::io::IsTerminal;
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::schema::LoggingConfig;

#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub level: Level,
    pub json_format: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json_format: false,
        }
    }
}

impl TracingConfig {
    /// Builds the tracing setup from the `[logging]` section. `debug` forces
    /// debug level regardless of the configured one.
    pub fn from_logging(config: &LoggingConfig, debug: bool) -> Result<Self, TracingError> {
        let level = if debug {
            Level::DEBUG
        } else {
            Level::from_str(&config.level).map_err(|_| TracingError::InvalidLevel {
                level: config.level.clone(),
            })?
        };
        Ok(Self {
            level,
            json_format: config.json,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Invalid log level '{level}'")]
    InvalidLevel { level: String },
}

/// Keeps the subscriber installed for the current thread until dropped.
#[derive(Debug)]
pub struct TracingGuard {
    _default_guard: tracing::subscriber::DefaultGuard,
}

/// Installs a stderr subscriber. Logs go to the real standard error, never
/// through the capturable destinations.
pub fn init_tracing(config: &TracingConfig) -> TracingGuard {
    let env_filter = resolve_env_filter(config);
    let ansi = std::io::stderr().is_terminal();

    let default_guard = if config.json_format {
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_timer(tracing_subscriber::fmt::time::SystemTime);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer)
            .set_default()
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(ansi)
            .with_target(true)
            .with_level(true)
            .with_timer(tracing_subscriber::fmt::time::SystemTime);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer)
            .set_default()
    };

    TracingGuard {
        _default_guard: default_guard,
    }
}

fn resolve_env_filter(config: &TracingConfig) -> EnvFilter {
    if config.level == Level::DEBUG {
        EnvFilter::new(Level::DEBUG.as_str())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ENV_LOCK;
    use std::env;

    fn set_env_var(key: &str, value: impl AsRef<std::ffi::OsStr>) {
        unsafe {
            env::set_var(key, value);
        }
    }

    fn remove_env_var(key: &str) {
        unsafe {
            env::remove_var(key);
        }
    }

    #[test]
    fn default_config_is_info_pretty() {
        let config = TracingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.json_format);
    }

    #[test]
    fn from_logging_parses_level() {
        let logging = LoggingConfig {
            level: "warn".to_string(),
            json: true,
        };
        let config = TracingConfig::from_logging(&logging, false).unwrap();
        assert_eq!(config.level, Level::WARN);
        assert!(config.json_format);
    }

    #[test]
    fn debug_flag_wins_over_logging_level() {
        let logging = LoggingConfig {
            level: "not-a-level".to_string(),
            json: false,
        };
        let config = TracingConfig::from_logging(&logging, true).unwrap();
        assert_eq!(config.level, Level::DEBUG);
    }

    #[test]
    fn rejects_unknown_level() {
        let logging = LoggingConfig {
            level: "loud".to_string(),
            json: false,
        };
        let err = TracingConfig::from_logging(&logging, false).unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn env_filter_uses_rust_log_when_set() {
        let _lock = ENV_LOCK.lock().unwrap();
        set_env_var("RUST_LOG", "warn");
        let config = TracingConfig::default();
        let filter = resolve_env_filter(&config);
        assert!(filter.to_string().contains("warn"));
        remove_env_var("RUST_LOG");
    }

    #[test]
    fn debug_level_overrides_rust_log() {
        let _lock = ENV_LOCK.lock().unwrap();
        set_env_var("RUST_LOG", "error");
        let config = TracingConfig {
            level: Level::DEBUG,
            ..TracingConfig::default()
        };
        let filter = resolve_env_filter(&config);
        assert!(filter.to_string().contains("debug"));
        remove_env_var("RUST_LOG");
    }
}
