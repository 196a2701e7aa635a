//! Logging setup for applications embedding Planner
//!
//! The library only emits `tracing` events. A host that has no subscriber
//! of its own can install one from the `[logging]` config section:
//!
//! ```no_run
//! use libplanner::Config;
//!
//! # fn main() -> libplanner::Result<()> {
//! let config = Config::load_or_default()?;
//! libplanner::logging::init(&config.logging);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Output format of the installed subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// One JSON object per line
    Json,
    /// Pretty-printed with colors (for development)
    Pretty,
}

impl LogFormat {
    fn from_env_value(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" => Some(LogFormat::Text),
            "json" => Some(LogFormat::Json),
            "pretty" => Some(LogFormat::Pretty),
            _ => None,
        }
    }
}

/// `config` with `PLANNER_LOG_FORMAT` / `PLANNER_LOG_LEVEL` applied on top.
///
/// An unknown format in the environment keeps the configured one.
pub fn with_env_overrides(config: &LoggingConfig) -> LoggingConfig {
    let format = std::env::var("PLANNER_LOG_FORMAT")
        .ok()
        .and_then(|value| LogFormat::from_env_value(&value))
        .unwrap_or(config.format);

    let level = std::env::var("PLANNER_LOG_LEVEL")
        .ok()
        .filter(|level| !level.trim().is_empty())
        .unwrap_or_else(|| config.level.clone());

    LoggingConfig { format, level }
}

/// Install the global subscriber, logging to stderr.
///
/// `RUST_LOG` wins over the configured level. Returns false when a
/// subscriber was already installed, which happens when the host
/// application owns logging.
pub fn init(config: &LoggingConfig) -> bool {
    let config = with_env_overrides(config);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .flatten_event(true)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init(),
    };

    installed.is_ok()
}

/// Install a subscriber from the environment alone (text at info level
/// unless overridden)
pub fn init_default() -> bool {
    init(&LoggingConfig::default())
}
