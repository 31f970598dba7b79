//! Logging setup
//!
//! Installs a global `tracing` subscriber driven by [`LoggingConfig`].

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Output format of the fmt layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Some(LogFormat::Compact),
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// `RUST_LOG` when set, otherwise the configured level.
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Initialize the global subscriber.
///
/// An unknown format falls back to compact output. Calling this twice keeps the first
/// subscriber.
pub fn init(config: &LoggingConfig) {
    let format = LogFormat::parse(&config.format).unwrap_or(LogFormat::Compact);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(false);

    let result = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if result.is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
