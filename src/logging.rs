//! Logging setup for the CLI.
//!
//! Everything goes to stderr; stdout is reserved for the generated document.

use rest_openapi::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Single line per event.
    Compact,
    /// Full format with source locations.
    Full,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Create logging config from verbosity level
    pub fn from_verbosity(verbosity: u8) -> Self {
        let (level, format) = match verbosity {
            0 => ("warn", LogFormat::Compact),
            1 => ("info", LogFormat::Compact),
            2 => ("debug", LogFormat::Compact),
            _ => ("trace", LogFormat::Full),
        };
        Self {
            level: level.to_string(),
            format,
        }
    }
}

/// Installs the global subscriber.
pub fn init_logging(config: &LoggingConfig) -> AppResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let result = match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Full => builder
            .with_file(true)
            .with_line_number(true)
            .try_init(),
    };
    result.map_err(|e| AppError::General(format!("Failed to initialize logging: {}", e)))
}
