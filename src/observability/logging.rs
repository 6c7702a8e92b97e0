//! Structured logging configuration.

use crate::config::LoggingSettings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub use crate::config::LogFormat;

/// Default directive when neither `RUST_LOG` nor a configured level is set.
const DEFAULT_LEVEL: &str = "error";
/// Directive used for `--verbose`.
const VERBOSE_LEVEL: &str = "debug";

/// Resolved logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Log file; stderr when unset.
    pub file: Option<PathBuf>,
    /// Event filter.
    pub filter: EnvFilter,
}

impl LoggingConfig {
    /// Builds the logging configuration.
    ///
    /// `RUST_LOG` takes precedence. Otherwise `verbose` selects `debug`, then
    /// the configured level, then `error`.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Self {
        let directive = default_directive(settings, verbose);
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(directive));

        Self {
            format: settings.map(|s| s.format).unwrap_or_default(),
            file: settings.and_then(|s| s.file.clone()),
            filter,
        }
    }
}

fn default_directive(settings: Option<&LoggingSettings>, verbose: bool) -> &str {
    if verbose {
        return VERBOSE_LEVEL;
    }
    settings
        .and_then(|s| s.level.as_deref())
        .filter(|level| !level.trim().is_empty())
        .unwrap_or(DEFAULT_LEVEL)
}
