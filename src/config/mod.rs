//! Configuration management.
//!
//! [`RecorderConfig`] is passed explicitly to the store and services. It is
//! built from defaults, an optional TOML file and environment overrides:
//!
//! ```toml
//! store_path = "/var/lib/datarec/main.json"
//! capacity = 250
//!
//! [logging]
//! format = "json"
//! file = "/var/log/datarec.log"
//! level = "info"
//! ```

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "DATAREC_CONFIG_PATH";
/// Environment variable overriding the store path.
pub const STORE_PATH_ENV: &str = "DATAREC_STORE_PATH";
/// Environment variable overriding the capacity.
pub const CAPACITY_ENV: &str = "DATAREC_CAPACITY";

/// Default soft cap on stored records.
pub const DEFAULT_CAPACITY: usize = 100;

/// Main configuration for datarec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecorderConfig {
    /// Path to the backing JSON store.
    pub store_path: PathBuf,
    /// Maximum number of records manual entry may bring the store to.
    pub capacity: usize,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format string, falling back to pretty.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Logging section of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Output format.
    pub format: LogFormat,
    /// Log file; stderr when unset.
    pub file: Option<PathBuf>,
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: Option<String>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Store path.
    pub store_path: Option<String>,
    /// Capacity.
    pub capacity: Option<usize>,
    /// Logging section.
    pub logging: Option<ConfigFileLogging>,
}

/// Logging section in config file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileLogging {
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// Log file path.
    pub file: Option<String>,
    /// Filter directive, e.g. `info` or `datarec=debug`.
    pub level: Option<String>,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("main.json"),
            capacity: DEFAULT_CAPACITY,
            logging: LoggingSettings::default(),
        }
    }
}

impl RecorderConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        Self::parse_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid config file.
    pub fn parse_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks `DATAREC_CONFIG_PATH`, then `datarec/config.toml` in the
    /// platform config dir. Returns defaults if neither exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    pub fn load_default() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Self::load_from_file(Path::new(&path));
        }

        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Ok(Self::default());
        };
        let platform_config = base_dirs.config_dir().join("datarec").join("config.toml");
        if platform_config.exists() {
            return Self::load_from_file(&platform_config);
        }

        Ok(Self::default())
    }

    /// Loads configuration from an explicit file or the default location,
    /// then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be read or parsed, or an
    /// environment override is not valid.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load_default()?,
        };
        config.with_env_overrides()
    }

    /// Applies `DATAREC_STORE_PATH` and `DATAREC_CAPACITY`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the capacity is not a number.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(
            std::env::var(STORE_PATH_ENV).ok().as_deref(),
            std::env::var(CAPACITY_ENV).ok().as_deref(),
        )
    }

    fn with_overrides(mut self, store_path: Option<&str>, capacity: Option<&str>) -> Result<Self> {
        if let Some(path) = store_path.filter(|p| !p.trim().is_empty()) {
            self.store_path = PathBuf::from(path);
        }
        if let Some(raw) = capacity {
            self.capacity = raw.trim().parse().map_err(|_| {
                Error::InvalidInput(format!("{CAPACITY_ENV} must be a number, got {raw:?}"))
            })?;
        }
        Ok(self)
    }

    /// Converts a `ConfigFile` to `RecorderConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(store_path) = file.store_path {
            config.store_path = PathBuf::from(store_path);
        }
        if let Some(capacity) = file.capacity {
            config.capacity = capacity;
        }
        if let Some(logging) = file.logging {
            if let Some(format) = logging.format {
                config.logging.format = LogFormat::parse(&format);
            }
            config.logging.file = logging.file.map(PathBuf::from);
            config.logging.level = logging.level;
        }

        config
    }

    /// Sets the store path.
    #[must_use]
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    /// Sets the capacity.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}
