// ABOUTME: Configuration module for the slideshot application
// ABOUTME: Provides configuration settings and environment variable handling

use crate::collate::SlideOrder;
use crate::errors::{Result, SlideError};
use crate::locator::{default_search_paths, LocatorConfig};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Global configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub engine_path: Option<PathBuf>,
    pub search_paths: Option<Vec<PathBuf>>,
    /// `None` lets the engine run for as long as it needs
    pub timeout: Option<Duration>,
    pub order: SlideOrder,
    pub unique_temp_dir: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine_path: None,
            search_paths: default_search_paths(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            order: SlideOrder::Lexicographic,
            unique_temp_dir: false,
        }
    }
}

/// Per-job settings the converter applies to every call
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub timeout: Option<Duration>,
    pub order: SlideOrder,
    pub unique_temp_dir: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Config::default().convert_options()
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.engine_path = lookup("SLIDESHOT_ENGINE")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        if let Some(raw) = lookup("SLIDESHOT_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                SlideError::ConfigError(format!(
                    "SLIDESHOT_TIMEOUT_SECS is not a number: {:?}",
                    raw
                ))
            })?;
            config.timeout = timeout_from_secs(secs);
        }

        if let Some(raw) = lookup("SLIDESHOT_ORDER") {
            config.order = raw.trim().parse()?;
        }

        if let Some(raw) = lookup("SLIDESHOT_UNIQUE_TEMP") {
            config.unique_temp_dir = parse_flag("SLIDESHOT_UNIQUE_TEMP", &raw)?;
        }

        Ok(config)
    }

    /// Get a locator configuration from this config
    pub fn locator_config(&self) -> LocatorConfig {
        LocatorConfig {
            override_path: self.engine_path.clone(),
            search_paths: self.search_paths.clone(),
        }
    }

    /// Get the per-job options from this config
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            timeout: self.timeout,
            order: self.order,
            unique_temp_dir: self.unique_temp_dir,
        }
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(SlideError::ConfigError(format!(
            "{} must be true, false, 1 or 0, got {:?}",
            name, raw
        ))),
    }
}

/// Zero seconds disables the deadline.
pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    if secs == 0 {
        None
    } else {
        Some(Duration::from_secs(secs))
    }
}
