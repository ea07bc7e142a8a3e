//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Input and output file locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Output formatting and console behavior
    #[serde(default)]
    pub output: OutputConfig,

    /// Log filter settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let files = [
            ("paths.new_file", &self.paths.new_file),
            ("paths.old_file", &self.paths.old_file),
            ("paths.diff_file", &self.paths.diff_file),
            ("paths.anomalies_file", &self.paths.anomalies_file),
            ("paths.ready_file", &self.paths.ready_file),
        ];
        for (name, value) in files {
            if value.trim().is_empty() {
                return Err(AppError::validation(format!("{name} is empty")));
            }
        }

        let targets = self.paths.output_targets();
        if targets.diff == targets.anomalies
            || targets.diff == targets.ready
            || targets.anomalies == targets.ready
        {
            return Err(AppError::validation(
                "paths.diff_file, paths.anomalies_file and paths.ready_file must be distinct",
            ));
        }

        if !matches!(
            self.logging.level.to_lowercase().as_str(),
            "error" | "warn" | "info" | "debug" | "trace"
        ) {
            return Err(AppError::validation(format!(
                "logging.level '{}' is not a valid level",
                self.logging.level
            )));
        }
        Ok(())
    }
}

/// Snapshot and report file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Newer catalog snapshot
    #[serde(default = "defaults::new_file")]
    pub new_file: String,

    /// Older catalog snapshot
    #[serde(default = "defaults::old_file")]
    pub old_file: String,

    /// Bucketed differences report
    #[serde(default = "defaults::diff_file")]
    pub diff_file: String,

    /// Items flagged for review, written next to the diff file
    #[serde(default = "defaults::anomalies_file")]
    pub anomalies_file: String,

    /// Ready-to-upsert list, written next to the diff file
    #[serde(default = "defaults::ready_file")]
    pub ready_file: String,
}

impl PathsConfig {
    /// Resolve the three report paths.
    ///
    /// Derived artifacts land in the same directory as the diff file.
    pub fn output_targets(&self) -> OutputTargets {
        let diff = PathBuf::from(&self.diff_file);
        let dir = diff.parent().map(Path::to_path_buf).unwrap_or_default();
        OutputTargets {
            anomalies: dir.join(&self.anomalies_file),
            ready: dir.join(&self.ready_file),
            diff,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            new_file: defaults::new_file(),
            old_file: defaults::old_file(),
            diff_file: defaults::diff_file(),
            anomalies_file: defaults::anomalies_file(),
            ready_file: defaults::ready_file(),
        }
    }
}

/// Resolved report destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTargets {
    pub diff: PathBuf,
    pub anomalies: PathBuf,
    pub ready: PathBuf,
}

/// Output behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print the run summary to the console
    #[serde(default = "defaults::enabled")]
    pub console_enabled: bool,

    /// Pretty-print JSON reports
    #[serde(default = "defaults::enabled")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            console_enabled: true,
            pretty: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    pub fn new_file() -> String {
        "nuevo.json".into()
    }
    pub fn old_file() -> String {
        "viejo.json".into()
    }
    pub fn diff_file() -> String {
        "diferencias.json".into()
    }
    pub fn anomalies_file() -> String {
        "anomalies.json".into()
    }
    pub fn ready_file() -> String {
        "ready_to_upsert.json".into()
    }
    pub fn enabled() -> bool {
        true
    }
    pub fn log_level() -> String {
        "info".into()
    }
}
