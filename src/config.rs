//! Configuration types for the date sorter

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// What to do when a single file hits an I/O error that would otherwise
/// abort the run (opening it for metadata, creating its destination folder)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop the whole run at the first such error
    #[default]
    FailFast,
    /// Record the file as failed and carry on with the next one
    Continue,
}

/// Names of the folders created under the input directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Images whose metadata decoded but carried no capture date
    pub unknown_dates_dir: String,
    /// Images whose metadata could not be decoded
    pub error_files_dir: String,
    /// Every non-image file
    pub others_dir: String,
    /// Zero-pad month and day folders (`2020/01/05` instead of `2020/1/5`)
    pub pad_month_day: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            unknown_dates_dir: "unknown_dates".into(),
            error_files_dir: "error_files".into(),
            others_dir: "others".into(),
            pad_month_day: false,
        }
    }
}

/// Configuration for the date sorter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory to reorganize in place, always taken from the command line
    #[serde(skip)]
    pub input_dir: PathBuf,

    /// Destination folder naming
    pub layout: LayoutConfig,

    /// Behaviour on per-file I/O failures
    pub failure_policy: FailurePolicy,

    /// Render a progress bar on the console
    pub show_progress: bool,

    /// Verbose output
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::new(),
            layout: LayoutConfig::default(),
            failure_policy: FailurePolicy::default(),
            show_progress: true,
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Check that the fallback folder names are usable as single path segments
    /// and cannot be confused with each other or with a year folder
    pub fn validate(&self) -> Result<(), ConfigError> {
        let names = [
            ("unknown_dates_dir", &self.layout.unknown_dates_dir),
            ("error_files_dir", &self.layout.error_files_dir),
            ("others_dir", &self.layout.others_dir),
        ];

        for (key, name) in names {
            if name.is_empty() || name == "." || name == ".." {
                return Err(ConfigError::Invalid(format!("{key} must be a folder name")));
            }
            if name.contains(['/', '\\']) {
                return Err(ConfigError::Invalid(format!(
                    "{key} must be a single folder name, got '{name}'"
                )));
            }
            if name.chars().all(|c| c.is_ascii_digit()) {
                return Err(ConfigError::Invalid(format!(
                    "{key} '{name}' would collide with a year folder"
                )));
            }
        }

        for (i, (key_a, a)) in names.iter().enumerate() {
            for (key_b, b) in &names[i + 1..] {
                if a == b {
                    return Err(ConfigError::Invalid(format!(
                        "{key_a} and {key_b} both use '{a}'"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Generate a sample configuration file content
    pub fn sample_config() -> String {
        r#"# Date Sorter Configuration File
# This file uses TOML format (https://toml.io)

# What to do when a file cannot be opened or its folder cannot be created:
# - fail-fast: stop the whole run (default)
# - continue: record the file as failed and keep going
failure_policy = "fail-fast"

# Render a progress bar while files are moved
show_progress = true

# Verbose output
verbose = false

[layout]
# Images whose EXIF block has no capture date
unknown_dates_dir = "unknown_dates"
# Images whose EXIF block could not be decoded
error_files_dir = "error_files"
# Everything that is not a .jpg image
others_dir = "others"
# Zero-pad month and day folders: 2020/01/05 instead of 2020/1/5
pad_month_day = false
"#
        .to_string()
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse configuration file
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Configuration values are inconsistent
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path.display(), source)
            }
            ConfigError::ParseError { path, source } => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), source)
            }
            ConfigError::Invalid(message) => write!(f, "Invalid configuration: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::Invalid(_) => None,
        }
    }
}
