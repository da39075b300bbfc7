//! CLI argument parsing with clap

use crate::config::{Config, FailurePolicy};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Date Sorter - sort a flat photo folder into year/month/day folders
///
/// Reads the EXIF capture date of every .jpg file directly inside
/// DIRECTORY and moves it into DIRECTORY/{year}/{month}/{day}. Images
/// without a date go to unknown_dates, undecodable images to error_files
/// and every other file to others.
#[derive(Parser, Debug)]
#[command(name = "date-sorter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to reorganize (exactly one)
    #[arg(value_name = "DIRECTORY")]
    pub directories: Vec<PathBuf>,

    /// Path to configuration file (TOML format)
    ///
    /// CLI arguments override config file settings.
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Keep going when a file cannot be opened or its folder cannot be created
    #[arg(long)]
    pub continue_on_error: bool,

    /// Do not draw the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write the log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Write the log file as JSON
    #[arg(long, requires = "log_file")]
    pub json_log: bool,

    /// Print a sample configuration file and exit
    #[arg(long)]
    pub sample_config: bool,
}

/// Printed when the directory argument is missing or repeated
pub fn usage_message() -> String {
    "ERROR: Needed only the input of the directory to reorganize.\n\
     Example: 'date-sorter {PATH}'"
        .to_string()
}

impl Cli {
    /// The directory to reorganize, if exactly one was given
    pub fn input_dir(&self) -> Option<&Path> {
        match self.directories.as_slice() {
            [dir] => Some(dir.as_path()),
            _ => None,
        }
    }

    /// Merge CLI arguments with config from file
    /// CLI arguments take precedence over config file settings
    pub fn merge_with_config(&self, mut config: Config) -> Config {
        if let Some(dir) = self.input_dir() {
            config.input_dir = dir.to_path_buf();
        }
        if self.continue_on_error {
            config.failure_policy = FailurePolicy::Continue;
        }
        if self.no_progress {
            config.show_progress = false;
        }
        if self.verbose {
            config.verbose = true;
        }

        config
    }

    /// Convert CLI arguments to Config (when no config file is used)
    pub fn to_config(&self) -> Config {
        self.merge_with_config(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_directory() {
        let cli = Cli::try_parse_from(["date-sorter", "/photos"]).unwrap();
        assert_eq!(cli.input_dir(), Some(Path::new("/photos")));

        let config = cli.to_config();
        assert_eq!(config.input_dir, PathBuf::from("/photos"));
        assert_eq!(config.failure_policy, FailurePolicy::FailFast);
        assert!(config.show_progress);
    }

    #[test]
    fn test_directory_count_must_be_one() {
        let none = Cli::try_parse_from(["date-sorter"]).unwrap();
        assert!(none.input_dir().is_none());

        let two = Cli::try_parse_from(["date-sorter", "a", "b"]).unwrap();
        assert!(two.input_dir().is_none());
    }

    #[test]
    fn test_flags_override_file_config() {
        let cli = Cli::try_parse_from([
            "date-sorter",
            "--continue-on-error",
            "--no-progress",
            "-v",
            "dump",
        ])
        .unwrap();

        let file_config = Config {
            verbose: false,
            ..Config::default()
        };
        let config = cli.merge_with_config(file_config);
        assert_eq!(config.failure_policy, FailurePolicy::Continue);
        assert!(!config.show_progress);
        assert!(config.verbose);
        assert_eq!(config.input_dir, PathBuf::from("dump"));
    }

    #[test]
    fn test_json_log_requires_log_file() {
        assert!(Cli::try_parse_from(["date-sorter", "--json-log", "dump"]).is_err());
        assert!(
            Cli::try_parse_from(["date-sorter", "--json-log", "--log-file", "run.log", "dump"])
                .is_ok()
        );
    }

    #[test]
    fn test_usage_message() {
        assert!(usage_message().starts_with("ERROR: Needed only the input"));
    }
}
