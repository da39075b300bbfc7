//! Date Sorter - reorganize a flat photo folder by capture date
//!
//! This library provides functionality for sorting the files directly
//! inside one directory into a date hierarchy:
//! - EXIF capture date extraction for `.jpg` images
//! - `{year}/{month}/{day}` folders built one level at a time
//! - Fallback folders for undated and undecodable images
//! - A catch-all folder for every other file
//! - Console progress and per-file results

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod place;
pub mod process;
pub mod progress;
pub mod time;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use classify::{Classification, classify};
pub use cli::Cli;
pub use config::{Config, ConfigError, FailurePolicy, LayoutConfig};
pub use error::{Error, Result};
pub use layout::{DestinationCategory, DestinationPlan};
pub use process::{FileResult, ProcessingStats, ProcessingStatus, Processor};
pub use progress::{ConsoleProgress, NoProgress, Progress, ProgressSink};
pub use time::{CaptureDate, DateOutcome, DateSource, ExifDateReader};
