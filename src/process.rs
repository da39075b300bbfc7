//! Main file processor
//!
//! Handles the core logic of:
//! - Listing the input directory once (no recursion)
//! - Splitting entries into images and other files
//! - Reading capture dates of images
//! - Moving every file into its destination folder

use crate::classify::{Classification, classify};
use crate::config::{Config, FailurePolicy};
use crate::error::{Error, Result};
use crate::layout::{self, DestinationCategory};
use crate::place::place;
use crate::progress::{Progress, ProgressSink};
use crate::time::{DateOutcome, DateSource, ExifDateReader};
use std::path::{Path, PathBuf};
use tracing::{Level, debug, error, info, span};
use walkdir::WalkDir;

/// A file found directly under the input directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Full path of the file
    pub path: PathBuf,
    /// Base file name
    pub name: String,
}

/// Result of processing a single file
#[derive(Debug, Clone)]
pub struct FileResult {
    /// Source file path
    pub source: PathBuf,
    /// Destination file path (if successful)
    pub destination: Option<PathBuf>,
    /// Destination category, once known
    pub category: Option<DestinationCategory>,
    /// Processing status
    pub status: ProcessingStatus,
    /// Error message (if failed)
    pub error: Option<String>,
}

impl FileResult {
    fn placed(entry: &Entry, destination: PathBuf, category: DestinationCategory) -> Self {
        Self {
            source: entry.path.clone(),
            destination: Some(destination),
            category: Some(category),
            status: ProcessingStatus::Success,
            error: None,
        }
    }

    fn failed(entry: &Entry, category: Option<DestinationCategory>, error: &Error) -> Self {
        Self {
            source: entry.path.clone(),
            destination: None,
            category,
            status: ProcessingStatus::Failed,
            error: Some(error.to_string()),
        }
    }
}

/// Status of file processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStatus {
    /// File was moved to its destination
    Success,
    /// File was left in place
    Failed,
}

/// Processing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    pub total_files: usize,
    pub dated: usize,
    pub unknown_dates: usize,
    pub error_files: usize,
    pub others: usize,
    pub failed: usize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, result: &FileResult) {
        if result.status == ProcessingStatus::Failed {
            self.failed += 1;
            return;
        }
        match result.category {
            Some(DestinationCategory::ByDate(_)) => self.dated += 1,
            Some(DestinationCategory::UnknownDates) => self.unknown_dates += 1,
            Some(DestinationCategory::ErrorFiles) => self.error_files += 1,
            Some(DestinationCategory::Others) => self.others += 1,
            None => {}
        }
    }

    /// Files moved, whatever their folder
    pub fn moved(&self) -> usize {
        self.dated + self.unknown_dates + self.error_files + self.others
    }

    pub fn summary(&self) -> String {
        format!(
            "Total: {}, Dated: {}, Unknown dates: {}, Error files: {}, Others: {}, Skipped: {}",
            self.total_files,
            self.dated,
            self.unknown_dates,
            self.error_files,
            self.others,
            self.failed
        )
    }
}

/// List the files directly under `dir`, sorted by name.
///
/// Sub-directories are skipped and never descended into.
pub fn list_entries(dir: &Path) -> Result<Vec<Entry>> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut entries = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| Error::ListDirectory {
            path: dir.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_dir() {
            debug!(path = ?entry.path(), "Skipping directory");
            continue;
        }

        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.into_path(),
        });
    }

    Ok(entries)
}

/// Split entries into image candidates and everything else, keeping order
pub fn partition(entries: Vec<Entry>) -> (Vec<Entry>, Vec<Entry>) {
    entries
        .into_iter()
        .partition(|entry| classify(&entry.name) == Classification::Image)
}

/// Main processor for reorganizing a directory
pub struct Processor<S = ExifDateReader> {
    config: Config,
    dates: S,
    stats: ProcessingStats,
}

impl Processor<ExifDateReader> {
    /// Create a processor reading dates from EXIF metadata
    pub fn new(config: Config) -> Result<Self> {
        Self::with_date_source(config, ExifDateReader)
    }
}

impl<S: DateSource> Processor<S> {
    /// Create a processor with a custom date source
    pub fn with_date_source(config: Config, dates: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            dates,
            stats: ProcessingStats::new(),
        })
    }

    /// Run the processing pipeline.
    ///
    /// Returns one result per file. A fatal error aborts the run; files
    /// already moved stay where they are.
    pub fn run(&mut self, sink: &mut dyn ProgressSink) -> Result<Vec<FileResult>> {
        let _span = span!(Level::INFO, "processor_run").entered();

        let outcome = self.organize(sink);
        sink.finish();

        match &outcome {
            Ok(_) => info!("{}", self.stats.summary()),
            Err(e) => error!(error = %e, "Run aborted"),
        }
        outcome
    }

    fn organize(&mut self, sink: &mut dyn ProgressSink) -> Result<Vec<FileResult>> {
        let root = self.config.input_dir.clone();

        let entries = list_entries(&root)?;
        let (images, others) = partition(entries);
        let total = images.len() + others.len();

        self.stats = ProcessingStats {
            total_files: total,
            ..ProcessingStats::new()
        };
        info!(
            total,
            images = images.len(),
            others = others.len(),
            "Starting to organize"
        );

        let mut results = Vec::with_capacity(total);
        let mut progress = Progress::new(total);

        for entry in &images {
            let outcome = self.process_image(&root, entry);
            progress = self.finish_entry(entry, outcome, &mut results, progress, sink)?;
        }

        for entry in &others {
            let outcome = self.place_entry(&root, entry, DestinationCategory::Others);
            progress = self.finish_entry(entry, outcome, &mut results, progress, sink)?;
        }

        Ok(results)
    }

    fn process_image(&self, root: &Path, entry: &Entry) -> Result<FileResult> {
        let outcome = self.dates.read_date(&entry.path)?;
        if outcome == DateOutcome::DecodeError {
            info!(path = ?entry.path, "Could not decode image metadata");
        }

        let category = DestinationCategory::resolve(Classification::Image, outcome);
        self.place_entry(root, entry, category)
    }

    fn place_entry(
        &self,
        root: &Path,
        entry: &Entry,
        category: DestinationCategory,
    ) -> Result<FileResult> {
        let plan = layout::plan(root, category, &self.config.layout);

        match place(&entry.path, &plan) {
            Ok(destination) => {
                info!(
                    source = ?entry.path,
                    destination = ?destination,
                    category = %category,
                    "Moved file"
                );
                Ok(FileResult::placed(entry, destination, category))
            }
            Err(e) if !e.is_fatal() => {
                error!(source = ?entry.path, error = %e, "Failed to move file, skipping");
                Ok(FileResult::failed(entry, Some(category), &e))
            }
            Err(e) => Err(e),
        }
    }

    /// Apply the failure policy, record the result and advance progress
    fn finish_entry(
        &mut self,
        entry: &Entry,
        outcome: Result<FileResult>,
        results: &mut Vec<FileResult>,
        progress: Progress,
        sink: &mut dyn ProgressSink,
    ) -> Result<Progress> {
        let result = match outcome {
            Ok(result) => result,
            Err(e) if self.config.failure_policy == FailurePolicy::Continue => {
                error!(source = ?entry.path, error = %e, "Failed to process file, continuing");
                FileResult::failed(entry, None, &e)
            }
            Err(e) => return Err(e),
        };

        self.stats.record(&result);
        results.push(result);

        let progress = progress.advance();
        sink.report(&progress);
        Ok(progress)
    }

    /// Get processing statistics of the last run
    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
