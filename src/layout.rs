//! Destination planning
//!
//! Maps every file to exactly one destination folder under the input
//! directory. Destinations are kept as a root plus an ordered list of
//! segments and only joined into a path at the filesystem boundary.

use crate::classify::Classification;
use crate::config::LayoutConfig;
use crate::time::{CaptureDate, DateOutcome};
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a file ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DestinationCategory {
    /// `{year}/{month}/{day}`
    ByDate(CaptureDate),
    /// Image metadata decoded without a date
    UnknownDates,
    /// Image metadata failed to decode
    ErrorFiles,
    /// Not an image
    Others,
}

impl DestinationCategory {
    /// Category for an entry.
    ///
    /// Generic files are always `Others`, whatever outcome is passed; image
    /// files follow their date outcome.
    pub fn resolve(classification: Classification, outcome: DateOutcome) -> Self {
        match (classification, outcome) {
            (Classification::Generic, _) => DestinationCategory::Others,
            (Classification::Image, DateOutcome::Known(date)) => DestinationCategory::ByDate(date),
            (Classification::Image, DateOutcome::Unknown) => DestinationCategory::UnknownDates,
            (Classification::Image, DateOutcome::DecodeError) => DestinationCategory::ErrorFiles,
        }
    }

    /// Short label for logs and summaries
    pub fn label(&self) -> &'static str {
        match self {
            DestinationCategory::ByDate(_) => "dated",
            DestinationCategory::UnknownDates => "unknown-date",
            DestinationCategory::ErrorFiles => "error",
            DestinationCategory::Others => "other",
        }
    }
}

impl fmt::Display for DestinationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationCategory::ByDate(date) => {
                write!(f, "{:04}-{:02}-{:02}", date.year, date.month, date.day)
            }
            other => f.write_str(other.label()),
        }
    }
}

/// A destination folder: the input root plus the folders below it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationPlan {
    root: PathBuf,
    segments: Vec<String>,
}

impl DestinationPlan {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Every folder that has to exist, shallowest first.
    ///
    /// For a dated plan this is `year`, `year/month`, `year/month/day`.
    pub fn levels(&self) -> impl Iterator<Item = PathBuf> + '_ {
        (1..=self.segments.len()).map(|depth| {
            let mut path = self.root.clone();
            path.extend(&self.segments[..depth]);
            path
        })
    }

    /// The full destination folder
    pub fn path(&self) -> PathBuf {
        let mut path = self.root.clone();
        path.extend(&self.segments);
        path
    }
}

/// Compute the destination folder of a category. Pure, no I/O.
pub fn plan(root: &Path, category: DestinationCategory, layout: &LayoutConfig) -> DestinationPlan {
    let segments = match category {
        DestinationCategory::UnknownDates => vec![layout.unknown_dates_dir.clone()],
        DestinationCategory::ErrorFiles => vec![layout.error_files_dir.clone()],
        DestinationCategory::Others => vec![layout.others_dir.clone()],
        DestinationCategory::ByDate(date) => {
            if layout.pad_month_day {
                vec![
                    date.year.to_string(),
                    format!("{:02}", date.month),
                    format!("{:02}", date.day),
                ]
            } else {
                vec![
                    date.year.to_string(),
                    date.month.to_string(),
                    date.day.to_string(),
                ]
            }
        }
    };

    DestinationPlan {
        root: root.to_path_buf(),
        segments,
    }
}
