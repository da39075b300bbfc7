//! Capture date extraction
//!
//! Reading a capture date from an image yields one of three outcomes: a
//! date, a decoded metadata block without a date, or a metadata block that
//! could not be decoded at all. Only the first leads to a dated folder.

pub mod exif;

use crate::error::Result;
use chrono::Datelike;
use std::path::Path;

pub use self::exif::ExifDateReader;

/// Year, month and day as recorded by the camera, no timezone conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CaptureDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CaptureDate {
    /// Build a date, rejecting the zero and negative values used as sentinels
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if year <= 0 || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// Take the calendar fields of a parsed timestamp verbatim
    pub fn from_datelike<D: Datelike>(value: &D) -> Option<Self> {
        Self::new(value.year(), value.month(), value.day())
    }
}

/// Result of reading the capture date of one image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOutcome {
    /// Metadata decoded and carried a usable date
    Known(CaptureDate),
    /// Metadata decoded but no date field was present
    Unknown,
    /// Metadata container could not be decoded
    DecodeError,
}

impl DateOutcome {
    /// Triple written for an image without a date
    pub const UNKNOWN_TRIPLE: [i32; 3] = [0, 0, 0];
    /// Triple written for an image whose metadata failed to decode
    pub const DECODE_ERROR_TRIPLE: [i32; 3] = [-1, -1, -1];

    /// Interpret a `[year, month, day]` triple.
    ///
    /// The year is checked first: `0` always means unknown and a negative
    /// year always means a decode error, whatever the other fields hold.
    pub fn from_triple([year, month, day]: [i32; 3]) -> Self {
        if year == 0 {
            return DateOutcome::Unknown;
        }
        if year < 0 {
            return DateOutcome::DecodeError;
        }
        match (u32::try_from(month), u32::try_from(day)) {
            (Ok(month), Ok(day)) => CaptureDate::new(year, month, day)
                .map(DateOutcome::Known)
                .unwrap_or(DateOutcome::Unknown),
            _ => DateOutcome::Unknown,
        }
    }

    /// The `[year, month, day]` form, sentinels included
    pub fn as_triple(&self) -> [i32; 3] {
        match self {
            DateOutcome::Known(date) => [date.year, date.month as i32, date.day as i32],
            DateOutcome::Unknown => Self::UNKNOWN_TRIPLE,
            DateOutcome::DecodeError => Self::DECODE_ERROR_TRIPLE,
        }
    }
}

/// Anything that can tell the capture date of an image file.
///
/// An `Err` means the file could not even be opened; decode failures are
/// reported as [`DateOutcome::DecodeError`].
pub trait DateSource {
    fn read_date(&self, path: &Path) -> Result<DateOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_sentinel_triples() {
        assert_eq!(DateOutcome::from_triple([0, 0, 0]), DateOutcome::Unknown);
        assert_eq!(DateOutcome::from_triple([-1, -1, -1]), DateOutcome::DecodeError);
        // Year decides, regardless of the other fields
        assert_eq!(DateOutcome::from_triple([0, 5, 3]), DateOutcome::Unknown);
        assert_eq!(DateOutcome::from_triple([-1, 5, 3]), DateOutcome::DecodeError);
    }

    #[test]
    fn test_known_triple() {
        let outcome = DateOutcome::from_triple([2021, 5, 3]);
        assert_eq!(
            outcome,
            DateOutcome::Known(CaptureDate {
                year: 2021,
                month: 5,
                day: 3
            })
        );
        assert_eq!(outcome.as_triple(), [2021, 5, 3]);
        assert_eq!(DateOutcome::Unknown.as_triple(), [0, 0, 0]);
        assert_eq!(DateOutcome::DecodeError.as_triple(), [-1, -1, -1]);
    }

    #[test]
    fn test_capture_date_bounds() {
        assert!(CaptureDate::new(2020, 0, 1).is_none());
        assert!(CaptureDate::new(2020, 13, 1).is_none());
        assert!(CaptureDate::new(2020, 1, 32).is_none());
        assert!(CaptureDate::new(0, 1, 1).is_none());
        assert!(CaptureDate::new(2020, 2, 31).is_some());
    }

    #[test]
    fn test_from_datelike() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
        assert_eq!(
            CaptureDate::from_datelike(&date),
            Some(CaptureDate {
                year: 2020,
                month: 1,
                day: 15
            })
        );
    }
}
