//! EXIF capture date extraction for images

use super::{CaptureDate, DateOutcome, DateSource};
use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use exif::{In, Reader, Tag};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, trace};

/// EXIF tags to try for date extraction, in priority order
const DATE_TAGS: &[Tag] = &[
    Tag::DateTimeOriginal,    // When the original image was taken
    Tag::DateTimeDigitized,   // When the image was digitized
    Tag::DateTime,            // File modification date/time
];

/// [`DateSource`] backed by the image's EXIF block
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifDateReader;

impl DateSource for ExifDateReader {
    fn read_date(&self, path: &Path) -> Result<DateOutcome> {
        read_capture_date(path)
    }
}

/// Read the capture date of an image.
///
/// Failing to open the file is an error. Failing to decode its metadata is
/// not: it yields [`DateOutcome::DecodeError`].
pub fn read_capture_date(path: &Path) -> Result<DateOutcome> {
    let file = File::open(path).map_err(|source| Error::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    let exif = match Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(e) => {
            debug!(?path, error = %e, "EXIF block could not be decoded");
            return Ok(DateOutcome::DecodeError);
        }
    };

    // Try each date tag in priority order
    for tag in DATE_TAGS {
        if let Some(field) = exif.get_field(*tag, In::PRIMARY)
            && let Some(datetime) = parse_exif_datetime(&field.display_value().to_string())
            && let Some(date) = CaptureDate::from_datelike(&datetime)
        {
            trace!(?path, ?tag, "Found EXIF date");
            return Ok(DateOutcome::Known(date));
        }
    }

    debug!(?path, "EXIF block has no usable date");
    Ok(DateOutcome::Unknown)
}

/// Parse EXIF datetime string format: "YYYY:MM:DD HH:MM:SS"
fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    // EXIF format: "2024:01:15 14:30:00" or with quotes
    let s = s.trim().trim_matches('"');

    let formats = [
        "%Y:%m:%d %H:%M:%S",
        "%Y:%m:%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
    ];

    formats
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{TestField, exif_jpeg};
    use chrono::Datelike;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_exif_datetime() {
        let dt = parse_exif_datetime("2024:01:15 14:30:00").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 1, 15));

        // Quoted, as rendered for plain ASCII fields
        let dt = parse_exif_datetime("\"2024:01:15 14:30:00\"").unwrap();
        assert_eq!(dt.year(), 2024);

        let dt = parse_exif_datetime("2024-01-15 14:30:00").unwrap();
        assert_eq!(dt.day(), 15);

        assert!(parse_exif_datetime("invalid").is_none());
        assert!(parse_exif_datetime("0000:00:00 00:00:00").is_none());
    }

    #[test]
    fn test_read_known_date() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.JPG");
        fs::write(
            &path,
            exif_jpeg(&[TestField::Ascii(0x0132, "2020:01:15 10:20:30")]),
        )
        .unwrap();

        let outcome = read_capture_date(&path).unwrap();
        assert_eq!(outcome, DateOutcome::from_triple([2020, 1, 15]));
    }

    #[test]
    fn test_read_without_date_is_unknown() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nodate.jpg");
        fs::write(&path, exif_jpeg(&[TestField::Short(0x0112, 1)])).unwrap();

        assert_eq!(read_capture_date(&path).unwrap(), DateOutcome::Unknown);
    }

    #[test]
    fn test_read_zero_date_is_unknown() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("zero.jpg");
        fs::write(
            &path,
            exif_jpeg(&[TestField::Ascii(0x0132, "0000:00:00 00:00:00")]),
        )
        .unwrap();

        assert_eq!(read_capture_date(&path).unwrap(), DateOutcome::Unknown);
    }

    #[test]
    fn test_read_corrupt_is_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("b.jpg");
        fs::write(&path, b"definitely not a jpeg").unwrap();

        assert_eq!(read_capture_date(&path).unwrap(), DateOutcome::DecodeError);
    }

    #[test]
    fn test_read_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let err = ExifDateReader
            .read_date(&dir.path().join("missing.jpg"))
            .unwrap_err();
        assert!(matches!(err, Error::OpenFile { .. }));
        assert!(err.is_fatal());
    }
}
