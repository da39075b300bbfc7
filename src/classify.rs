//! File classification by extension

use std::path::Path;

/// Extensions whose files are read for a capture date (compared lowercase)
const IMAGE_EXTENSIONS: &[&str] = &["jpg"];

/// Whether a file is eligible for date extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// JPEG image, dated from its EXIF block
    Image,
    /// Anything else, sent to the others folder
    Generic,
}

/// Classify a file by its name alone.
///
/// Only `.jpg` in any letter case counts as an image; other image formats
/// are generic.
pub fn classify(filename: &str) -> Classification {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    if IMAGE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)) {
        Classification::Image
    } else {
        Classification::Generic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpg_any_case_is_image() {
        assert_eq!(classify("a.jpg"), Classification::Image);
        assert_eq!(classify("a.JPG"), Classification::Image);
        assert_eq!(classify("IMG_0001.Jpg"), Classification::Image);
        assert_eq!(classify("holiday.photo.jpg"), Classification::Image);
    }

    #[test]
    fn test_other_formats_are_generic() {
        for name in [
            "c.txt", "d.png", "e.jpeg", "f.heic", "g.JPEG", "h.gif", "notes", ".jpg", "a.jpg.txt",
        ] {
            assert_eq!(classify(name), Classification::Generic, "{name}");
        }
    }
}
