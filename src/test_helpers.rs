//! Shared test utilities: minimal JPEG files carrying an EXIF block.
//!
//! The generated files hold only SOI, one APP1 segment with a big-endian
//! TIFF structure (IFD0 and the given fields) and EOI, which is all the
//! EXIF decoder needs.

use std::fs;
use std::path::Path;

/// One IFD0 entry
pub enum TestField<'a> {
    /// ASCII field, NUL terminator added
    Ascii(u16, &'a str),
    /// Single SHORT value
    Short(u16, u16),
}

/// Build a JPEG byte stream whose EXIF IFD0 holds `fields`.
pub fn exif_jpeg(fields: &[TestField<'_>]) -> Vec<u8> {
    let mut ifd = Vec::new();
    let mut extra = Vec::new();
    let mut data_offset = 8 + 2 + 12 * fields.len() + 4;

    ifd.extend((fields.len() as u16).to_be_bytes());
    for field in fields {
        match field {
            TestField::Ascii(tag, text) => {
                let mut bytes = text.as_bytes().to_vec();
                bytes.push(0);
                ifd.extend(tag.to_be_bytes());
                ifd.extend(2u16.to_be_bytes());
                ifd.extend((bytes.len() as u32).to_be_bytes());
                if bytes.len() <= 4 {
                    bytes.resize(4, 0);
                    ifd.extend(bytes);
                } else {
                    ifd.extend((data_offset as u32).to_be_bytes());
                    data_offset += bytes.len();
                    extra.extend(bytes);
                }
            }
            TestField::Short(tag, value) => {
                ifd.extend(tag.to_be_bytes());
                ifd.extend(3u16.to_be_bytes());
                ifd.extend(1u32.to_be_bytes());
                ifd.extend(value.to_be_bytes());
                ifd.extend([0u8, 0]);
            }
        }
    }
    ifd.extend(0u32.to_be_bytes());

    let mut app1 = b"Exif\0\0MM\x00\x2a\x00\x00\x00\x08".to_vec();
    app1.extend(ifd);
    app1.extend(extra);

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend(((app1.len() + 2) as u16).to_be_bytes());
    jpeg.extend(app1);
    jpeg.extend([0xFF, 0xD9]);
    jpeg
}

/// Write a JPEG with a `DateTime` field set to `datetime`.
pub fn write_dated_jpeg(path: &Path, datetime: &str) {
    fs::write(path, exif_jpeg(&[TestField::Ascii(0x0132, datetime)])).unwrap();
}
