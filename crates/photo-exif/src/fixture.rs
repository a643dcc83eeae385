//! In-memory JPEG fixtures carrying a hand-built EXIF block

use std::io::Cursor;

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};

#[derive(Default)]
pub struct JpegFixture {
    fields: Vec<Field>,
}

impl JpegFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(mut self, tag: Tag, value: Value) -> Self {
        self.fields.push(Field {
            tag,
            ifd_num: In::PRIMARY,
            value,
        });
        self
    }

    pub fn ascii(self, tag: Tag, text: &str) -> Self {
        self.value(tag, Value::Ascii(vec![text.as_bytes().to_vec()]))
    }

    pub fn dms(self, tag: Tag, degrees: u32, minutes: u32, seconds: f64) -> Self {
        self.value(
            tag,
            Value::Rational(vec![
                Rational { num: degrees, denom: 1 },
                Rational { num: minutes, denom: 1 },
                Rational {
                    num: (seconds * 100.0).round() as u32,
                    denom: 100,
                },
            ]),
        )
    }

    /// Full D/M/S position with hemisphere references
    pub fn gps(self, lat: (u32, u32, f64, &str), lng: (u32, u32, f64, &str)) -> Self {
        self.dms(Tag::GPSLatitude, lat.0, lat.1, lat.2)
            .ascii(Tag::GPSLatitudeRef, lat.3)
            .dms(Tag::GPSLongitude, lng.0, lng.1, lng.2)
            .ascii(Tag::GPSLongitudeRef, lng.3)
    }

    /// SOI, one APP1 "Exif" segment holding the TIFF block, EOI.
    pub fn jpeg(&self) -> Vec<u8> {
        let mut writer = Writer::new();
        for field in &self.fields {
            writer.push_field(field);
        }
        let mut tiff = Cursor::new(Vec::new());
        writer.write(&mut tiff, false).unwrap();
        let tiff = tiff.into_inner();

        let segment_len = u16::try_from(2 + 6 + tiff.len()).unwrap();
        let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
        jpeg.extend_from_slice(&segment_len.to_be_bytes());
        jpeg.extend_from_slice(b"Exif\0\0");
        jpeg.extend_from_slice(&tiff);
        jpeg.extend_from_slice(&[0xFF, 0xD9]);
        jpeg
    }
}

/// A JPEG with no APP1 segment at all
pub fn bare_jpeg() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xD9]
}
