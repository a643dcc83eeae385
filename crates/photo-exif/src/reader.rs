use std::io::{BufRead, Cursor, Seek};

use exif::{Exif, Field, In, Tag, Value};

use crate::Result;

/// Thin wrapper over a parsed EXIF block, primary image only.
pub struct ExifReader(Exif);

impl ExifReader {
    /// Parse EXIF from any container format the `exif` crate recognises
    /// (JPEG, TIFF, HEIF, PNG, WebP).
    pub fn from_container<R: BufRead + Seek>(reader: &mut R) -> Result<Self> {
        Ok(Self(exif::Reader::new().read_from_container(reader)?))
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::from_container(&mut Cursor::new(bytes))
    }

    #[must_use]
    pub fn field(&self, tag: Tag) -> Option<&Field> {
        self.0.get_field(tag, In::PRIMARY)
    }

    /// The first ASCII string stored under `tag`, without the NUL padding
    /// and trailing spaces some cameras write.
    #[must_use]
    pub fn ascii(&self, tag: Tag) -> Option<String> {
        match &self.field(tag)?.value {
            Value::Ascii(strings) => strings
                .iter()
                .map(|s| String::from_utf8_lossy(s).trim_end_matches(['\0', ' ']).to_string())
                .find(|s| !s.is_empty()),
            _ => None,
        }
    }
}
