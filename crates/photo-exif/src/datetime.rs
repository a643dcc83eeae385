use chrono::{DateTime, NaiveDateTime, Utc};
use exif::Tag;
use tracing::debug;

use crate::reader::ExifReader;

/// Timestamp tags in the order they are tried
pub const TIME_TAGS: [Tag; 3] = [Tag::DateTimeOriginal, Tag::DateTime, Tag::DateTimeDigitized];

/// Format of the strings produced by [`exif_to_iso8601`]
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// `"2024:03:15 14:30:00"` becomes `"2024-03-15T14:30:00Z"`.
///
/// The first two colons become hyphens, the first space becomes `T` and a
/// `Z` is appended. The camera's wall-clock time is labelled UTC as-is;
/// offset tags are not applied.
pub fn exif_to_iso8601(raw: &str) -> String {
    let mut iso = raw.trim().replacen(':', "-", 2).replacen(' ', "T", 1);
    iso.push('Z');
    iso
}

/// Parse a timestamp produced by [`exif_to_iso8601`]. Placeholders such as
/// `"0000-00-00T00:00:00Z"` are not real instants and give `None`.
pub fn parse_captured_at(iso: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(iso, ISO_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Timestamp from the first of [`TIME_TAGS`] that is present.
pub fn read_captured_at(reader: &ExifReader) -> Option<String> {
    let (tag, raw) = TIME_TAGS
        .iter()
        .find_map(|&tag| reader.ascii(tag).map(|raw| (tag, raw)))?;
    debug!(%tag, raw = %raw, "using capture timestamp");
    Some(exif_to_iso8601(&raw))
}
