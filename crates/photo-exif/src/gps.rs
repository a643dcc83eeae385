//! GPS tag normalisation
//!
//! Cameras and phone apps disagree on how a GPS coordinate is stored: the
//! usual three rationals (degrees, minutes, seconds), a single rational or
//! double holding decimal degrees, two values (degrees, decimal minutes), or
//! even ASCII text. Every shape is normalised here, once, into
//! [`GpsCoordinate`] before any arithmetic happens.

use barangay_classifier::GeoPoint;
use exif::{Tag, Value};
use tracing::debug;

use crate::reader::ExifReader;

/// Divisors for degrees, minutes and seconds
pub const DMS_DIVISION: [f64; 3] = [1.0, 60.0, 3600.0];

/// A coordinate as it was stored, before the hemisphere is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GpsCoordinate {
    /// Flat decimal degrees
    Decimal(f64),
    /// Degrees, minutes, seconds
    Dms {
        degrees: f64,
        minutes: f64,
        seconds: f64,
    },
}

impl GpsCoordinate {
    /// Normalise the wrapped value the EXIF reader hands back.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Rational(parts) => Self::from_parts(parts.iter().map(|r| r.to_f64())),
            Value::SRational(parts) => Self::from_parts(parts.iter().map(|r| r.to_f64())),
            Value::Double(parts) => Self::from_parts(parts.iter().copied()),
            Value::Float(parts) => Self::from_parts(parts.iter().map(|&x| f64::from(x))),
            Value::Ascii(strings) => strings
                .first()
                .and_then(|s| Self::from_text(&String::from_utf8_lossy(s))),
            _ => None,
        }
    }

    /// Parse text such as `"8.366667"`, `"8 22 0"` or `"8 deg 22' 0.00\""`.
    pub fn from_text(text: &str) -> Option<Self> {
        let cleaned: String = text
            .chars()
            .map(|c| if c.is_ascii_digit() || c == '.' || c == '-' { c } else { ' ' })
            .collect();
        let parts: Option<Vec<f64>> = cleaned.split_whitespace().map(|s| s.parse().ok()).collect();
        Self::from_parts(parts?)
    }

    fn from_parts(parts: impl IntoIterator<Item = f64>) -> Option<Self> {
        match parts.into_iter().collect::<Vec<_>>()[..] {
            [decimal] => Some(Self::Decimal(decimal)),
            [degrees, minutes] => Some(Self::Dms {
                degrees,
                minutes,
                seconds: 0.0,
            }),
            [degrees, minutes, seconds] => Some(Self::Dms {
                degrees,
                minutes,
                seconds,
            }),
            _ => None,
        }
    }

    /// Unsigned decimal degrees: `degrees + minutes/60 + seconds/3600`
    pub fn degrees(&self) -> f64 {
        match *self {
            Self::Decimal(decimal) => decimal,
            Self::Dms {
                degrees,
                minutes,
                seconds,
            } => [degrees, minutes, seconds]
                .iter()
                .zip(DMS_DIVISION.iter())
                .map(|(x, d)| x / d)
                .sum(),
        }
    }
}

/// GPS reference tag value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Ascii(strings) => strings.first().and_then(|s| s.first()).and_then(|&b| Self::from_char(b.into())),
            _ => None,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Self::North),
            'S' => Some(Self::South),
            'E' => Some(Self::East),
            'W' => Some(Self::West),
            _ => None,
        }
    }

    /// South and West are negative. A value already stored with a sign is
    /// not flipped twice.
    pub fn apply(self, degrees: f64) -> f64 {
        match self {
            Self::South | Self::West => -degrees.abs(),
            Self::North | Self::East => degrees,
        }
    }
}

fn read_coordinate(reader: &ExifReader, value_tag: Tag, ref_tag: Tag) -> Option<f64> {
    let field = reader.field(value_tag)?;
    let Some(coordinate) = GpsCoordinate::from_value(&field.value) else {
        debug!(tag = %value_tag, value = ?field.value, "unrecognised GPS value shape");
        return None;
    };

    let degrees = coordinate.degrees();
    Some(
        match reader
            .field(ref_tag)
            .and_then(|f| Hemisphere::from_value(&f.value))
        {
            Some(hemisphere) => hemisphere.apply(degrees),
            None => degrees,
        },
    )
}

/// Capture position as stored in the GPS IFD. Not screened.
pub fn read_location(reader: &ExifReader) -> Option<GeoPoint> {
    let lat = read_coordinate(reader, Tag::GPSLatitude, Tag::GPSLatitudeRef)?;
    let lng = read_coordinate(reader, Tag::GPSLongitude, Tag::GPSLongitudeRef)?;
    Some(GeoPoint::new(lat, lng))
}
