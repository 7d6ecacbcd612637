// src/gps/coordinate.rs
//! Conversion of NMEA `ddmm.mmmm` / `dddmm.mmmm` coordinates to decimal degrees

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "N" => Some(Hemisphere::North),
            "S" => Some(Hemisphere::South),
            "E" => Some(Hemisphere::East),
            "W" => Some(Hemisphere::West),
            _ => None,
        }
    }

    /// Number of leading characters holding whole degrees
    pub fn degree_width(&self) -> usize {
        match self {
            Hemisphere::North | Hemisphere::South => 2,
            Hemisphere::East | Hemisphere::West => 3,
        }
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MalformedKind {
    TooShort { expected: usize },
    NonNumeric,
    UnknownHemisphere,
    OutOfRange(f64),
}

/// A coordinate field that could not be turned into decimal degrees
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedCoordinate {
    pub value: String,
    pub hemisphere: String,
    pub kind: MalformedKind,
}

impl MalformedCoordinate {
    fn new(value: &str, hemisphere: &str, kind: MalformedKind) -> Self {
        Self {
            value: value.to_string(),
            hemisphere: hemisphere.to_string(),
            kind,
        }
    }

    pub fn out_of_range(value: &str, hemisphere: &str, degrees: f64) -> Self {
        Self::new(value, hemisphere, MalformedKind::OutOfRange(degrees))
    }
}

impl fmt::Display for MalformedCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({}): ", self.value, self.hemisphere)?;
        match &self.kind {
            MalformedKind::TooShort { expected } => {
                write!(f, "expected at least {} degree digits", expected)
            }
            MalformedKind::NonNumeric => write!(f, "not a ddmm.mmmm value"),
            MalformedKind::UnknownHemisphere => write!(f, "hemisphere must be one of N, S, E, W"),
            MalformedKind::OutOfRange(deg) => write!(f, "{:.6} degrees is out of range", deg),
        }
    }
}

impl std::error::Error for MalformedCoordinate {}

/// Convert an NMEA coordinate and its hemisphere letter to signed decimal degrees.
///
/// Latitudes carry two degree digits, longitudes three; the remainder is minutes.
/// South and West are negative. The magnitude is not range checked here.
///
/// `to_decimal_degrees("5126.5", "N")` gives `51.441666...`
pub fn to_decimal_degrees(raw: &str, hemisphere: &str) -> Result<f64, MalformedCoordinate> {
    let hemi = Hemisphere::parse(hemisphere).ok_or_else(|| {
        MalformedCoordinate::new(raw, hemisphere, MalformedKind::UnknownHemisphere)
    })?;

    let width = hemi.degree_width();
    if raw.len() < width {
        return Err(MalformedCoordinate::new(
            raw,
            hemisphere,
            MalformedKind::TooShort { expected: width },
        ));
    }

    let non_numeric = || MalformedCoordinate::new(raw, hemisphere, MalformedKind::NonNumeric);

    let (degs, mins) = match (raw.get(..width), raw.get(width..)) {
        (Some(d), Some(m)) => (d, m),
        _ => return Err(non_numeric()),
    };

    if !degs.bytes().all(|b| b.is_ascii_digit()) {
        return Err(non_numeric());
    }
    if mins.is_empty() || !mins.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return Err(non_numeric());
    }

    let degrees: f64 = degs.parse().map_err(|_| non_numeric())?;
    let minutes: f64 = mins.parse().map_err(|_| non_numeric())?;

    let decimal = degrees + minutes / 60.0;
    Ok(if hemi.is_negative() { -decimal } else { decimal })
}
