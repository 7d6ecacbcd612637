// src/gps/fix.rs
//! GPGGA fix extraction and validation

use super::nmea::{RawSentence, SentenceGroup};
use chrono::{NaiveTime, Timelike};
use log::debug;
use std::fmt;

const FIX_SENTENCE: &str = "GPGGA";

// GPGGA field positions
const TIME: usize = 1;
const LATITUDE: usize = 2;
const LAT_HEMISPHERE: usize = 3;
const LONGITUDE: usize = 4;
const LON_HEMISPHERE: usize = 5;
const QUALITY: usize = 6;
const SATELLITES: usize = 7;
const HDOP: usize = 8;
const ALTITUDE: usize = 9;

/// GPS quality indicator; zero means no fix
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FixQuality(pub u64);

impl FixQuality {
    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }

    pub fn description(&self) -> String {
        match self.0 {
            0 => "No fix".to_string(),
            1 => "GPS".to_string(),
            2 => "DGPS".to_string(),
            3 => "PPS".to_string(),
            4 => "RTK".to_string(),
            5 => "Float RTK".to_string(),
            6 => "Estimated".to_string(),
            7 => "Manual".to_string(),
            8 => "Simulation".to_string(),
            q => format!("Unknown ({})", q),
        }
    }
}

impl fmt::Display for FixQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A GPGGA sentence with a valid position fix.
///
/// Coordinates and HDOP are kept as the raw strings from the log.
#[derive(Debug, Clone, PartialEq)]
pub struct Fix {
    pub line: usize,
    pub time: Option<NaiveTime>,
    pub latitude: String,
    pub lat_hemisphere: String,
    pub longitude: String,
    pub lon_hemisphere: String,
    pub quality: FixQuality,
    pub satellites: Option<u8>,
    pub hdop: String,
    pub altitude: Option<f64>,
}

impl Fix {
    /// Build a fix from a sentence, or `None` when it is not a GPGGA
    /// sentence with a quality indicator above zero.
    pub fn from_sentence(sentence: &RawSentence) -> Option<Self> {
        if sentence.id() != FIX_SENTENCE {
            return None;
        }

        let quality = match sentence.field(QUALITY) {
            Some(q) if !q.is_empty() => q,
            _ => {
                debug!("line {}: GPGGA without quality indicator", sentence.line);
                return None;
            }
        };
        let quality = match quality.parse().map(FixQuality) {
            Ok(q) if q.is_valid() => q,
            _ => {
                debug!("line {}: no position fix (quality '{}')", sentence.line, quality);
                return None;
            }
        };

        let text = |index: usize| sentence.field(index).unwrap_or("").to_string();

        Some(Self {
            line: sentence.line,
            time: sentence.field(TIME).and_then(parse_utc_time),
            latitude: text(LATITUDE),
            lat_hemisphere: text(LAT_HEMISPHERE),
            longitude: text(LONGITUDE),
            lon_hemisphere: text(LON_HEMISPHERE),
            quality,
            satellites: sentence.field(SATELLITES).and_then(|s| s.parse().ok()),
            hdop: text(HDOP),
            altitude: sentence.field(ALTITUDE).and_then(|s| s.parse().ok()),
        })
    }

    pub fn hdop_value(&self) -> Option<f64> {
        self.hdop.trim().parse().ok()
    }
}

/// Parse `hhmmss` or `hhmmss.sss`
fn parse_utc_time(s: &str) -> Option<NaiveTime> {
    let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
    let time = NaiveTime::parse_from_str(whole, "%H%M%S").ok()?;
    if frac.is_empty() {
        return Some(time);
    }
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits = &frac[..frac.len().min(9)];
    let nanos: u32 = format!("{:0<9}", digits).parse().ok()?;
    time.with_nanosecond(nanos)
}

/// Keep the valid GPGGA fixes of every group, in log order
pub fn filter_fixes(groups: &[SentenceGroup]) -> Vec<Fix> {
    let fixes: Vec<Fix> = groups
        .iter()
        .flat_map(SentenceGroup::iter)
        .filter_map(Fix::from_sentence)
        .collect();

    debug!("{} valid fixes in {} groups", fixes.len(), groups.len());
    fixes
}
