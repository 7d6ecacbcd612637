// src/track/mod.rs
//! Flight track built from validated fixes

mod bounds;

pub use bounds::{compute_bounds, compute_bounds_or, BoundingCenter, GeoPoint, FALLBACK_CENTRE};

use crate::{
    error::{Result, TrackerError},
    gps::{coordinate::MalformedCoordinate, to_decimal_degrees, Fix},
};
use chrono::{Duration, NaiveTime};
use log::debug;

/// A fix with its position in signed decimal degrees
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    pub fix: Fix,
    pub latitude: f64,
    pub longitude: f64,
}

impl TrackPoint {
    /// Convert the fix coordinates. Values outside the valid lat/lon range are rejected.
    pub fn from_fix(fix: Fix) -> Result<Self> {
        let latitude = convert(&fix, &fix.latitude, &fix.lat_hemisphere, "latitude", 90.0)?;
        let longitude = convert(&fix, &fix.longitude, &fix.lon_hemisphere, "longitude", 180.0)?;
        Ok(Self {
            fix,
            latitude,
            longitude,
        })
    }

    pub fn hdop(&self) -> Option<f64> {
        self.fix.hdop_value()
    }
}

fn convert(fix: &Fix, raw: &str, hemisphere: &str, field: &'static str, limit: f64) -> Result<f64> {
    let degrees = to_decimal_degrees(raw, hemisphere).map_err(|source| {
        TrackerError::MalformedCoordinate {
            line: fix.line,
            field,
            source,
        }
    })?;

    if degrees.abs() > limit {
        return Err(TrackerError::MalformedCoordinate {
            line: fix.line,
            field,
            source: MalformedCoordinate::out_of_range(raw, hemisphere, degrees),
        });
    }
    Ok(degrees)
}

/// Chronologically ordered track points. Order defines the drawn line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    points: Vec<TrackPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HdopStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Points whose HDOP is above the threshold or unreadable
    pub above_threshold: usize,
    pub unreadable: usize,
}

impl Track {
    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrackPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last fix times, when both are known
    pub fn time_span(&self) -> Option<(NaiveTime, NaiveTime)> {
        let start = self.points.iter().find_map(|p| p.fix.time)?;
        let end = self.points.iter().rev().find_map(|p| p.fix.time)?;
        Some((start, end))
    }

    /// Elapsed time between first and last fix. A log crossing midnight wraps around.
    pub fn duration(&self) -> Option<Duration> {
        let (start, end) = self.time_span()?;
        let elapsed = end.signed_duration_since(start);
        if elapsed < Duration::zero() {
            Some(elapsed + Duration::days(1))
        } else {
            Some(elapsed)
        }
    }

    pub fn hdop_stats(&self, threshold: f64) -> Option<HdopStats> {
        let values: Vec<f64> = self.points.iter().filter_map(TrackPoint::hdop).collect();
        let unreadable = self.points.len() - values.len();
        if values.is_empty() {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let above = values.iter().filter(|&&v| v > threshold).count();

        Some(HdopStats {
            min,
            max,
            mean,
            above_threshold: above + unreadable,
            unreadable,
        })
    }
}

impl<'a> IntoIterator for &'a Track {
    type Item = &'a TrackPoint;
    type IntoIter = std::slice::Iter<'a, TrackPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl FromIterator<TrackPoint> for Track {
    fn from_iter<I: IntoIterator<Item = TrackPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Derive decimal coordinates for every fix, keeping order.
///
/// The first malformed coordinate aborts the whole build: a track with
/// silently missing points would misrepresent the flight.
pub fn build_track(fixes: Vec<Fix>) -> Result<Track> {
    let track: Track = fixes
        .into_iter()
        .map(TrackPoint::from_fix)
        .collect::<Result<_>>()?;

    debug!("built track of {} points", track.len());
    Ok(track)
}
