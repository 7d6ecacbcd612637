// src/track/bounds.rs
//! Bounding box and map centre of a track

use super::Track;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Map centre used when there is nothing to frame (UK)
pub const FALLBACK_CENTRE: GeoPoint = GeoPoint::new(54.5, -4.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCenter {
    pub center_lat: f64,
    pub center_lon: f64,
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundingCenter {
    /// Degenerate box sitting on a single point
    pub fn at(point: GeoPoint) -> Self {
        Self {
            center_lat: point.lat,
            center_lon: point.lon,
            min_lon: point.lon,
            max_lon: point.lon,
            min_lat: point.lat,
            max_lat: point.lat,
        }
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.center_lat, self.center_lon)
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }
}

pub fn compute_bounds(track: &Track) -> BoundingCenter {
    compute_bounds_or(track, FALLBACK_CENTRE)
}

/// Single scan for lat/lon extrema. The centre is the midpoint of the box,
/// not the centroid of the points. An empty track yields `fallback`.
pub fn compute_bounds_or(track: &Track, fallback: GeoPoint) -> BoundingCenter {
    if track.is_empty() {
        debug!("empty track, centring on {:.3}, {:.3}", fallback.lat, fallback.lon);
        return BoundingCenter::at(fallback);
    }

    let mut min_lat = 90.0_f64;
    let mut max_lat = -90.0_f64;
    let mut min_lon = 180.0_f64;
    let mut max_lon = -180.0_f64;

    for point in track {
        min_lat = min_lat.min(point.latitude);
        max_lat = max_lat.max(point.latitude);
        min_lon = min_lon.min(point.longitude);
        max_lon = max_lon.max(point.longitude);
    }

    let bounds = BoundingCenter {
        center_lat: (max_lat + min_lat) / 2.0,
        center_lon: (max_lon + min_lon) / 2.0,
        min_lon,
        max_lon,
        min_lat,
        max_lat,
    };
    debug!("track bounds: {:?}", bounds);
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gps::{Fix, FixQuality};
    use crate::track::TrackPoint;

    fn point(lat: f64, lon: f64) -> TrackPoint {
        TrackPoint {
            fix: Fix {
                line: 1,
                time: None,
                latitude: String::new(),
                lat_hemisphere: "N".to_string(),
                longitude: String::new(),
                lon_hemisphere: "W".to_string(),
                quality: FixQuality(1),
                satellites: None,
                hdop: "1.0".to_string(),
                altitude: None,
            },
            latitude: lat,
            longitude: lon,
        }
    }

    #[test]
    fn test_three_point_bounds() {
        let track: Track = vec![point(51.0, -1.0), point(53.1, -3.5), point(57.6, 0.5)]
            .into_iter()
            .collect();
        let bounds = compute_bounds(&track);

        assert_eq!(bounds.min_lat, 51.0);
        assert_eq!(bounds.max_lat, 57.6);
        assert!((bounds.center_lat - 54.3).abs() < 1e-9);
        assert_eq!(bounds.min_lon, -3.5);
        assert_eq!(bounds.max_lon, 0.5);
        assert!((bounds.center_lon - -1.5).abs() < 1e-9);
    }

    #[test]
    fn test_midpoint_not_centroid() {
        let track: Track = vec![point(50.0, 0.0), point(50.0, 0.0), point(50.0, 0.0), point(60.0, 0.0)]
            .into_iter()
            .collect();
        let bounds = compute_bounds(&track);
        assert_eq!(bounds.center_lat, 55.0);
    }

    #[test]
    fn test_empty_track_fallback() {
        let bounds = compute_bounds(&Track::default());
        assert_eq!(bounds.center(), FALLBACK_CENTRE);
        assert_eq!(bounds.lat_span(), 0.0);

        let custom = compute_bounds_or(&Track::default(), GeoPoint::new(42.4, -71.1));
        assert_eq!(custom.center_lat, 42.4);
        assert_eq!(custom.center_lon, -71.1);
    }

    #[test]
    fn test_single_point() {
        let track: Track = vec![point(-33.9, 151.2)].into_iter().collect();
        let bounds = compute_bounds(&track);
        assert_eq!(bounds.center(), GeoPoint::new(-33.9, 151.2));
        assert_eq!(bounds.lon_span(), 0.0);
    }
}
