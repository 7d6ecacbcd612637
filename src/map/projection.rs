// src/map/projection.rs
//! Web-Mercator projection in world pixels

use crate::track::BoundingCenter;
use std::f64::consts::PI;

pub const TILE_SIZE: f64 = 256.0;
pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 18.0;
/// Zoom used when there is no extent to fit
pub const DEFAULT_ZOOM: f64 = 8.0;

const MAX_LATITUDE: f64 = 85.051_128_78;

fn world_size(zoom: f64) -> f64 {
    2_f64.powf(zoom) * TILE_SIZE
}

/// Lat/lon to world pixel coordinates at a (possibly fractional) zoom level
pub fn lat_lon_to_world(lat: f64, lon: f64, zoom: f64) -> (f64, f64) {
    let n = world_size(zoom);
    let x = (lon + 180.0) / 360.0 * n;
    let lat_rad = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n;
    (x, y)
}

pub fn world_to_lat_lon(x: f64, y: f64, zoom: f64) -> (f64, f64) {
    let n = world_size(zoom);
    let lon = x / n * 360.0 - 180.0;
    let lat_rad = ((1.0 - 2.0 * y / n) * PI).sinh().atan();
    (lat_rad.to_degrees(), lon)
}

/// Largest zoom at which the box, grown by `padding` of its span on each
/// side, fits in a `width` x `height` pixel area.
pub fn fit_zoom(bounds: &BoundingCenter, width: f64, height: f64, padding: f64) -> f64 {
    let lat_pad = bounds.lat_span() * padding;
    let lon_pad = bounds.lon_span() * padding;

    let (x0, y0) = lat_lon_to_world(bounds.max_lat + lat_pad, bounds.min_lon - lon_pad, 0.0);
    let (x1, y1) = lat_lon_to_world(bounds.min_lat - lat_pad, bounds.max_lon + lon_pad, 0.0);
    let (box_w, box_h) = ((x1 - x0).abs(), (y1 - y0).abs());

    let scale = match (box_w > f64::EPSILON, box_h > f64::EPSILON) {
        (true, true) => (width / box_w).min(height / box_h),
        (true, false) => width / box_w,
        (false, true) => height / box_h,
        (false, false) => return DEFAULT_ZOOM,
    };

    scale.log2().clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Visible map area: a centre and a zoom level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: f64,
}

impl Viewport {
    pub fn new(center_lat: f64, center_lon: f64, zoom: f64) -> Self {
        Self {
            center_lat,
            center_lon,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    /// Viewport centred on the box centre, zoomed to show all of it
    pub fn framing(bounds: &BoundingCenter, width: f64, height: f64, padding: f64) -> Self {
        Self::new(
            bounds.center_lat,
            bounds.center_lon,
            fit_zoom(bounds, width, height, padding),
        )
    }

    /// Screen position relative to the top-left corner of a `width` x `height` area
    pub fn to_screen(&self, lat: f64, lon: f64, width: f64, height: f64) -> (f64, f64) {
        let (x, y) = lat_lon_to_world(lat, lon, self.zoom);
        let (cx, cy) = lat_lon_to_world(self.center_lat, self.center_lon, self.zoom);
        (width / 2.0 + x - cx, height / 2.0 + y - cy)
    }

    pub fn from_screen(&self, sx: f64, sy: f64, width: f64, height: f64) -> (f64, f64) {
        let (cx, cy) = lat_lon_to_world(self.center_lat, self.center_lon, self.zoom);
        world_to_lat_lon(cx + sx - width / 2.0, cy + sy - height / 2.0, self.zoom)
    }

    /// Move the map by a screen drag of `dx`, `dy` pixels
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let (cx, cy) = lat_lon_to_world(self.center_lat, self.center_lon, self.zoom);
        let (lat, lon) = world_to_lat_lon(cx - dx, cy - dy, self.zoom);

        self.center_lat = lat.clamp(-85.0, 85.0);
        self.center_lon = (lon + 180.0).rem_euclid(360.0) - 180.0;
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }
}
