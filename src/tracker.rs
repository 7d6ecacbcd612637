// src/tracker.rs
//! Pipeline from a GPS log to a finished, framed track

use crate::{
    config::TrackerConfig,
    display::TrackRenderer,
    error::{Result, TrackerError},
    export::TrackExporter,
    gps::{filter_fixes, read_log},
    track::{build_track, compute_bounds_or, BoundingCenter, Track},
};
use log::{info, warn};
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// A track ready for rendering
#[derive(Debug, Clone)]
pub struct FlightTrack {
    pub source: Option<PathBuf>,
    pub track: Track,
    pub bounds: BoundingCenter,
}

pub struct HdopTracker {
    config: TrackerConfig,
}

impl HdopTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self { config }
    }

    /// Read the whole log in one go and run the pipeline on it
    pub fn load_file(&self, path: &Path) -> Result<FlightTrack> {
        info!("reading GPS log {}", path.display());

        let bytes = std::fs::read(path).map_err(|source| TrackerError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);

        let mut flight = self.process_lines(text.lines())?;
        flight.source = Some(path.to_path_buf());
        Ok(flight)
    }

    pub fn load_reader<R: BufRead>(&self, reader: R) -> Result<FlightTrack> {
        let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
        self.process_lines(lines)
    }

    /// read -> filter -> build -> bounds
    pub fn process_lines<I, S>(&self, lines: I) -> Result<FlightTrack>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let groups = read_log(lines, self.config.terminator);
        let fixes = filter_fixes(&groups);
        let track = build_track(fixes)?;

        if track.is_empty() {
            warn!("no valid position fixes in log");
        } else {
            info!("{} fixes in track", track.len());
        }

        let bounds = compute_bounds_or(&track, self.config.fallback_centre);
        Ok(FlightTrack {
            source: None,
            track,
            bounds,
        })
    }

    pub fn render(&self, flight: &FlightTrack, renderer: &mut dyn TrackRenderer) -> Result<()> {
        renderer.render(&flight.track, &flight.bounds, &self.config.map_style())
    }

    /// Write the track through an exporter. An empty track has nothing to
    /// export and is skipped; returns whether a file was written.
    pub fn export(&self, flight: &FlightTrack, exporter: &mut TrackExporter) -> Result<bool> {
        if flight.track.is_empty() {
            warn!("no track points, skipping export");
            return Ok(false);
        }
        self.render(flight, exporter)?;
        Ok(true)
    }
}

impl Default for HdopTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportFormat;
    use crate::gps::GroupTerminator;
    use crate::track::GeoPoint;
    use std::io::Cursor;

    const LOG: &str = "\
$GPRMC,100000,A,5100.0,N,00100.0,W,100.0,270.0,240622,,*00
$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39
$GPGGA,100000,5100.0,N,00100.0,W,1,08,1.0,100,M,,M,,*00
$GPGST,100000,0.006,0.023,0.020,273.6,0.023,0.020,0.031*6A
$GPRMC,100001,A,5130.0,N,00130.0,W,100.0,270.0,240622,,*00
$GPGGA,100001,5130.0,N,00130.0,W,0,00,99.0,,M,,M,,*00
$GPGST,100001,0.006,0.023,0.020,273.6,0.023,0.020,0.031*6A
$GPGGA,100002,5200.0,N,00200.0,W,2,10,0.8,100,M,,M,,*00
$GPRMC,100003,A,5230.0,N,00230.0,W,100.0,270.0,240622,,*00
";

    #[test]
    fn test_process_log() {
        let flight = HdopTracker::default()
            .load_reader(Cursor::new(LOG))
            .unwrap();

        assert_eq!(flight.track.len(), 2);
        assert_eq!(flight.bounds.min_lat, 51.0);
        assert_eq!(flight.bounds.max_lat, 52.0);
        assert_eq!(flight.bounds.center_lon, -1.5);
        assert!(flight.source.is_none());
    }

    #[test]
    fn test_terminator_choice_keeps_same_fixes() {
        for terminator in [GroupTerminator::Either, GroupTerminator::Gga, GroupTerminator::Gst] {
            let mut config = TrackerConfig::default();
            config.update_terminator(terminator);
            let flight = HdopTracker::new(config).process_lines(LOG.lines()).unwrap();
            // with GST only, the final GGA has no closing GST and is dropped
            let expected = if terminator == GroupTerminator::Gst { 1 } else { 2 };
            assert_eq!(flight.track.len(), expected, "terminator {}", terminator);
        }
    }

    #[test]
    fn test_empty_log_uses_configured_centre() {
        let mut config = TrackerConfig::default();
        config.fallback_centre = GeoPoint::new(42.4, -71.1);
        let flight = HdopTracker::new(config).process_lines(Vec::<String>::new()).unwrap();

        assert!(flight.track.is_empty());
        assert_eq!(flight.bounds.center_lat, 42.4);
    }

    #[test]
    fn test_export_skips_empty_track() {
        let path = std::env::temp_dir().join(format!("hdop-tracker-empty-{}.csv", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let tracker = HdopTracker::default();
        let flight = tracker.process_lines(Vec::<String>::new()).unwrap();

        let mut exporter = TrackExporter::new(path.clone(), ExportFormat::Csv);
        assert!(!tracker.export(&flight, &mut exporter).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_export_writes_file() {
        let path = std::env::temp_dir().join(format!("hdop-tracker-export-{}.csv", std::process::id()));
        let tracker = HdopTracker::default();
        let flight = tracker.load_reader(Cursor::new(LOG)).unwrap();

        let mut exporter = TrackExporter::new(path.clone(), ExportFormat::Csv);
        assert!(tracker.export(&flight, &mut exporter).unwrap());
        let csv = std::fs::read_to_string(&path).unwrap();
        assert_eq!(csv.lines().count(), 3);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let result = HdopTracker::default().load_file(Path::new("/no/such/log.txt"));
        assert!(matches!(result, Err(TrackerError::FileAccess { .. })));
    }

    #[test]
    fn test_malformed_log_aborts() {
        let log = "$GPGGA,100000,5100.0,N,00100.0,W,1,08,1.0,100,M,,M,,\n\
                   $GPGGA,100001,51,N,00100.0,W,1,08,1.0,100,M,,M,,\n";
        let result = HdopTracker::default().process_lines(log.lines());
        assert!(matches!(
            result,
            Err(TrackerError::MalformedCoordinate { line: 2, .. })
        ));
    }
}
