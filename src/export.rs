// src/export.rs
//! Export of the HDOP-coloured track to GPX, GeoJSON, KML and CSV files

use crate::{
    display::{plan_runs, plan_segments, style::MapStyle, HdopQuality, TrackRenderer},
    error::{Result, TrackerError},
    track::{BoundingCenter, Track, TrackPoint},
};
use log::info;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Gpx,
    GeoJson,
    Kml,
    Csv,
}

impl ExportFormat {
    pub fn display_name(&self) -> &str {
        match self {
            ExportFormat::Gpx => "GPX (GPS Exchange)",
            ExportFormat::GeoJson => "GeoJSON",
            ExportFormat::Kml => "KML (Keyhole)",
            ExportFormat::Csv => "CSV",
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gpx" => Ok(ExportFormat::Gpx),
            "geojson" | "json" => Ok(ExportFormat::GeoJson),
            "kml" => Ok(ExportFormat::Kml),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("unknown export format '{}'", other)),
        }
    }
}

/// Writes the track to a file when rendered
pub struct TrackExporter {
    path: PathBuf,
    format: ExportFormat,
}

impl TrackExporter {
    pub fn new(path: PathBuf, format: ExportFormat) -> Self {
        Self { path, format }
    }

    /// Format taken from the file extension
    pub fn for_path(path: PathBuf) -> Result<Self> {
        let format = ExportFormat::from_path(&path).ok_or_else(|| {
            TrackerError::Other(format!(
                "Cannot tell export format from {} (use .gpx, .geojson, .kml or .csv)",
                path.display()
            ))
        })?;
        Ok(Self::new(path, format))
    }

    pub fn export_to_file(&self, track: &Track, bounds: &BoundingCenter, style: &MapStyle) -> Result<()> {
        let content = self.render_to_string(track, bounds, style)?;

        let mut file = File::create(&self.path)?;
        file.write_all(content.as_bytes())?;

        info!(
            "exported {} points as {} to {}",
            track.len(),
            self.format.display_name(),
            self.path.display()
        );
        Ok(())
    }

    pub fn render_to_string(&self, track: &Track, bounds: &BoundingCenter, style: &MapStyle) -> Result<String> {
        if track.is_empty() {
            return Err(TrackerError::Other("No track points to export".to_string()));
        }

        Ok(match self.format {
            ExportFormat::Gpx => Self::to_gpx(track, style),
            ExportFormat::GeoJson => Self::to_geojson(track, bounds, style)?,
            ExportFormat::Kml => Self::to_kml(track, style),
            ExportFormat::Csv => Self::to_csv(track, style),
        })
    }

    fn to_gpx(track: &Track, style: &MapStyle) -> String {
        let mut gpx = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="HDOP Tracker" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
"#);
        gpx.push_str(&format!("    <name>{}</name>\n", Self::escape_xml(&style.title)));
        gpx.push_str("    <trkseg>\n");

        for point in track {
            gpx.push_str(&format!(
                "      <trkpt lat=\"{}\" lon=\"{}\">\n",
                point.latitude, point.longitude
            ));
            if let Some(ele) = point.fix.altitude {
                gpx.push_str(&format!("        <ele>{}</ele>\n", ele));
            }
            if let Some(time) = point.fix.time {
                // GGA carries no date
                gpx.push_str(&format!(
                    "        <desc>UTC {}</desc>\n",
                    time.format("%H:%M:%S%.3f")
                ));
            }
            if let Some(sat) = point.fix.satellites {
                gpx.push_str(&format!("        <sat>{}</sat>\n", sat));
            }
            if let Some(hdop) = point.hdop() {
                gpx.push_str(&format!("        <hdop>{}</hdop>\n", hdop));
            }
            gpx.push_str("      </trkpt>\n");
        }

        gpx.push_str("    </trkseg>\n  </trk>\n</gpx>\n");
        gpx
    }

    fn to_geojson(track: &Track, bounds: &BoundingCenter, style: &MapStyle) -> Result<String> {
        let segments = plan_segments(track, style.hdop_threshold);

        let mut features: Vec<serde_json::Value> = plan_runs(&segments)
            .iter()
            .map(|run| {
                let coordinates: Vec<[f64; 2]> = run
                    .points(track)
                    .iter()
                    .map(|p| [p.longitude, p.latitude])
                    .collect();
                serde_json::json!({
                    "type": "Feature",
                    "geometry": {
                        "type": "LineString",
                        "coordinates": coordinates
                    },
                    "properties": {
                        "quality": run.quality.label(),
                        "stroke": style.colour_for(run.quality).to_string(),
                        "first_fix": run.start,
                        "last_fix": run.end
                    }
                })
            })
            .collect();

        features.push(serde_json::json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [bounds.center_lon, bounds.center_lat]
            },
            "properties": {
                "name": "centre",
                "marker-color": style.centre_colour.to_string()
            }
        }));

        let feature_collection = serde_json::json!({
            "type": "FeatureCollection",
            "bbox": [bounds.min_lon, bounds.min_lat, bounds.max_lon, bounds.max_lat],
            "features": features
        });

        Ok(serde_json::to_string_pretty(&feature_collection)?)
    }

    fn to_kml(track: &Track, style: &MapStyle) -> String {
        let mut kml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
"#);
        kml.push_str(&format!("    <name>{}</name>\n", Self::escape_xml(&style.heading())));

        for quality in [HdopQuality::Good, HdopQuality::Bad] {
            kml.push_str(&format!(
                "    <Style id=\"{}\"><LineStyle><color>{}</color><width>3</width></LineStyle></Style>\n",
                quality.label(),
                style.colour_for(quality).to_kml()
            ));
        }

        let segments = plan_segments(track, style.hdop_threshold);
        for run in plan_runs(&segments) {
            kml.push_str("    <Placemark>\n");
            kml.push_str(&format!(
                "      <name>Fixes {}-{} ({} HDOP)</name>\n",
                run.start + 1,
                run.end + 1,
                run.quality.label()
            ));
            kml.push_str(&format!("      <styleUrl>#{}</styleUrl>\n", run.quality.label()));
            kml.push_str("      <LineString>\n        <coordinates>\n");
            for point in run.points(track) {
                kml.push_str(&format!(
                    "          {},{},{}\n",
                    point.longitude,
                    point.latitude,
                    point.fix.altitude.unwrap_or(0.0)
                ));
            }
            kml.push_str("        </coordinates>\n      </LineString>\n");
            kml.push_str("    </Placemark>\n");
        }

        kml.push_str("  </Document>\n</kml>\n");
        kml
    }

    fn to_csv(track: &Track, style: &MapStyle) -> String {
        let mut csv = String::from("index,line,time,latitude,longitude,quality,satellites,hdop,altitude,segment\n");

        for (index, point) in track.iter().enumerate() {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{}\n",
                index,
                point.fix.line,
                point.fix.time.map_or(String::new(), |t| t.format("%H:%M:%S%.3f").to_string()),
                point.latitude,
                point.longitude,
                point.fix.quality.0,
                point.fix.satellites.map_or(String::new(), |s| s.to_string()),
                Self::escape_csv(&point.fix.hdop),
                point.fix.altitude.map_or(String::new(), |a| a.to_string()),
                Self::segment_label(track, index, style)
            ));
        }

        csv
    }

    /// Quality of the segment leaving this point; the last point has none
    fn segment_label(track: &Track, index: usize, style: &MapStyle) -> &'static str {
        if index + 1 >= track.len() {
            return "";
        }
        let point: &TrackPoint = &track.points()[index];
        crate::display::classify(point.hdop(), style.hdop_threshold).label()
    }

    fn escape_xml(s: &str) -> String {
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;")
    }

    fn escape_csv(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

impl TrackRenderer for TrackExporter {
    fn render(&mut self, track: &Track, bounds: &BoundingCenter, style: &MapStyle) -> Result<()> {
        self.export_to_file(track, bounds, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gps::{filter_fixes, read_log, GroupTerminator};
    use crate::track::{build_track, compute_bounds};

    fn sample_track() -> Track {
        let lines = [
            "$GPGGA,100000,5100.0,N,00100.0,W,1,08,1.0,120.5,M,,M,,",
            "$GPGGA,100010,5130.0,N,00130.0,W,1,07,3.0,130.0,M,,M,,",
            "$GPGGA,100020,5200.0,N,00200.0,W,1,09,1.0,140.0,M,,M,,",
        ];
        build_track(filter_fixes(&read_log(lines, GroupTerminator::Gga))).unwrap()
    }

    fn export(format: ExportFormat) -> String {
        let track = sample_track();
        let bounds = compute_bounds(&track);
        TrackExporter::new(PathBuf::from("unused"), format)
            .render_to_string(&track, &bounds, &MapStyle::default())
            .unwrap()
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("flight.GPX")), Some(ExportFormat::Gpx));
        assert_eq!(ExportFormat::from_path(Path::new("flight.geojson")), Some(ExportFormat::GeoJson));
        assert_eq!(ExportFormat::from_path(Path::new("flight")), None);
        assert!(TrackExporter::for_path(PathBuf::from("flight.png")).is_err());
    }

    #[test]
    fn test_gpx_export() {
        let gpx = export(ExportFormat::Gpx);
        assert!(gpx.contains("<gpx"));
        assert!(gpx.contains("lat=\"51\""));
        assert!(gpx.contains("<hdop>3</hdop>"));
        assert!(gpx.contains("<sat>7</sat>"));
        assert!(gpx.contains("<ele>120.5</ele>"));
        assert!(gpx.contains("<desc>UTC 10:00:10.000</desc>"));
        assert!(!gpx.contains("<time>"));
    }

    #[test]
    fn test_geojson_export() {
        let json: serde_json::Value = serde_json::from_str(&export(ExportFormat::GeoJson)).unwrap();
        let features = json["features"].as_array().unwrap();

        // good run, bad run, centre
        assert_eq!(features.len(), 3);
        assert_eq!(features[0]["properties"]["quality"], "good");
        assert_eq!(features[0]["properties"]["stroke"], "#00FF00");
        assert_eq!(features[1]["properties"]["quality"], "bad");
        assert_eq!(features[1]["properties"]["stroke"], "#FF0000");
        assert_eq!(features[2]["geometry"]["type"], "Point");
    }

    #[test]
    fn test_kml_export() {
        let kml = export(ExportFormat::Kml);
        assert!(kml.contains("<kml"));
        assert!(kml.contains("<color>ff0000ff</color>"));
        assert_eq!(kml.matches("<Placemark>").count(), 2);
    }

    #[test]
    fn test_csv_export() {
        let csv = export(ExportFormat::Csv);
        let rows: Vec<&str> = csv.lines().collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[0].starts_with("index,line,time"));
        assert!(rows[1].ends_with(",good"));
        assert!(rows[2].ends_with(",bad"));
        assert!(rows[3].ends_with(','));
    }

    #[test]
    fn test_empty_track_not_exported() {
        let track = Track::default();
        let bounds = compute_bounds(&track);
        let result = TrackExporter::new(PathBuf::from("unused"), ExportFormat::Csv)
            .render_to_string(&track, &bounds, &MapStyle::default());
        assert!(result.is_err());
    }
}
