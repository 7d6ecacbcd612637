use hdop_tracker::{
    display::{plan_segments, style::{MapStyle, Rgb}, TrackRenderer},
    gps::GroupTerminator,
    BoundingCenter, HdopTracker, Track, TrackerConfig, TrackerError,
};
use std::path::PathBuf;

/// Keeps the colour of every segment it is asked to draw
#[derive(Default)]
struct RecordingRenderer {
    calls: usize,
    colours: Vec<Rgb>,
    centre: Option<(f64, f64)>,
}

impl TrackRenderer for RecordingRenderer {
    fn render(&mut self, track: &Track, bounds: &BoundingCenter, style: &MapStyle) -> hdop_tracker::Result<()> {
        self.calls += 1;
        self.centre = Some((bounds.center_lat, bounds.center_lon));
        self.colours = plan_segments(track, style.hdop_threshold)
            .iter()
            .map(|s| style.colour_for(s.quality))
            .collect();
        Ok(())
    }
}

fn render(log: &str) -> RecordingRenderer {
    let tracker = HdopTracker::default();
    let flight = tracker.process_lines(log.lines()).unwrap();
    let mut renderer = RecordingRenderer::default();
    tracker.render(&flight, &mut renderer).unwrap();
    renderer
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data").join(name)
}

#[test]
fn test_good_first_point_gives_good_segment() {
    let renderer = render(
        "$GPGGA,100000,5100.0,N,00100.0,W,1,08,1.0,100,M,,M,,\n\
         $GPGGA,100001,5101.0,N,00101.0,W,1,08,3.0,100,M,,M,,\n",
    );
    assert_eq!(renderer.calls, 1);
    assert_eq!(renderer.colours, vec![Rgb(0x00, 0xFF, 0x00)]);
}

#[test]
fn test_bad_first_point_gives_bad_segment() {
    let renderer = render(
        "$GPGGA,100000,5100.0,N,00100.0,W,1,08,3.0,100,M,,M,,\n\
         $GPGGA,100001,5101.0,N,00101.0,W,1,08,1.0,100,M,,M,,\n",
    );
    assert_eq!(renderer.colours, vec![Rgb(0xFF, 0x00, 0x00)]);
}

#[test]
fn test_empty_log_renders_fallback_centre() {
    let renderer = render("");
    assert_eq!(renderer.calls, 1);
    assert!(renderer.colours.is_empty());
    assert_eq!(renderer.centre, Some((54.5, -4.0)));
}

#[test]
fn test_fixture_log() {
    let flight = HdopTracker::default().load_file(&fixture("flight.txt")).unwrap();

    // the first epoch has no fix, the last one is never closed
    assert_eq!(flight.track.len(), 3);
    assert_eq!(flight.source, Some(fixture("flight.txt")));

    let first = &flight.track.points()[0];
    assert!((first.latitude - 51.441666).abs() < 1e-6);
    assert!((first.longitude - -1.441666).abs() < 1e-6);

    let mut renderer = RecordingRenderer::default();
    HdopTracker::default().render(&flight, &mut renderer).unwrap();
    assert_eq!(renderer.colours, vec![Rgb(0x00, 0xFF, 0x00), Rgb(0xFF, 0x00, 0x00)]);
}

#[test]
fn test_gga_terminator_on_fixture() {
    let mut config = TrackerConfig::default();
    config.update_terminator(GroupTerminator::Gga);
    let flight = HdopTracker::new(config).load_file(&fixture("flight.txt")).unwrap();
    assert_eq!(flight.track.len(), 3);
}

#[test]
fn test_custom_threshold() {
    let mut config = TrackerConfig::default();
    config.update_threshold(3.0).unwrap();
    let tracker = HdopTracker::new(config);
    let flight = tracker.load_file(&fixture("flight.txt")).unwrap();

    let mut renderer = RecordingRenderer::default();
    tracker.render(&flight, &mut renderer).unwrap();
    assert_eq!(renderer.colours, vec![Rgb(0x00, 0xFF, 0x00); 2]);
}

#[test]
fn test_malformed_coordinate_names_line() {
    let tracker = HdopTracker::default();
    let result = tracker.process_lines(
        "$GPGGA,100000,5100.0,N,00100.0,W,1,08,1.0,100,M,,M,,\n\
         $GPRMC,100001,A,5100.0,N,00100.0,W,1,1,240622,,*00\n\
         $GPGGA,100001,5100.0,N,1.0,W,1,08,1.0,100,M,,M,,\n"
            .lines(),
    );

    match result {
        Err(err @ TrackerError::MalformedCoordinate { .. }) => {
            let message = err.to_string();
            assert!(message.contains("line 3"), "{}", message);
            assert!(message.contains("longitude"), "{}", message);
        }
        other => panic!("expected malformed coordinate, got {:?}", other.map(|f| f.track.len())),
    }
}
