// src/display/mod.rs
//! Rendering of a finished track: segment colouring and renderers

pub mod style;
pub mod terminal;

#[cfg(all(unix, not(target_os = "macos"), feature = "gui"))]
pub mod gui;

use crate::{
    error::Result,
    track::{BoundingCenter, Track, TrackPoint},
};
use style::MapStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HdopQuality {
    Good,
    Bad,
}

impl HdopQuality {
    pub fn label(&self) -> &'static str {
        match self {
            HdopQuality::Good => "good",
            HdopQuality::Bad => "bad",
        }
    }
}

/// Bad when the HDOP is above the threshold or could not be read
pub fn classify(hdop: Option<f64>, threshold: f64) -> HdopQuality {
    match hdop {
        Some(value) if value <= threshold => HdopQuality::Good,
        _ => HdopQuality::Bad,
    }
}

/// Line from point `index` to point `index + 1`, coloured by the first point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a> {
    pub index: usize,
    pub from: &'a TrackPoint,
    pub to: &'a TrackPoint,
    pub quality: HdopQuality,
}

pub fn plan_segments(track: &Track, threshold: f64) -> Vec<Segment<'_>> {
    track
        .points()
        .windows(2)
        .enumerate()
        .map(|(index, pair)| Segment {
            index,
            from: &pair[0],
            to: &pair[1],
            quality: classify(pair[0].hdop(), threshold),
        })
        .collect()
}

/// Consecutive segments of equal quality, as point indices `start..=end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRun {
    pub quality: HdopQuality,
    pub start: usize,
    pub end: usize,
}

impl SegmentRun {
    pub fn points<'a>(&self, track: &'a Track) -> &'a [TrackPoint] {
        &track.points()[self.start..=self.end]
    }

    pub fn segment_count(&self) -> usize {
        self.end - self.start
    }
}

pub fn plan_runs(segments: &[Segment<'_>]) -> Vec<SegmentRun> {
    let mut runs: Vec<SegmentRun> = Vec::new();
    for segment in segments {
        match runs.last_mut() {
            Some(run) if run.quality == segment.quality && run.end == segment.index => {
                run.end = segment.index + 1;
            }
            _ => runs.push(SegmentRun {
                quality: segment.quality,
                start: segment.index,
                end: segment.index + 1,
            }),
        }
    }
    runs
}

/// Something that presents a finished track.
///
/// Called once per track, after the whole pipeline has completed.
pub trait TrackRenderer {
    fn render(&mut self, track: &Track, bounds: &BoundingCenter, style: &MapStyle) -> Result<()>;
}

/// Check if GUI should be used based on environment
#[cfg(all(unix, not(target_os = "macos"), feature = "gui"))]
pub fn should_use_gui() -> bool {
    std::env::var("DISPLAY").is_ok() || std::env::var("WAYLAND_DISPLAY").is_ok()
}

#[cfg(not(all(unix, not(target_os = "macos"), feature = "gui")))]
pub fn should_use_gui() -> bool {
    false
}
