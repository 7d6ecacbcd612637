// src/lib.rs
//! HDOP Tracker Library
//!
//! Reads NMEA GPS logs, extracts the GPGGA position fixes and prepares an
//! aircraft track for display, coloured by horizontal dilution of precision.

pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod gps;
pub mod map;
pub mod picker;
pub mod track;
pub mod tracker;

// Re-export main types for convenience
pub use config::TrackerConfig;
pub use display::{style::MapStyle, TrackRenderer};
pub use error::{Result, TrackerError};
pub use track::{compute_bounds, BoundingCenter, Track, TrackPoint};
pub use tracker::{FlightTrack, HdopTracker};

#[cfg(all(unix, not(target_os = "macos"), feature = "gui"))]
pub use display::gui::GuiRenderer;
