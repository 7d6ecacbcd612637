// src/error.rs
//! Error types for the HDOP tracker

use crate::gps::coordinate::MalformedCoordinate;
use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Debug)]
pub enum TrackerError {
    /// The log file could not be opened or read. Raised before any parsing.
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A retained fix carries a coordinate that cannot be converted.
    MalformedCoordinate {
        line: usize,
        field: &'static str,
        source: MalformedCoordinate,
    },
    Io(std::io::Error),
    Json(serde_json::Error),
    Config(String),
    #[cfg(all(unix, not(target_os = "macos"), feature = "gui"))]
    Gui(String),
    Other(String),
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::FileAccess { path, source } => {
                write!(f, "Cannot read log file {}: {}", path.display(), source)
            }
            TrackerError::MalformedCoordinate { line, field, source } => {
                write!(f, "Malformed {} on line {}: {}", field, line, source)
            }
            TrackerError::Io(e) => write!(f, "IO error: {}", e),
            TrackerError::Json(e) => write!(f, "JSON error: {}", e),
            TrackerError::Config(msg) => write!(f, "Configuration error: {}", msg),
            #[cfg(all(unix, not(target_os = "macos"), feature = "gui"))]
            TrackerError::Gui(e) => write!(f, "GUI error: {}", e),
            TrackerError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for TrackerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrackerError::FileAccess { source, .. } => Some(source),
            TrackerError::MalformedCoordinate { source, .. } => Some(source),
            TrackerError::Io(e) => Some(e),
            TrackerError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(error: std::io::Error) -> Self {
        TrackerError::Io(error)
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(error: serde_json::Error) -> Self {
        TrackerError::Json(error)
    }
}

#[cfg(all(unix, not(target_os = "macos"), feature = "gui"))]
impl From<eframe::Error> for TrackerError {
    fn from(error: eframe::Error) -> Self {
        TrackerError::Gui(error.to_string())
    }
}
