// src/config.rs
//! Configuration management, stored as JSON in the user's config directory

use crate::{
    display::style::{MapStyle, Rgb},
    error::{Result, TrackerError},
    gps::GroupTerminator,
    track::{GeoPoint, FALLBACK_CENTRE},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub hdop_threshold: f64,
    pub good_colour: Rgb,
    pub bad_colour: Rgb,
    pub water_colour: Rgb,
    pub centre_colour: Rgb,
    /// Graticule spacing in degrees
    pub grid_separation: f64,
    pub fallback_centre: GeoPoint,
    pub terminator: GroupTerminator,
    pub window_size: [f32; 2],
    pub title: String,
    pub track_padding: f64,
    pub last_directory: Option<PathBuf>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            hdop_threshold: 2.0,
            good_colour: Rgb(0x00, 0xFF, 0x00),
            bad_colour: Rgb(0xFF, 0x00, 0x00),
            water_colour: Rgb(0x18, 0x1F, 0x69),
            centre_colour: Rgb(0x11, 0x11, 0x11),
            grid_separation: 1.0,
            fallback_centre: FALLBACK_CENTRE,
            terminator: GroupTerminator::Either,
            window_size: [1280.0, 960.0],
            title: "Aircraft GPS Track".to_string(),
            track_padding: 0.25,
            last_directory: None,
        }
    }
}

impl TrackerConfig {
    /// Load configuration from the default location.
    /// A missing file gives the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .map_err(|e| TrackerError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| TrackerError::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TrackerError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)?;

        std::fs::write(config_path, contents)
            .map_err(|e| TrackerError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// `$HOME/.config/hdop-tracker/config.json`
    pub fn get_config_path() -> Result<PathBuf> {
        let home = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .ok_or_else(|| TrackerError::Config("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home)
            .join(".config")
            .join("hdop-tracker")
            .join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if !self.hdop_threshold.is_finite() || self.hdop_threshold <= 0.0 {
            return Err(TrackerError::Config(format!(
                "HDOP threshold must be a positive number, got {}",
                self.hdop_threshold
            )));
        }
        if !self.grid_separation.is_finite() || self.grid_separation <= 0.0 {
            return Err(TrackerError::Config(format!(
                "grid separation must be a positive number of degrees, got {}",
                self.grid_separation
            )));
        }
        if !(0.0..=5.0).contains(&self.track_padding) {
            return Err(TrackerError::Config(format!(
                "track padding must be between 0 and 5, got {}",
                self.track_padding
            )));
        }
        let centre = self.fallback_centre;
        if centre.lat.abs() > 90.0 || centre.lon.abs() > 180.0 {
            return Err(TrackerError::Config(format!(
                "fallback centre {}, {} is not a valid position",
                centre.lat, centre.lon
            )));
        }
        Ok(())
    }

    pub fn update_threshold(&mut self, threshold: f64) -> Result<()> {
        let previous = self.hdop_threshold;
        self.hdop_threshold = threshold;
        if let Err(e) = self.validate() {
            self.hdop_threshold = previous;
            return Err(e);
        }
        Ok(())
    }

    pub fn update_terminator(&mut self, terminator: GroupTerminator) {
        self.terminator = terminator;
    }

    pub fn remember_directory(&mut self, dir: &Path) {
        self.last_directory = Some(dir.to_path_buf());
    }

    /// Record the chooser's directory on disk, leaving every other stored
    /// setting as it was.
    pub fn save_last_directory(dir: &Path) -> Result<()> {
        Self::save_last_directory_to(&Self::get_config_path()?, dir)
    }

    pub fn save_last_directory_to(config_path: &Path, dir: &Path) -> Result<()> {
        let mut stored = Self::load_from(config_path)?;
        stored.remember_directory(dir);
        stored.save_to(config_path)
    }

    pub fn map_style(&self) -> MapStyle {
        MapStyle {
            hdop_threshold: self.hdop_threshold,
            good_colour: self.good_colour,
            bad_colour: self.bad_colour,
            water_colour: self.water_colour,
            centre_colour: self.centre_colour,
            grid_separation: self.grid_separation,
            title: self.title.clone(),
            track_padding: self.track_padding,
            window_size: self.window_size,
        }
    }
}
