// src/display/style.rs
//! Colours and map styling

use super::HdopQuality;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 24-bit colour written as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("invalid colour '{}' (expected #RRGGBB)", s));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(colour: Rgb) -> Self {
        colour.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Rgb {
    /// KML colour order: `aabbggrr`
    pub fn to_kml(&self) -> String {
        format!("ff{:02x}{:02x}{:02x}", self.2, self.1, self.0)
    }
}

/// Everything a renderer needs besides the track itself
#[derive(Debug, Clone, PartialEq)]
pub struct MapStyle {
    pub hdop_threshold: f64,
    pub good_colour: Rgb,
    pub bad_colour: Rgb,
    pub water_colour: Rgb,
    pub centre_colour: Rgb,
    pub grid_separation: f64,
    pub title: String,
    pub track_padding: f64,
    pub window_size: [f32; 2],
}

impl MapStyle {
    pub fn colour_for(&self, quality: HdopQuality) -> Rgb {
        match quality {
            HdopQuality::Good => self.good_colour,
            HdopQuality::Bad => self.bad_colour,
        }
    }

    /// e.g. "Aircraft GPS Track (HDOP > 2.0 highlighted)"
    pub fn heading(&self) -> String {
        format!("{} (HDOP > {:.1} highlighted)", self.title, self.hdop_threshold)
    }
}

impl Default for MapStyle {
    fn default() -> Self {
        crate::config::TrackerConfig::default().map_style()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colour() {
        assert_eq!("#2e632f".parse::<Rgb>(), Ok(Rgb(0x2E, 0x63, 0x2F)));
        assert_eq!("FF0000".parse::<Rgb>(), Ok(Rgb(255, 0, 0)));
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#GG0000".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_colour_display_and_kml() {
        let colour = Rgb(0x18, 0x1F, 0x69);
        assert_eq!(colour.to_string(), "#181F69");
        assert_eq!(colour.to_kml(), "ff691f18");
    }

    #[test]
    fn test_colour_for_quality() {
        let style = MapStyle::default();
        assert_eq!(style.colour_for(HdopQuality::Good), Rgb(0, 255, 0));
        assert_eq!(style.colour_for(HdopQuality::Bad), Rgb(255, 0, 0));
        assert!(style.heading().contains("HDOP > 2.0"));
    }
}
