// src/gps/mod.rs
//! NMEA log parsing: sentences, fixes and coordinate conversion

pub mod coordinate;
pub mod fix;
pub mod nmea;

pub use coordinate::{to_decimal_degrees, Hemisphere, MalformedCoordinate};
pub use fix::{filter_fixes, Fix, FixQuality};
pub use nmea::{read_log, GroupTerminator, RawSentence, SentenceGroup};
