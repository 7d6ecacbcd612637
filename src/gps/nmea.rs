// src/gps/nmea.rs
//! NMEA log reading: raw sentences grouped into GPS epochs

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Talker prefix of the sentences this reader keeps
pub const GPS_TALKER: &str = "GP";

/// One comma-delimited NMEA line, split into its fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSentence {
    /// 1-based line number in the source log
    pub line: usize,
    pub fields: Vec<String>,
}

impl RawSentence {
    pub fn parse(line: usize, text: &str) -> Self {
        let text = text.trim_end_matches(['\r', '\n']);
        Self {
            line,
            fields: text.split(',').map(str::to_string).collect(),
        }
    }

    /// Sentence identifier with any leading `$` removed, e.g. `GPGGA`
    pub fn id(&self) -> &str {
        let first = self.fields.first().map(String::as_str).unwrap_or("");
        first.strip_prefix('$').unwrap_or(first)
    }

    pub fn is_gps(&self) -> bool {
        self.id().starts_with(GPS_TALKER)
    }

    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for RawSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields.join(","))
    }
}

/// The sentences of one GPS epoch, closed by a terminator sentence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceGroup {
    pub sentences: Vec<RawSentence>,
}

impl SentenceGroup {
    pub fn iter(&self) -> std::slice::Iter<'_, RawSentence> {
        self.sentences.iter()
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Which sentence closes an epoch.
///
/// Receivers differ on whether `GPGGA` or `GPGST` ends the burst, so both
/// are accepted unless one is named explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupTerminator {
    #[default]
    Either,
    Gga,
    Gst,
}

impl GroupTerminator {
    pub fn closes(&self, id: &str) -> bool {
        match self {
            GroupTerminator::Either => id == "GPGGA" || id == "GPGST",
            GroupTerminator::Gga => id == "GPGGA",
            GroupTerminator::Gst => id == "GPGST",
        }
    }
}

impl FromStr for GroupTerminator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "either" | "any" => Ok(GroupTerminator::Either),
            "gga" | "gpgga" => Ok(GroupTerminator::Gga),
            "gst" | "gpgst" => Ok(GroupTerminator::Gst),
            other => Err(format!("unknown terminator '{}' (expected either, gga or gst)", other)),
        }
    }
}

impl fmt::Display for GroupTerminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupTerminator::Either => write!(f, "either"),
            GroupTerminator::Gga => write!(f, "gga"),
            GroupTerminator::Gst => write!(f, "gst"),
        }
    }
}

/// Group raw log lines into epochs.
///
/// Only `GP` sentences are kept. A trailing group with no terminator is dropped.
pub fn read_log<I, S>(lines: I, terminator: GroupTerminator) -> Vec<SentenceGroup>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut groups = Vec::new();
    let mut current = SentenceGroup::default();
    let mut skipped = 0usize;

    for (index, text) in lines.into_iter().enumerate() {
        let sentence = RawSentence::parse(index + 1, text.as_ref());
        if !sentence.is_gps() {
            skipped += 1;
            continue;
        }

        let closes = terminator.closes(sentence.id());
        current.sentences.push(sentence);

        if closes {
            groups.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        debug!("dropping {} sentences after the last terminator", current.len());
    }
    debug!(
        "read {} sentence groups ({} non-GPS lines ignored)",
        groups.len(),
        skipped
    );

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPOCH: &[&str] = &[
        "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A",
        "$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48",
        "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47",
    ];

    #[test]
    fn test_sentence_id_strips_dollar() {
        let with = RawSentence::parse(1, "$GPGGA,1,2");
        let without = RawSentence::parse(2, "GPGGA,1,2");
        assert_eq!(with.id(), "GPGGA");
        assert_eq!(without.id(), "GPGGA");
        assert!(with.is_gps());
    }

    #[test]
    fn test_line_terminators_stripped() {
        let sentence = RawSentence::parse(1, "GPGGA,a,b*47\r\n");
        assert_eq!(sentence.field(2), Some("b*47"));
        assert_eq!(sentence.len(), 3);
    }

    #[test]
    fn test_single_group() {
        let groups = read_log(EPOCH.iter(), GroupTerminator::Either);
        assert_eq!(groups.len(), 1);

        let flattened: Vec<String> = groups
            .iter()
            .flat_map(|g| g.iter().map(|s| s.to_string()))
            .collect();
        assert_eq!(flattened, EPOCH);
    }

    #[test]
    fn test_non_gps_lines_ignored() {
        let lines = [
            "$GLGSV,3,1,12,65,40,083,46*75",
            "garbage",
            "",
            "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47",
        ];
        let groups = read_log(lines, GroupTerminator::Gga);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 1);
        assert_eq!(groups[0].sentences[0].line, 4);
    }

    #[test]
    fn test_trailing_partial_group_dropped() {
        let mut lines: Vec<&str> = EPOCH.to_vec();
        lines.push("$GPRMC,123520,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A");
        let groups = read_log(lines, GroupTerminator::Either);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 3);
    }

    #[test]
    fn test_empty_input() {
        let groups = read_log(Vec::<String>::new(), GroupTerminator::Either);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_gst_terminator() {
        let lines = [
            "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47",
            "$GPGST,123519,0.006,0.023,0.020,273.6,0.023,0.020,0.031*6A",
            "$GPGGA,123520,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47",
        ];

        let gst_only = read_log(lines, GroupTerminator::Gst);
        assert_eq!(gst_only.len(), 1);
        assert_eq!(gst_only[0].len(), 2);

        let either = read_log(lines, GroupTerminator::Either);
        assert_eq!(either.len(), 3);

        let gga_only = read_log(lines, GroupTerminator::Gga);
        assert_eq!(gga_only.len(), 2);
        assert_eq!(gga_only[1].len(), 2);
    }

    #[test]
    fn test_terminator_from_str() {
        assert_eq!("GGA".parse::<GroupTerminator>(), Ok(GroupTerminator::Gga));
        assert_eq!("gpgst".parse::<GroupTerminator>(), Ok(GroupTerminator::Gst));
        assert_eq!("either".parse::<GroupTerminator>(), Ok(GroupTerminator::Either));
        assert!("rmc".parse::<GroupTerminator>().is_err());
    }
}
