//! Line classification for ts2phc log output.
//!
//! Every log line is one of: an embedded NMEA sentence, a PHC offset
//! report, or something the exporter does not care about. NMEA matching is
//! tried first, so a line is never both.

use crate::constants::{NMEA_LINE_PATTERN, OFFSET_LINE_PATTERN};
use crate::error::{ExporterError, Result};
use crate::models::OffsetReport;
use regex::Regex;
use tracing::debug;

/// What a single log line turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Payload following `nmea sentence: `
    Nmea(&'a str),
    /// Offset report; malformed numbers already defaulted to zero
    Offset(OffsetReport),
    Other,
}

/// Matches log lines against the two known shapes
#[derive(Debug, Clone)]
pub struct LineClassifier {
    nmea: Regex,
    offset: Regex,
}

impl LineClassifier {
    pub fn new() -> Result<Self> {
        let nmea = Regex::new(NMEA_LINE_PATTERN)
            .map_err(|e| ExporterError::configuration(format!("invalid NMEA pattern: {}", e)))?;
        let offset = Regex::new(OFFSET_LINE_PATTERN)
            .map_err(|e| ExporterError::configuration(format!("invalid offset pattern: {}", e)))?;

        Ok(Self { nmea, offset })
    }

    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        if let Some(captures) = self.nmea.captures(line) {
            let payload = captures.get(1).map_or("", |m| m.as_str());
            return LineKind::Nmea(payload.trim_end());
        }

        if let Some(captures) = self.offset.captures(line) {
            let field = |i: usize| captures.get(i).map_or("", |m| m.as_str());
            return LineKind::Offset(OffsetReport {
                device: field(1).to_string(),
                offset_ns: parse_report_value("offset", field(2)),
                freq_ppb: parse_report_value("freq", field(3)),
            });
        }

        LineKind::Other
    }
}

/// Parse a signed report value; a malformed value reads as zero so the
/// report still closes its epoch
fn parse_report_value(name: &str, value: &str) -> i64 {
    match value.parse::<i64>() {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!(field = name, value, error = %e, "Malformed offset report value, using 0");
            0
        }
    }
}
