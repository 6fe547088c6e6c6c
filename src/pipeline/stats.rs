//! Ingestion statistics

use serde::{Deserialize, Serialize};

/// Counters kept by the pipeline across its lifetime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    /// Lines read from the source
    pub lines: u64,

    /// Lines carrying an NMEA sentence
    pub nmea_sentences: u64,

    /// NMEA sentences that failed to decode
    pub decode_failures: u64,

    /// Decoded sentences of a type the aggregator does not use
    pub unknown_sentences: u64,

    /// Offset reports, one per flushed epoch
    pub offset_reports: u64,

    /// Lines that were neither NMEA nor offset reports
    pub unmatched_lines: u64,

    pub epochs_flushed: u64,

    /// Individual sink publish failures
    pub sink_failures: u64,
}

impl IngestStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            lines: 0,
            nmea_sentences: 0,
            decode_failures: 0,
            unknown_sentences: 0,
            offset_reports: 0,
            unmatched_lines: 0,
            epochs_flushed: 0,
            sink_failures: 0,
        }
    }

    /// Share of NMEA sentences that decoded, as a percentage
    pub fn decode_success_rate(&self) -> f64 {
        if self.nmea_sentences == 0 {
            0.0
        } else {
            ((self.nmea_sentences - self.decode_failures) as f64 / self.nmea_sentences as f64)
                * 100.0
        }
    }
}

impl Default for IngestStats {
    fn default() -> Self {
        Self::new()
    }
}
