//! Single-task ingestion driver
//!
//! Each line is classified, NMEA payloads are decoded and folded into the
//! live epoch, and every offset report flushes the epoch to all sinks
//! before the next line is looked at.
//!
//! - [`stats`] - [`IngestStats`] counters

pub mod stats;

#[cfg(test)]
pub mod tests;

pub use stats::IngestStats;

use crate::aggregator::EpochAggregator;
use crate::classifier::{LineClassifier, LineKind};
use crate::error::{DecodeError, ExporterError, Result};
use crate::identity::IdentityResolver;
use crate::models::Epoch;
use crate::nmea::{self, DecodedSentence};
use crate::sink::EpochSink;
use crate::source::LogSource;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// What happened to one line
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// NMEA sentence folded into the live epoch
    Aggregated,
    /// NMEA sentence rejected; the live epoch is unchanged
    DecodeFailed(DecodeError),
    /// Offset report closed the epoch; it has been published to every sink
    Flushed(Epoch),
    Ignored,
}

pub struct Pipeline {
    classifier: LineClassifier,
    aggregator: EpochAggregator,
    sinks: Vec<Box<dyn EpochSink>>,
    stats: IngestStats,
}

impl Pipeline {
    pub fn new(resolver: IdentityResolver, sinks: Vec<Box<dyn EpochSink>>) -> Result<Self> {
        Ok(Self {
            classifier: LineClassifier::new()?,
            aggregator: EpochAggregator::new(resolver),
            sinks,
            stats: IngestStats::new(),
        })
    }

    pub fn aggregator(&self) -> &EpochAggregator {
        &self.aggregator
    }

    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    /// Handle one log line received at `arrival`
    pub fn process_line(&mut self, line: &str, arrival: DateTime<Utc>) -> LineOutcome {
        self.stats.lines += 1;
        debug!(line, "Scanned line");

        match self.classifier.classify(line) {
            LineKind::Nmea(payload) => {
                self.stats.nmea_sentences += 1;
                match nmea::decode(payload) {
                    Ok(sentence) => {
                        if matches!(sentence, DecodedSentence::Unknown { .. }) {
                            self.stats.unknown_sentences += 1;
                        }
                        self.aggregator.apply(&sentence, arrival);
                        LineOutcome::Aggregated
                    }
                    Err(e) => {
                        self.stats.decode_failures += 1;
                        info!(sentence = payload, error = %e, "NMEA parser failed");
                        LineOutcome::DecodeFailed(e)
                    }
                }
            }
            LineKind::Offset(report) => {
                self.stats.offset_reports += 1;
                let epoch = self.aggregator.complete(report, arrival);
                self.publish(&epoch);
                self.stats.epochs_flushed += 1;
                LineOutcome::Flushed(epoch)
            }
            LineKind::Other => {
                self.stats.unmatched_lines += 1;
                debug!(line, "Unmatched line");
                LineOutcome::Ignored
            }
        }
    }

    fn publish(&mut self, epoch: &Epoch) {
        for sink in &mut self.sinks {
            if let Err(e) = sink.publish(epoch) {
                self.stats.sink_failures += 1;
                warn!(sink = sink.name(), error = %e, "Failed to publish epoch");
            }
        }
    }

    /// Read `source` until it ends or `cancel` fires.
    ///
    /// Cancellation returns the statistics so far. The end of the source is
    /// an error: a live ts2phc log never ends.
    pub async fn run(&mut self, source: &mut LogSource, cancel: &CancellationToken) -> Result<IngestStats> {
        info!(source = %source.describe(), sinks = self.sinks.len(), "Starting ingestion");

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(lines = self.stats.lines, "Ingestion cancelled");
                    return Ok(self.stats.clone());
                }
                line = source.next_line() => line?,
            };

            match next {
                Some(line) => {
                    self.process_line(&line, Utc::now());
                }
                None => {
                    return Err(ExporterError::SourceExhausted {
                        source_name: source.describe(),
                        lines: self.stats.lines,
                    });
                }
            }
        }
    }
}
