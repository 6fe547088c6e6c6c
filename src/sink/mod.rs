//! Destinations for flushed epochs
//!
//! - [`metrics`] - Prometheus gauges and counters
//! - [`persistence`] - one SQLite row per satellite per epoch
//! - [`server`] - HTTP exposition of the metrics registry

pub mod metrics;
pub mod persistence;
pub mod server;

#[cfg(test)]
pub mod tests;

use crate::error::Result;
use crate::models::Epoch;

/// Receives every epoch the aggregator flushes, in order.
///
/// Called synchronously from the ingestion path; a returned error is logged
/// by the pipeline and never stops ingestion.
pub trait EpochSink: Send {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn publish(&mut self, epoch: &Epoch) -> Result<()>;
}

pub use metrics::{ExporterMetrics, MetricsRegistry, MetricsSink, SharedMetricsRegistry};
pub use persistence::SqlitePersistence;
