//! Prometheus metrics for flushed epochs.
//!
//! | Metric | Type | Labels |
//! |--------|------|--------|
//! | `ts2phc_sat_counts` | Gauge | `constellation`, `name`, `band`, `frequency` |
//! | `ts2phc_locked` | Gauge | |
//! | `ts2phc_total_satellites` | Gauge | |
//! | `ts2phc_pdop` / `ts2phc_vdop` / `ts2phc_hdop` | Gauge | |
//! | `ts2phc_offset_count` / `ts2phc_freq_count` | Counter | |
//! | `ts2phc_offset_sum` / `ts2phc_freq_sum` | Gauge | |
//! | `ts2phc_offset_sum_squared` / `ts2phc_freq_sum_squared` | Counter | |
//!
//! Offset and frequency are exported as count, sum and sum of squares so
//! mean and variance can be derived over any window with `rate()`.
//! Sums are gauges because the values are signed.

use super::EpochSink;
use crate::constants::{MAX_LABEL_VALUE_LEN, SAT_COUNT_LABELS, metric_names};
use crate::error::Result;
use crate::models::{Epoch, SatelliteIdentity};
use prometheus::{Counter, Encoder, Gauge, GaugeVec, Opts, Registry, TextEncoder};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Failed to register a metric with Prometheus.
    #[error("failed to register metric: {0}")]
    RegistrationFailed(#[from] prometheus::Error),

    /// Failed to encode metrics output.
    #[error("failed to encode metrics: {0}")]
    EncodingFailed(String),
}

pub type MetricsResult<T> = std::result::Result<T, MetricsError>;

/// All exporter metrics.
///
/// Cheap to clone; clones share the underlying atomics, so the ingestion
/// path and the scrape handler never block each other.
#[derive(Clone)]
pub struct ExporterMetrics {
    sat_counts: GaugeVec,
    locked: Gauge,
    total_satellites: Gauge,
    pdop: Gauge,
    vdop: Gauge,
    hdop: Gauge,
    offset_count: Counter,
    offset_sum: Gauge,
    offset_sum_squared: Counter,
    freq_count: Counter,
    freq_sum: Gauge,
    freq_sum_squared: Counter,
}

impl ExporterMetrics {
    /// Creates the metrics and registers them with `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error if any metric fails to register (e.g. duplicate name).
    pub fn new(registry: &Registry) -> MetricsResult<Self> {
        let sat_counts = GaugeVec::new(
            Opts::new(
                metric_names::SAT_COUNTS,
                "Current number of satellites by constellation",
            ),
            SAT_COUNT_LABELS,
        )?;
        registry.register(Box::new(sat_counts.clone()))?;

        let locked = gauge(
            registry,
            metric_names::LOCKED,
            "Shows if GNSS is currently locked; 1 for locked, 0 for not.",
        )?;
        let total_satellites = gauge(
            registry,
            metric_names::TOTAL_SATELLITES,
            "Current number of satellites used, according to the GNSS module.  This may be less \
             than the sum of ts2phc_sat_counts, depending on the module.",
        )?;
        let pdop = gauge(registry, metric_names::PDOP, "Position Dilution of Precision")?;
        let vdop = gauge(registry, metric_names::VDOP, "Vertical Dilution of Precision")?;
        let hdop = gauge(registry, metric_names::HDOP, "Horizontal Dilution of Precision")?;

        let offset_count = counter(registry, metric_names::OFFSET_COUNT, "count of offset entries")?;
        let offset_sum = gauge(registry, metric_names::OFFSET_SUM, "sum of offset entries")?;
        let offset_sum_squared = counter(
            registry,
            metric_names::OFFSET_SUM_SQUARED,
            "sum of square of offset entries",
        )?;

        let freq_count = counter(registry, metric_names::FREQ_COUNT, "count of freq entries")?;
        let freq_sum = gauge(registry, metric_names::FREQ_SUM, "sum of freq entries")?;
        let freq_sum_squared = counter(
            registry,
            metric_names::FREQ_SUM_SQUARED,
            "sum of square of freq entries",
        )?;

        Ok(Self {
            sat_counts,
            locked,
            total_satellites,
            pdop,
            vdop,
            hdop,
            offset_count,
            offset_sum,
            offset_sum_squared,
            freq_count,
            freq_sum,
            freq_sum_squared,
        })
    }

    /// Publish one flushed epoch.
    ///
    /// `fallback` is the identity whose count is used for total satellites
    /// when the epoch carried no GGA sentence.
    pub fn record_epoch(&self, epoch: &Epoch, fallback: &SatelliteIdentity) {
        for (identity, count) in &epoch.satellite_counts {
            self.sat_counts
                .with_label_values(&identity_labels(identity))
                .set(*count as f64);
        }

        self.pdop.set(epoch.pdop);
        self.vdop.set(epoch.vdop);
        self.hdop.set(epoch.effective_hdop());
        self.total_satellites
            .set(epoch.effective_total_satellites(fallback) as f64);
        self.locked.set(if epoch.locked { 1.0 } else { 0.0 });

        let offset = epoch.offset_ns as f64;
        self.offset_count.inc();
        self.offset_sum.add(offset);
        self.offset_sum_squared.inc_by(offset * offset);

        let freq = epoch.freq_ppb as f64;
        self.freq_count.inc();
        self.freq_sum.add(freq);
        self.freq_sum_squared.inc_by(freq * freq);
    }

    // ========================================================================
    // Accessors, primarily for tests
    // ========================================================================

    #[must_use]
    pub fn satellite_count(&self, identity: &SatelliteIdentity) -> f64 {
        self.sat_counts
            .with_label_values(&identity_labels(identity))
            .get()
    }

    #[must_use]
    pub fn locked(&self) -> f64 {
        self.locked.get()
    }

    #[must_use]
    pub fn total_satellites(&self) -> f64 {
        self.total_satellites.get()
    }

    #[must_use]
    pub fn dops(&self) -> (f64, f64, f64) {
        (self.pdop.get(), self.vdop.get(), self.hdop.get())
    }

    /// (count, sum, sum of squares) of offsets
    #[must_use]
    pub fn offset_stats(&self) -> (f64, f64, f64) {
        (
            self.offset_count.get(),
            self.offset_sum.get(),
            self.offset_sum_squared.get(),
        )
    }

    /// (count, sum, sum of squares) of frequency adjustments
    #[must_use]
    pub fn freq_stats(&self) -> (f64, f64, f64) {
        (
            self.freq_count.get(),
            self.freq_sum.get(),
            self.freq_sum_squared.get(),
        )
    }
}

/// Prometheus registry plus the exporter metrics registered with it.
#[derive(Clone)]
pub struct MetricsRegistry {
    registry: Registry,
    metrics: ExporterMetrics,
}

impl MetricsRegistry {
    /// # Errors
    ///
    /// Returns an error if metric registration fails.
    pub fn new() -> MetricsResult<Self> {
        let registry = Registry::new();
        let metrics = ExporterMetrics::new(&registry)?;
        Ok(Self { registry, metrics })
    }

    #[must_use]
    pub const fn metrics(&self) -> &ExporterMetrics {
        &self.metrics
    }

    /// Encodes all metrics in Prometheus text format.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn encode_text(&self) -> MetricsResult<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| MetricsError::EncodingFailed(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| MetricsError::EncodingFailed(e.to_string()))
    }
}

pub type SharedMetricsRegistry = Arc<MetricsRegistry>;

/// Sink that publishes each flushed epoch to the metrics
pub struct MetricsSink {
    metrics: ExporterMetrics,
    fallback: SatelliteIdentity,
}

impl MetricsSink {
    pub fn new(metrics: ExporterMetrics, fallback: SatelliteIdentity) -> Self {
        Self { metrics, fallback }
    }
}

impl EpochSink for MetricsSink {
    fn name(&self) -> &'static str {
        "metrics"
    }

    fn publish(&mut self, epoch: &Epoch) -> Result<()> {
        self.metrics.record_epoch(epoch, &self.fallback);
        Ok(())
    }
}

fn gauge(registry: &Registry, name: &str, help: &str) -> MetricsResult<Gauge> {
    let gauge = Gauge::with_opts(Opts::new(name, help))?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}

fn counter(registry: &Registry, name: &str, help: &str) -> MetricsResult<Counter> {
    let counter = Counter::with_opts(Opts::new(name, help))?;
    registry.register(Box::new(counter.clone()))?;
    Ok(counter)
}

fn identity_labels(identity: &SatelliteIdentity) -> [&str; 4] {
    [
        truncate_label(&identity.constellation),
        truncate_label(&identity.name),
        truncate_label(&identity.band),
        truncate_label(&identity.frequency),
    ]
}

/// Truncates a label value at a UTF-8 boundary no later than
/// `MAX_LABEL_VALUE_LEN` bytes.
fn truncate_label(value: &str) -> &str {
    if value.len() <= MAX_LABEL_VALUE_LEN {
        value
    } else {
        let end = value
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|&i| i <= MAX_LABEL_VALUE_LEN)
            .last()
            .unwrap_or(0);
        &value[..end]
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("GPS"), "GPS");

        let long = "é".repeat(MAX_LABEL_VALUE_LEN);
        let truncated = truncate_label(&long);
        assert!(truncated.len() <= MAX_LABEL_VALUE_LEN);
        assert!(truncated.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = Registry::new();
        assert!(ExporterMetrics::new(&registry).is_ok());
        assert!(matches!(
            ExporterMetrics::new(&registry),
            Err(MetricsError::RegistrationFailed(_))
        ));
    }
}
