//! Top-level wiring of the exporter.
//!
//! Builds the metrics registry and sinks from an [`ExporterConfig`], opens
//! the log source, and runs the ingestion pipeline next to the HTTP
//! listener until one of them stops.

use crate::config::ExporterConfig;
use crate::error::{ExporterError, Result};
use crate::identity::IdentityResolver;
use crate::pipeline::{IngestStats, Pipeline};
use crate::sink::server::run_metrics_server;
use crate::sink::{EpochSink, MetricsRegistry, MetricsSink, SharedMetricsRegistry, SqlitePersistence};
use crate::source::LogSource;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Run the exporter until `cancel` fires or ingestion fails.
///
/// Returns the ingestion statistics on cancellation. The end of the log
/// source, an I/O error, or a failure of the metrics listener are errors.
pub async fn run(config: ExporterConfig, cancel: CancellationToken) -> Result<IngestStats> {
    config.validate()?;

    info!(
        source = %config.source.describe(),
        protocol = ?config.protocol,
        listen = %config.listen_address,
        "Starting ts2phc exporter"
    );

    let registry: SharedMetricsRegistry = Arc::new(MetricsRegistry::new()?);
    let sinks = build_sinks(&config, &registry)?;
    let mut pipeline = Pipeline::new(IdentityResolver::new(config.protocol), sinks)?;
    let mut source = LogSource::open(&config).await?;

    let server_cancel = cancel.child_token();
    let mut server = tokio::spawn(run_metrics_server(
        Arc::clone(&registry),
        config.listen_address,
        server_cancel.clone(),
    ));

    let outcome = tokio::select! {
        biased;
        result = pipeline.run(&mut source, &cancel) => result,
        joined = &mut server => match joined {
            Ok(Ok(())) => Err(ExporterError::Server {
                message: "metrics listener stopped".to_string(),
            }),
            Ok(Err(e)) => Err(e),
            Err(e) => Err(ExporterError::Server {
                message: format!("metrics listener task failed: {}", e),
            }),
        },
    };

    server_cancel.cancel();
    if !server.is_finished() {
        if let Err(e) = server.await {
            error!(error = %e, "Metrics listener did not shut down cleanly");
        }
    }

    let stats = pipeline.stats();
    info!(
        lines = stats.lines,
        nmea = stats.nmea_sentences,
        decode_failures = stats.decode_failures,
        unknown = stats.unknown_sentences,
        epochs = stats.epochs_flushed,
        sink_failures = stats.sink_failures,
        "Ingestion finished ({:.1}% of NMEA sentences decoded)",
        stats.decode_success_rate()
    );

    outcome
}

fn build_sinks(config: &ExporterConfig, registry: &SharedMetricsRegistry) -> Result<Vec<Box<dyn EpochSink>>> {
    let mut sinks: Vec<Box<dyn EpochSink>> = vec![Box::new(MetricsSink::new(
        registry.metrics().clone(),
        config.total_satellites_fallback.clone(),
    ))];

    if let Some(persistence) = &config.persistence {
        sinks.push(Box::new(SqlitePersistence::open(
            persistence,
            config.labels.clone(),
        )?));
    }

    Ok(sinks)
}
