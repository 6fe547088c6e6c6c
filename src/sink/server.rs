//! HTTP exposition of the metrics registry.
//!
//! The handler only reads the Prometheus registry; it never touches the
//! aggregator, so a scrape cannot stall ingestion.

use super::metrics::SharedMetricsRegistry;
use crate::constants::METRICS_CONTENT_TYPE;
use crate::error::{ExporterError, Result};
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Router serving `/metrics` and a short banner on `/`
pub fn router(registry: SharedMetricsRegistry) -> Router {
    let metrics_handler = move || {
        let registry = Arc::clone(&registry);
        async move { render_metrics(&registry) }
    };

    Router::new().route("/metrics", get(metrics_handler)).route(
        "/",
        get(|| async { "ts2phc exporter\n\nGET /metrics - Prometheus metrics endpoint\n" }),
    )
}

fn render_metrics(registry: &SharedMetricsRegistry) -> Response {
    match registry.encode_text() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", METRICS_CONTENT_TYPE)],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {e}"),
            )
                .into_response()
        }
    }
}

/// Serve metrics on `addr` until `cancel` fires
pub async fn run_metrics_server(
    registry: SharedMetricsRegistry,
    addr: SocketAddr,
    cancel: CancellationToken,
) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ExporterError::Server {
            message: format!("failed to bind {}: {}", addr, e),
        })?;

    info!(addr = %addr, "Starting HTTP listener, listening for /metrics");

    axum::serve(listener, router(registry))
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| ExporterError::Server {
            message: format!("HTTP server failed: {}", e),
        })
}
