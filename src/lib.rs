//! ts2phc exporter library
//!
//! Turns the log output of `ts2phc` into GNSS receiver and PHC
//! synchronisation telemetry.
//!
//! This library provides tools for:
//! - Classifying log lines into NMEA sentences and PHC offset reports
//! - Decoding GSA, GSV, RMC, GGA and TXT sentences
//! - Resolving talker and system IDs to satellite systems and signal bands
//! - Aggregating sentences into epochs closed by each offset report
//! - Publishing epochs as Prometheus metrics and optional SQLite rows

pub mod aggregator;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod exporter;
pub mod identity;
pub mod models;
pub mod nmea;
pub mod pipeline;
pub mod sink;
pub mod source;

// Re-export commonly used types
pub use aggregator::EpochAggregator;
pub use config::ExporterConfig;
pub use error::{DecodeError, ExporterError, Result};
pub use identity::{IdentityResolver, ProtocolVariant};
pub use models::{Epoch, OffsetReport, SatelliteIdentity, SatelliteSample};
pub use pipeline::{IngestStats, LineOutcome, Pipeline};
