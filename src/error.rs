//! Error handling for log ingestion and telemetry export.
//!
//! `ExporterError` covers the conditions that end ingestion or startup
//! (log source failures, configuration, sink wiring). `DecodeError` is the
//! per-sentence failure raised by the NMEA decoder; it is always recovered
//! by the pipeline and never propagated.

use crate::sink::metrics::MetricsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExporterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Log source {source_name} failed: {reason}")]
    LogSource { source_name: String, reason: String },

    #[error("Log source {source_name} ended after {lines} lines")]
    SourceExhausted { source_name: String, lines: u64 },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),

    #[error("Persistence error: {message}")]
    Persistence {
        message: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Metrics server error: {message}")]
    Server { message: String },
}

impl ExporterError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Persistence {
            message: message.into(),
            source,
        }
    }

    pub fn log_source(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LogSource {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

/// Structural failure while decoding a single NMEA sentence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("empty sentence")]
    Empty,

    #[error("invalid talker/type field: {field:?}")]
    InvalidTalker { field: String },

    #[error("{sentence_type} sentence has {found} fields, expected {expected}")]
    FieldCount {
        sentence_type: String,
        expected: String,
        found: usize,
    },

    #[error("{sentence_type} field {field} has invalid value {value:?}")]
    InvalidField {
        sentence_type: String,
        field: &'static str,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, ExporterError>;
