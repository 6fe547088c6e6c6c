//! Configuration management and validation.
//!
//! Provides the exporter configuration: where logs come from, which
//! identity table to resolve against, receiver/antenna labels, optional
//! persistence and the HTTP listener.

use crate::constants::{
    DEFAULT_JOURNAL_UNIT, DEFAULT_LISTEN_ADDRESS, DEFAULT_POLL_INTERVAL_MS, MIN_POLL_INTERVAL_MS,
};
use crate::error::{ExporterError, Result};
use crate::identity::ProtocolVariant;
use crate::models::SatelliteIdentity;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Where ts2phc log lines are read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LogSourceConfig {
    /// Follow the systemd journal of a unit via `journalctl -f`
    Journal { unit: String },
    /// Read a log file, optionally following it as it grows
    File { path: PathBuf, follow: bool },
}

impl Default for LogSourceConfig {
    fn default() -> Self {
        LogSourceConfig::Journal {
            unit: DEFAULT_JOURNAL_UNIT.to_string(),
        }
    }
}

impl LogSourceConfig {
    /// Human-readable description used in logs and errors
    pub fn describe(&self) -> String {
        match self {
            LogSourceConfig::Journal { unit } => format!("journal unit {}", unit),
            LogSourceConfig::File { path, .. } => format!("logfile {}", path.display()),
        }
    }
}

/// Labels attached to every persisted satellite row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationLabels {
    /// System or GPS receiver label; defaults to the host name
    pub receiver: String,
    pub antenna: String,
}

/// Per-satellite row persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// SQLite database file
    pub database: PathBuf,
    /// Table receiving one row per satellite per epoch
    pub table: String,
}

/// Global configuration for the exporter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Address of the Prometheus HTTP listener
    pub listen_address: SocketAddr,

    /// Log source selection
    pub source: LogSourceConfig,

    /// Poll interval for a followed file at EOF
    pub poll_interval_ms: u64,

    /// Identity table selection
    pub protocol: ProtocolVariant,

    /// Identity whose count stands in for total satellites when no GGA was seen
    pub total_satellites_fallback: SatelliteIdentity,

    /// Receiver/antenna labels for persisted rows
    pub labels: StationLabels,

    /// Optional per-satellite persistence
    pub persistence: Option<PersistenceConfig>,

    /// Enable debugging output
    pub debug: bool,

    /// Only log errors
    pub quiet: bool,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        let protocol = ProtocolVariant::default();
        Self {
            listen_address: DEFAULT_LISTEN_ADDRESS
                .parse()
                .unwrap_or(SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8089))),
            source: LogSourceConfig::default(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            protocol,
            total_satellites_fallback: protocol.gps_l1_identity(),
            labels: StationLabels::default(),
            persistence: None,
            debug: false,
            quiet: false,
        }
    }
}

impl ExporterConfig {
    /// Read logs from a file instead of the journal
    pub fn with_logfile(mut self, path: impl Into<PathBuf>, follow: bool) -> Self {
        self.source = LogSourceConfig::File {
            path: path.into(),
            follow,
        };
        self
    }

    /// Follow a different journal unit
    pub fn with_journal_unit(mut self, unit: impl Into<String>) -> Self {
        self.source = LogSourceConfig::Journal { unit: unit.into() };
        self
    }

    /// Select the identity table; also resets the total-satellites fallback
    /// to that table's GPS L1 identity
    pub fn with_protocol(mut self, protocol: ProtocolVariant) -> Self {
        self.protocol = protocol;
        self.total_satellites_fallback = protocol.gps_l1_identity();
        self
    }

    pub fn with_total_satellites_fallback(mut self, identity: SatelliteIdentity) -> Self {
        self.total_satellites_fallback = identity;
        self
    }

    pub fn with_labels(mut self, receiver: impl Into<String>, antenna: impl Into<String>) -> Self {
        self.labels = StationLabels {
            receiver: receiver.into(),
            antenna: antenna.into(),
        };
        self
    }

    pub fn with_persistence(mut self, database: impl Into<PathBuf>, table: impl Into<String>) -> Self {
        self.persistence = Some(PersistenceConfig {
            database: database.into(),
            table: table.into(),
        });
        self
    }

    pub fn with_listen_address(mut self, address: SocketAddr) -> Self {
        self.listen_address = address;
        self
    }

    pub fn with_poll_interval_ms(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    pub fn with_debug(mut self) -> Self {
        self.debug = true;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        match &self.source {
            LogSourceConfig::Journal { unit } if unit.trim().is_empty() => {
                return Err(ExporterError::configuration("journal unit must not be empty"));
            }
            LogSourceConfig::File { path, .. } if path.as_os_str().is_empty() => {
                return Err(ExporterError::configuration("logfile path must not be empty"));
            }
            _ => {}
        }

        if self.poll_interval_ms < MIN_POLL_INTERVAL_MS {
            return Err(ExporterError::configuration(format!(
                "poll interval must be at least {}ms, got {}ms",
                MIN_POLL_INTERVAL_MS, self.poll_interval_ms
            )));
        }

        if self.debug && self.quiet {
            return Err(ExporterError::configuration(
                "--debug and --quiet are mutually exclusive",
            ));
        }

        if let Some(persistence) = &self.persistence {
            if !is_sql_identifier(&persistence.table) {
                return Err(ExporterError::configuration(format!(
                    "database table {:?} is not a plain SQL identifier",
                    persistence.table
                )));
            }
            if persistence.database.as_os_str().is_empty() {
                return Err(ExporterError::configuration("database path must not be empty"));
            }
        }

        debug!(
            "Configuration valid: source={}, protocol={:?}, persistence={}",
            self.source.describe(),
            self.protocol,
            self.persistence.is_some()
        );
        Ok(())
    }
}

/// Table names are spliced into SQL text, so only `[A-Za-z_][A-Za-z0-9_]*` is accepted
pub fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
