//! Command-line interface components.

use crate::config::ExporterConfig;
use crate::constants::{DEFAULT_DB_TABLE, DEFAULT_JOURNAL_UNIT, DEFAULT_LISTEN_ADDRESS, DEFAULT_POLL_INTERVAL_MS};
use crate::identity::ProtocolVariant;
use crate::models::SatelliteIdentity;
use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use sysinfo::System;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "ts2phc-exporter")]
#[command(about = "Export GNSS and PHC telemetry from ts2phc logs to Prometheus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Enable debugging output
    #[arg(short, long)]
    pub debug: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "debug")]
    pub quiet: bool,

    /// Address to listen on for Prometheus scrapes
    #[arg(long, default_value = DEFAULT_LISTEN_ADDRESS)]
    pub listen_address: SocketAddr,

    /// Systemd unit whose journal is followed
    #[arg(short = 'u', long, default_value = DEFAULT_JOURNAL_UNIT)]
    pub unit: String,

    /// Read this log file instead of the journal
    #[arg(long, value_name = "PATH")]
    pub logfile: Option<PathBuf>,

    /// Stop at the end of the log file instead of waiting for more lines
    #[arg(long, requires = "logfile")]
    pub no_follow: bool,

    /// Poll interval while waiting for a followed log file to grow
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    pub poll_interval_ms: u64,

    /// Satellite identity table (generic NMEA 4.10 or u-blox NMEA 4.11)
    #[arg(long, value_enum, default_value_t = ProtocolVariant::VendorExtended)]
    pub protocol: ProtocolVariant,

    /// System or GPS receiver label for persisted rows (defaults to the host name)
    #[arg(long)]
    pub receiver: Option<String>,

    /// GPS antenna label for persisted rows
    #[arg(long, default_value = "")]
    pub antenna: String,

    /// SQLite database for per-satellite rows; persistence is off when unset
    #[arg(long, env = "DSN", value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Table receiving per-satellite rows
    #[arg(long, default_value = DEFAULT_DB_TABLE)]
    pub db_table: String,

    /// Identity counted as total satellites when no GGA sentence was seen
    #[arg(long, value_name = "CONSTELLATION,NAME,BAND,FREQUENCY")]
    pub fallback_identity: Option<String>,
}

impl Args {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.debug {
            "debug"
        } else {
            "info"
        }
    }

    /// Build the exporter configuration from the parsed arguments
    pub fn into_config(self) -> Result<ExporterConfig> {
        let mut config = ExporterConfig::default()
            .with_listen_address(self.listen_address)
            .with_poll_interval_ms(self.poll_interval_ms)
            .with_protocol(self.protocol);

        config = match self.logfile {
            Some(path) => config.with_logfile(path, !self.no_follow),
            None => config.with_journal_unit(self.unit),
        };

        if let Some(spec) = &self.fallback_identity {
            let identity = parse_identity(spec)
                .with_context(|| format!("Invalid --fallback-identity {:?}", spec))?;
            config = config.with_total_satellites_fallback(identity);
        }

        let receiver = match self.receiver {
            Some(receiver) if !receiver.is_empty() => receiver,
            _ => System::host_name().unwrap_or_default(),
        };
        config = config.with_labels(receiver, self.antenna);

        if let Some(database) = self.db_path {
            config = config.with_persistence(database, self.db_table);
        }

        config.debug = self.debug;
        config.quiet = self.quiet;

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

/// Parse `constellation,name,band,frequency`
fn parse_identity(spec: &str) -> Result<SatelliteIdentity> {
    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [constellation, name, band, frequency] => Ok(SatelliteIdentity::new(
            *constellation,
            *name,
            *band,
            *frequency,
        )),
        _ => anyhow::bail!("expected 4 comma-separated fields, found {}", parts.len()),
    }
}

/// Initialize tracing with a stderr writer; `RUST_LOG` overrides the flags
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ts2phc_exporter={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}
