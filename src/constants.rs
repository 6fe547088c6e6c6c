//! Application constants for the ts2phc exporter
//!
//! Default values, log-line markers and metric names used throughout
//! the exporter.

// =============================================================================
// Defaults
// =============================================================================

/// Default address for the Prometheus HTTP listener
pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:8089";

/// Default systemd unit whose journal is followed
pub const DEFAULT_JOURNAL_UNIT: &str = "ts2phc";

/// Command used to follow the systemd journal
pub const JOURNALCTL_COMMAND: &str = "journalctl";

/// How often a followed log file is polled once it reaches EOF
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;

/// Lower bound accepted for the poll interval
pub const MIN_POLL_INTERVAL_MS: u64 = 10;

/// Default table name used when persistence is enabled without an explicit table
pub const DEFAULT_DB_TABLE: &str = "satellites";

// =============================================================================
// Log line shapes
// =============================================================================

/// Pattern for embedded NMEA sentences; the payload runs to end of line
pub const NMEA_LINE_PATTERN: &str = r"nmea sentence: (.*)$";

/// Pattern for PHC offset reports:
/// `/dev/ptp0 offset   -12 s2 freq   +340`
pub const OFFSET_LINE_PATTERN: &str = r"(/dev/ptp[0-9]+)\s+offset\s+(\S+)\s.*\bfreq\s+(\S+)";

// =============================================================================
// Metrics
// =============================================================================

pub mod metric_names {
    pub const SAT_COUNTS: &str = "ts2phc_sat_counts";
    pub const LOCKED: &str = "ts2phc_locked";
    pub const TOTAL_SATELLITES: &str = "ts2phc_total_satellites";
    pub const PDOP: &str = "ts2phc_pdop";
    pub const VDOP: &str = "ts2phc_vdop";
    pub const HDOP: &str = "ts2phc_hdop";
    pub const OFFSET_COUNT: &str = "ts2phc_offset_count";
    pub const OFFSET_SUM: &str = "ts2phc_offset_sum";
    pub const OFFSET_SUM_SQUARED: &str = "ts2phc_offset_sum_squared";
    pub const FREQ_COUNT: &str = "ts2phc_freq_count";
    pub const FREQ_SUM: &str = "ts2phc_freq_sum";
    pub const FREQ_SUM_SQUARED: &str = "ts2phc_freq_sum_squared";
}

/// Label names for the per-identity satellite count gauge
pub const SAT_COUNT_LABELS: &[&str] = &["constellation", "name", "band", "frequency"];

/// Maximum length of a metric label value
pub const MAX_LABEL_VALUE_LEN: usize = 64;

/// Content type of the Prometheus text exposition format
pub const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";
