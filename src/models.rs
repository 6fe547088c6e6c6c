//! Core data structures for epoch aggregation.
//!
//! Defines the resolved satellite-system identity, per-satellite samples,
//! offset reports and the `Epoch` accumulator that is handed to sinks on
//! every clock-offset report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolved satellite system / signal identity.
///
/// Used as a grouping key: equality and hashing cover all four fields, since
/// the same constellation is reported on several bands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SatelliteIdentity {
    pub constellation: String,
    pub name: String,
    pub band: String,
    pub frequency: String,
}

impl SatelliteIdentity {
    pub fn new(
        constellation: impl Into<String>,
        name: impl Into<String>,
        band: impl Into<String>,
        frequency: impl Into<String>,
    ) -> Self {
        Self {
            constellation: constellation.into(),
            name: name.into(),
            band: band.into(),
            frequency: frequency.into(),
        }
    }

    /// True when no table entry contributed to this identity
    pub fn is_unresolved(&self) -> bool {
        self.constellation.is_empty() && self.name.is_empty()
    }
}

/// One satellite as reported by a GSV sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SatelliteSample {
    pub identity: SatelliteIdentity,
    /// Talker and system ID the identity was resolved from
    pub talker: String,
    pub system_id: i64,
    pub satellite_id: i64,
    pub azimuth: i64,
    pub elevation: i64,
    pub snr: i64,
}

/// A parsed `/dev/ptpN offset ... freq ...` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetReport {
    pub device: String,
    pub offset_ns: i64,
    pub freq_ppb: i64,
}

/// Facts accumulated between two consecutive offset reports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Epoch {
    /// Arrival time of the first line that contributed to the epoch
    pub started_at: Option<DateTime<Utc>>,
    /// Satellites tracked with signal (SNR > 0), per identity
    pub satellite_counts: HashMap<SatelliteIdentity, u64>,
    /// Every satellite reported by GSV, regardless of SNR
    pub samples: Vec<SatelliteSample>,
    pub pdop: f64,
    pub vdop: f64,
    pub hdop: f64,
    /// HDOP from the most recent GGA fix report
    pub hdop_from_fix: f64,
    pub total_satellites_used: i64,
    pub locked: bool,
    pub device: String,
    pub offset_ns: i64,
    pub freq_ppb: i64,
}

impl Epoch {
    /// Empty epoch that still reports the offset line which closed the previous one
    pub fn following(report: &OffsetReport) -> Self {
        Self {
            device: report.device.clone(),
            offset_ns: report.offset_ns,
            freq_ppb: report.freq_ppb,
            ..Self::default()
        }
    }

    /// HDOP from GGA when available, otherwise from GSA
    pub fn effective_hdop(&self) -> f64 {
        if self.hdop_from_fix > 0.0 {
            self.hdop_from_fix
        } else {
            self.hdop
        }
    }

    /// Satellites used in the fix, falling back to the count recorded under
    /// `fallback` when no GGA sentence was seen
    pub fn effective_total_satellites(&self, fallback: &SatelliteIdentity) -> i64 {
        if self.total_satellites_used > 0 {
            self.total_satellites_used
        } else {
            self.satellite_counts.get(fallback).copied().unwrap_or(0) as i64
        }
    }

    /// Sum of all tracked satellites across identities
    pub fn tracked_satellites(&self) -> u64 {
        self.satellite_counts.values().sum()
    }
}
