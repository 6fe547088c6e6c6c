//! Satellite-system identity resolution.
//!
//! Maps the talker prefix of a sentence (and, for receivers speaking NMEA
//! 4.11, the numeric system/signal ID carried in GSA and GSV) to a
//! [`SatelliteIdentity`]. Two tables exist:
//!
//! - `Generic` (NMEA 4.10): keyed by talker alone, no band information
//! - `VendorExtended` (u-blox NMEA 4.11): keyed by talker and system ID,
//!   naming the individual signal and its band
//!
//! A lookup miss never fails: the caller gets an empty identity and the raw
//! talker/system ID so the data can still be grouped and diagnosed.

use crate::models::SatelliteIdentity;
use serde::{Deserialize, Serialize};

/// Which identity table to resolve against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ProtocolVariant {
    /// Talker prefix only (NMEA 4.10)
    Generic,
    /// Talker prefix plus system ID (u-blox NMEA 4.11)
    #[default]
    VendorExtended,
}

impl ProtocolVariant {
    /// Identity under which GPS L1 satellites are counted with this variant
    pub fn gps_l1_identity(&self) -> SatelliteIdentity {
        match self {
            ProtocolVariant::Generic => SatelliteIdentity::new("GPS", "GPS", "", ""),
            ProtocolVariant::VendorExtended => SatelliteIdentity::new("GPS", "GPS L1", "1", "L1"),
        }
    }
}

/// Table row: (constellation, name, band, frequency)
type Entry = (&'static str, &'static str, &'static str, &'static str);

const VENDOR_EXTENDED_TABLE: &[(&str, i64, Entry)] = &[
    ("GN", 1, ("GPS", "GPS", "", "")),
    ("GN", 2, ("GLONASS", "GLONASS", "", "")),
    ("GN", 3, ("Galileo", "Galileo", "", "")),
    ("GN", 4, ("BeiDou", "BeiDou", "", "")),
    ("GN", 5, ("QZSS", "QZSS", "", "")),
    ("GN", 6, ("NavIC", "NavIC", "", "")),
    ("GP", 0, ("GPS", "GPS", "", "")),
    ("GP", 1, ("GPS", "GPS L1", "1", "L1")),
    ("GP", 5, ("GPS", "GPS L2 CM", "2", "L2")),
    ("GP", 6, ("GPS", "GPS L2 CL", "2", "L2")),
    ("GP", 7, ("GPS", "GPS L5 I", "5", "L5")),
    ("GP", 8, ("GPS", "GPS L6 Q", "6", "L6")),
    ("GL", 0, ("GLONASS", "GLONASS unknown", "1", "L1")),
    ("GL", 1, ("GLONASS", "GLONASS L1", "1", "L1")),
    ("GL", 3, ("GLONASS", "GLONASS L2", "2", "L2")),
    ("GA", 0, ("Galileo", "Galileo unknown", "", "")),
    ("GA", 1, ("Galileo", "Galileo E5 aI/aQ", "5", "E5")),
    ("GA", 2, ("Galileo", "Galileo E5 bI/bQ", "5", "E5")),
    ("GA", 4, ("Galileo", "Galileo E6 A", "6", "E6")),
    ("GA", 5, ("Galileo", "Galileo E6 B/C", "6", "E6")),
    ("GA", 7, ("Galileo", "Galileo E1 B/C", "1", "E1")),
    ("GB", 0, ("BeiDou", "BeiDou unknown", "", "")),
    ("GB", 1, ("BeiDou", "BeiDou B1 D1/D2", "1", "B1")),
    ("GB", 3, ("BeiDou", "BeiDou B1 Cp", "1", "B1")),
    ("GB", 5, ("BeiDou", "BeiDou B2 ad/ap", "2", "B2")),
    ("GB", 8, ("BeiDou", "BeiDou B2I/B3I", "2", "B2")),
    ("GQ", 0, ("QZSS", "QZSS unknown", "", "")),
    ("GQ", 1, ("QZSS", "QZSS L1C/A", "1", "L1")),
    ("GQ", 4, ("QZSS", "QZSS L1S", "1", "L1")),
    ("GQ", 5, ("QZSS", "QZSS L2 CM", "2", "L2")),
    ("GQ", 6, ("QZSS", "QZSS L2 CL", "2", "L2")),
    ("GQ", 7, ("QZSS", "QZSS L5 I", "5", "L5")),
    ("GQ", 8, ("QZSS", "QZSS L5 Q", "5", "L5")),
    ("GI", 0, ("NavIC", "NavIC unknown", "", "")),
    ("GI", 1, ("NavIC", "NavIC L5 A", "5", "L5")),
];

const GENERIC_TABLE: &[(&str, Entry)] = &[
    ("GN", ("", "Generic GNSS", "", "")),
    ("GP", ("GPS", "GPS", "", "")),
    ("GL", ("GLONASS", "GLONASS", "", "")),
    ("GA", ("Galileo", "Galileo", "", "")),
    ("GB", ("BeiDou", "BeiDou", "", "")),
    ("GQ", ("QZSS", "QZSS", "", "")),
    ("GI", ("NavIC", "NavIC", "", "")),
];

/// Outcome of a lookup, keeping the raw key for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub identity: SatelliteIdentity,
    pub talker: String,
    pub system_id: i64,
    /// False when the key had no table entry
    pub matched: bool,
}

/// Resolves talker / system ID pairs using the configured protocol variant
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver {
    variant: ProtocolVariant,
}

impl IdentityResolver {
    pub fn new(variant: ProtocolVariant) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> ProtocolVariant {
        self.variant
    }

    /// Resolve with whichever table the variant selects
    pub fn resolve(&self, talker: &str, system_id: i64) -> Resolution {
        let entry = match self.variant {
            ProtocolVariant::Generic => lookup_generic(talker),
            ProtocolVariant::VendorExtended => lookup_vendor_extended(talker, system_id),
        };

        Resolution {
            identity: entry.map(to_identity).unwrap_or_default(),
            talker: talker.to_string(),
            system_id,
            matched: entry.is_some(),
        }
    }
}

fn lookup_vendor_extended(talker: &str, system_id: i64) -> Option<Entry> {
    VENDOR_EXTENDED_TABLE
        .iter()
        .find(|(t, id, _)| *t == talker && *id == system_id)
        .map(|(_, _, entry)| *entry)
}

fn lookup_generic(talker: &str) -> Option<Entry> {
    GENERIC_TABLE
        .iter()
        .find(|(t, _)| *t == talker)
        .map(|(_, entry)| *entry)
}

fn to_identity((constellation, name, band, frequency): Entry) -> SatelliteIdentity {
    SatelliteIdentity::new(constellation, name, band, frequency)
}
