//! NMEA sentence decoder for sentences embedded in ts2phc logs
//!
//! Only the sentence types the exporter aggregates are decoded into typed
//! records; every other well-formed sentence becomes
//! [`DecodedSentence::Unknown`]. Checksums are stripped but not verified.
//!
//! ## Architecture
//!
//! - [`decoder`] - Talker/type split and per-type structural parsing
//! - [`sentence`] - The [`DecodedSentence`] sum type and its records
//! - [`fields`] - Numeric field helpers with NMEA empty-field semantics

pub mod decoder;
pub mod fields;
pub mod sentence;

#[cfg(test)]
pub mod tests;

pub use decoder::decode;
pub use sentence::{DecodedSentence, Gga, Gsa, Gsv, GsvSatellite, Rmc, Txt};
