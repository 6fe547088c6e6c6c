//! Tests for the ingestion pipeline

pub mod pipeline_tests;

use crate::error::{ExporterError, Result};
use crate::identity::{IdentityResolver, ProtocolVariant};
use crate::models::Epoch;
use crate::pipeline::Pipeline;
use crate::sink::EpochSink;
use std::sync::{Arc, Mutex};

pub const GSA_LINE: &str = "ts2phc[1734.101]: nmea sentence: GNGSA,A,3,02,05,13,15,,,,,,,,,1.90,1.10,1.50,1";
pub const GSV_LINE: &str = "ts2phc[1734.102]: nmea sentence: GPGSV,1,1,04,02,45,120,30,05,30,250,00,13,60,080,25,15,10,310,40,1";
pub const GGA_LINE: &str = "ts2phc[1734.103]: nmea sentence: GNGGA,123519.00,4807.03800,N,01131.00000,E,1,03,0.99,545.4,M,46.9,M,,";
pub const RMC_LINE: &str = "ts2phc[1734.104]: nmea sentence: GNRMC,123519.00,A,4807.03800,N,01131.00000,E,0.011,,230394,,,A,V";
pub const OFFSET_LINE: &str = "ts2phc[1734.600]: /dev/ptp0 offset       -120 s2 freq      +340";

/// Sink that keeps a copy of every published epoch
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub epochs: Arc<Mutex<Vec<Epoch>>>,
}

impl RecordingSink {
    pub fn published(&self) -> Vec<Epoch> {
        self.epochs.lock().unwrap().clone()
    }
}

impl EpochSink for RecordingSink {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn publish(&mut self, epoch: &Epoch) -> Result<()> {
        self.epochs.lock().unwrap().push(epoch.clone());
        Ok(())
    }
}

/// Sink that rejects every epoch
pub struct FailingSink;

impl EpochSink for FailingSink {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn publish(&mut self, _epoch: &Epoch) -> Result<()> {
        Err(ExporterError::configuration("sink rejected epoch"))
    }
}

/// Vendor-extended pipeline publishing to a recording sink
pub fn recording_pipeline() -> (Pipeline, RecordingSink) {
    let sink = RecordingSink::default();
    let pipeline = Pipeline::new(
        IdentityResolver::new(ProtocolVariant::VendorExtended),
        vec![Box::new(sink.clone())],
    )
    .unwrap();
    (pipeline, sink)
}
