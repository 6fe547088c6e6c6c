//! Tests for epoch sinks


use crate::models::{Epoch, SatelliteIdentity, SatelliteSample};
use chrono::{TimeZone, Utc};

pub fn gps_l1() -> SatelliteIdentity {
    SatelliteIdentity::new("GPS", "GPS L1", "1", "L1")
}

/// Epoch with three GPS L1 samples, two of them tracked
pub fn sample_epoch() -> Epoch {
    let identity = gps_l1();
    let samples = [(2, 38), (5, 0), (13, 42)]
        .into_iter()
        .map(|(prn, snr)| SatelliteSample {
            identity: identity.clone(),
            talker: "GP".to_string(),
            system_id: 1,
            satellite_id: prn,
            azimuth: 120,
            elevation: 45,
            snr,
        })
        .collect();

    let mut epoch = Epoch {
        started_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
        samples,
        pdop: 1.2,
        vdop: 0.97,
        hdop: 0.7,
        locked: true,
        device: "/dev/ptp0".to_string(),
        offset_ns: -120,
        freq_ppb: 340,
        ..Epoch::default()
    };
    epoch.satellite_counts.insert(identity, 2);
    epoch
}
