//! Tests for epoch aggregation


use crate::nmea::{DecodedSentence, Gga, Gsa, Gsv, GsvSatellite, Rmc};
use chrono::{DateTime, TimeZone, Utc};

pub fn at(second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, second).unwrap()
}

/// GSV sentence with one satellite per SNR value, PRNs numbered from 1
pub fn gsv(talker: &str, system_id: i64, snrs: &[i64]) -> DecodedSentence {
    DecodedSentence::Gsv(Gsv {
        talker: talker.to_string(),
        message_count: 1,
        message_index: 1,
        satellites_in_view: snrs.len() as i64,
        satellites: snrs
            .iter()
            .enumerate()
            .map(|(i, &snr)| GsvSatellite {
                prn: i as i64 + 1,
                elevation: 30,
                azimuth: 90 * i as i64,
                snr,
            })
            .collect(),
        system_id,
    })
}

pub fn gsa(pdop: f64, hdop: f64, vdop: f64) -> DecodedSentence {
    DecodedSentence::Gsa(Gsa {
        talker: "GN".to_string(),
        mode: "A".to_string(),
        fix_type: "3".to_string(),
        satellites: vec!["02".to_string(), "05".to_string()],
        pdop,
        hdop,
        vdop,
        system_id: 1,
    })
}

pub fn gga(satellites_used: i64, hdop: f64) -> DecodedSentence {
    DecodedSentence::Gga(Gga {
        talker: "GN".to_string(),
        fix_quality: "1".to_string(),
        satellites_used,
        hdop,
    })
}

pub fn rmc(validity: &str) -> DecodedSentence {
    DecodedSentence::Rmc(Rmc {
        talker: "GN".to_string(),
        validity: validity.to_string(),
    })
}
