//! Tests for sentence decoding

use super::{GGA_SENTENCE, GSA_SENTENCE, GSV_SENTENCE, RMC_SENTENCE, TXT_SENTENCE};
use crate::error::DecodeError;
use crate::nmea::{DecodedSentence, GsvSatellite, decode};

#[test]
fn test_decode_gsa_with_system_id() {
    let DecodedSentence::Gsa(gsa) = decode(GSA_SENTENCE).unwrap() else {
        panic!("expected GSA");
    };

    assert_eq!(gsa.talker, "GN");
    assert_eq!(gsa.mode, "A");
    assert_eq!(gsa.fix_type, "3");
    assert_eq!(gsa.satellites.len(), 9);
    assert_eq!(gsa.pdop, 1.20);
    assert_eq!(gsa.hdop, 0.70);
    assert_eq!(gsa.vdop, 0.97);
    assert_eq!(gsa.system_id, 1);
}

#[test]
fn test_decode_gsa_without_system_id() {
    let sentence = "GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1";
    let DecodedSentence::Gsa(gsa) = decode(sentence).unwrap() else {
        panic!("expected GSA");
    };

    assert_eq!(gsa.system_id, 0);
    assert_eq!(gsa.satellites, vec!["04", "05", "09", "12", "24"]);
    assert_eq!(gsa.hdop, 1.3);
}

#[test]
fn test_decode_gsa_too_short() {
    let err = decode("GPGSA,A,3,04,05").unwrap_err();
    assert!(matches!(err, DecodeError::FieldCount { .. }));
}

#[test]
fn test_decode_gsv_blocks_and_system_id() {
    let DecodedSentence::Gsv(gsv) = decode(GSV_SENTENCE).unwrap() else {
        panic!("expected GSV");
    };

    assert_eq!(gsv.talker, "GP");
    assert_eq!(gsv.message_count, 3);
    assert_eq!(gsv.message_index, 1);
    assert_eq!(gsv.satellites_in_view, 10);
    assert_eq!(gsv.system_id, 1);
    assert_eq!(gsv.satellites.len(), 4);
    assert_eq!(
        gsv.satellites[0],
        GsvSatellite {
            prn: 2,
            elevation: 45,
            azimuth: 120,
            snr: 38
        }
    );
    // Empty SNR means in view but not tracked
    assert_eq!(gsv.satellites[3].snr, 0);
}

#[test]
fn test_decode_gsv_partial_last_message() {
    let DecodedSentence::Gsv(gsv) = decode("GLGSV,3,3,09,80,05,015,22,3").unwrap() else {
        panic!("expected GSV");
    };

    assert_eq!(gsv.satellites.len(), 1);
    assert_eq!(gsv.system_id, 3);
}

#[test]
fn test_decode_gsv_without_satellites() {
    let DecodedSentence::Gsv(gsv) = decode("GAGSV,1,1,00,7").unwrap() else {
        panic!("expected GSV");
    };

    assert!(gsv.satellites.is_empty());
    assert_eq!(gsv.system_id, 7);
}

#[test]
fn test_decode_gsv_bad_block_count() {
    let err = decode("GPGSV,1,1,01,02,45").unwrap_err();
    assert!(matches!(err, DecodeError::FieldCount { .. }));
}

#[test]
fn test_decode_gsv_non_numeric_snr() {
    let err = decode("GPGSV,1,1,01,02,45,120,xx").unwrap_err();
    assert!(matches!(err, DecodeError::InvalidField { field: "SNR", .. }));
}

#[test]
fn test_decode_rmc_validity() {
    let DecodedSentence::Rmc(rmc) = decode(RMC_SENTENCE).unwrap() else {
        panic!("expected RMC");
    };
    assert_eq!(rmc.validity, "A");
    assert!(rmc.is_valid());

    let warning = RMC_SENTENCE.replacen(",A,", ",V,", 1);
    let DecodedSentence::Rmc(rmc) = decode(&warning).unwrap() else {
        panic!("expected RMC");
    };
    assert!(!rmc.is_valid());
}

#[test]
fn test_decode_gga() {
    let DecodedSentence::Gga(gga) = decode(GGA_SENTENCE).unwrap() else {
        panic!("expected GGA");
    };

    assert_eq!(gga.fix_quality, "1");
    assert_eq!(gga.satellites_used, 12);
    assert_eq!(gga.hdop, 0.99);
}

#[test]
fn test_decode_txt_keeps_commas() {
    let DecodedSentence::Txt(txt) = decode(TXT_SENTENCE).unwrap() else {
        panic!("expected TXT");
    };
    assert_eq!(txt.message, "u-blox AG - www.u-blox.com");

    let DecodedSentence::Txt(txt) = decode("GNTXT,01,01,02,ANTSTATUS=OK,POWER").unwrap() else {
        panic!("expected TXT");
    };
    assert_eq!(txt.message, "ANTSTATUS=OK,POWER");
}

#[test]
fn test_decode_unknown_type() {
    let decoded = decode("GNVTG,,T,,M,0.011,N,0.021,K,A").unwrap();
    assert_eq!(
        decoded,
        DecodedSentence::Unknown {
            talker: "GN".to_string(),
            sentence_type: "VTG".to_string(),
        }
    );
    assert_eq!(decoded.sentence_type(), "VTG");
}

#[test]
fn test_decode_proprietary_sentence() {
    let decoded = decode("PUBX,00,081350.00,4717.113210,N").unwrap();
    assert_eq!(decoded.sentence_type(), "UBX");
}

#[test]
fn test_framing_and_checksum_are_ignored() {
    let framed = format!("${}*FF\r\n", GGA_SENTENCE);
    assert_eq!(decode(&framed).unwrap(), decode(GGA_SENTENCE).unwrap());
}

#[test]
fn test_decode_rejects_bad_talker() {
    assert_eq!(decode("").unwrap_err(), DecodeError::Empty);
    assert!(matches!(
        decode("gp,1,2,3").unwrap_err(),
        DecodeError::InvalidTalker { .. }
    ));
    assert!(matches!(
        decode("G,1,2").unwrap_err(),
        DecodeError::InvalidTalker { .. }
    ));
}
