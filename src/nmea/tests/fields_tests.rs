//! Tests for numeric field helpers

use super::super::fields::{parse_float, parse_int, require_fields};
use crate::error::DecodeError;

#[test]
fn test_empty_fields_read_as_zero() {
    assert_eq!(parse_int("GSV", "SNR", "").unwrap(), 0);
    assert_eq!(parse_int("GSV", "SNR", "  ").unwrap(), 0);
    assert_eq!(parse_float("GSA", "PDOP", "").unwrap(), 0.0);
}

#[test]
fn test_numeric_fields_parse() {
    assert_eq!(parse_int("GSV", "PRN", "07").unwrap(), 7);
    assert_eq!(parse_int("GSV", "elevation", "-3").unwrap(), -3);
    assert_eq!(parse_float("GSA", "HDOP", "0.70").unwrap(), 0.7);
}

#[test]
fn test_invalid_fields_are_errors() {
    let err = parse_int("GSV", "SNR", "4x").unwrap_err();
    assert_eq!(
        err,
        DecodeError::InvalidField {
            sentence_type: "GSV".to_string(),
            field: "SNR",
            value: "4x".to_string(),
        }
    );

    assert!(parse_float("GSA", "PDOP", "one").is_err());
    assert!(parse_float("GSA", "PDOP", "NaN").is_err());
}

#[test]
fn test_require_fields() {
    let fields = ["a", "b", "c"];
    assert!(require_fields("TXT", &fields, 3).is_ok());

    match require_fields("TXT", &fields, 4) {
        Err(DecodeError::FieldCount { found, .. }) => assert_eq!(found, 3),
        other => panic!("expected field count error, got {:?}", other),
    }
}
