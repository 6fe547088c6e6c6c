//! Field parsing utilities for NMEA sentences
//!
//! NMEA leaves unknown values empty; empty numeric fields read as zero,
//! while non-empty fields that fail to parse are a decode error.

use crate::error::DecodeError;

/// Parse an integer field, treating an empty field as zero
pub fn parse_int(sentence_type: &str, field: &'static str, value: &str) -> Result<i64, DecodeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    trimmed
        .parse::<i64>()
        .map_err(|_| invalid_field(sentence_type, field, value))
}

/// Parse a decimal field, treating an empty field as zero
pub fn parse_float(
    sentence_type: &str,
    field: &'static str,
    value: &str,
) -> Result<f64, DecodeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    match trimmed.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(parsed),
        _ => Err(invalid_field(sentence_type, field, value)),
    }
}

/// Require at least `expected` fields
pub fn require_fields(
    sentence_type: &str,
    fields: &[&str],
    expected: usize,
) -> Result<(), DecodeError> {
    if fields.len() < expected {
        return Err(DecodeError::FieldCount {
            sentence_type: sentence_type.to_string(),
            expected: format!("at least {}", expected),
            found: fields.len(),
        });
    }
    Ok(())
}

fn invalid_field(sentence_type: &str, field: &'static str, value: &str) -> DecodeError {
    DecodeError::InvalidField {
        sentence_type: sentence_type.to_string(),
        field,
        value: value.to_string(),
    }
}
