//! Structural decoding of checksum-free NMEA sentences

use super::fields::{parse_float, parse_int, require_fields};
use super::sentence::{DecodedSentence, Gga, Gsa, Gsv, GsvSatellite, Rmc, Txt};
use crate::error::DecodeError;

/// Fields in a GSA sentence before the optional system ID
const GSA_FIELDS: usize = 17;
/// Leading GSV fields before the satellite blocks
const GSV_HEADER_FIELDS: usize = 3;
/// Fields per satellite block in GSV
const GSV_BLOCK_FIELDS: usize = 4;
const RMC_FIELDS: usize = 11;
const GGA_FIELDS: usize = 14;
const TXT_FIELDS: usize = 4;

/// Decode one sentence.
///
/// The leading `$` and a trailing `*hh` checksum are optional and the
/// checksum is never verified.
pub fn decode(raw: &str) -> Result<DecodedSentence, DecodeError> {
    let body = strip_framing(raw);
    if body.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut parts = body.split(',');
    let address = parts.next().unwrap_or_default();
    let fields: Vec<&str> = parts.collect();
    let (talker, sentence_type) = split_address(address)?;

    match sentence_type {
        "GSA" => decode_gsa(talker, &fields).map(DecodedSentence::Gsa),
        "GSV" => decode_gsv(talker, &fields).map(DecodedSentence::Gsv),
        "RMC" => decode_rmc(talker, &fields).map(DecodedSentence::Rmc),
        "GGA" => decode_gga(talker, &fields).map(DecodedSentence::Gga),
        "TXT" => decode_txt(talker, &fields).map(DecodedSentence::Txt),
        _ => Ok(DecodedSentence::Unknown {
            talker: talker.to_string(),
            sentence_type: sentence_type.to_string(),
        }),
    }
}

fn strip_framing(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix('$')
        .or_else(|| trimmed.strip_prefix('!'))
        .unwrap_or(trimmed);

    match trimmed.rfind('*') {
        Some(star) => &trimmed[..star],
        None => trimmed,
    }
}

/// Split `GPGSV` into (`GP`, `GSV`); proprietary `P...` addresses get talker `P`
fn split_address(address: &str) -> Result<(&str, &str), DecodeError> {
    let well_formed = address.len() >= 3
        && address
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
    if !well_formed {
        return Err(DecodeError::InvalidTalker {
            field: address.to_string(),
        });
    }

    if address.starts_with('P') {
        Ok(address.split_at(1))
    } else {
        Ok(address.split_at(2))
    }
}

fn decode_gsa(talker: &str, fields: &[&str]) -> Result<Gsa, DecodeError> {
    require_fields("GSA", fields, GSA_FIELDS)?;

    let satellites = fields[2..14]
        .iter()
        .map(|sv| sv.trim())
        .filter(|sv| !sv.is_empty())
        .map(str::to_string)
        .collect();

    let system_id = match fields.get(GSA_FIELDS) {
        Some(value) => parse_int("GSA", "system ID", value)?,
        None => 0,
    };

    Ok(Gsa {
        talker: talker.to_string(),
        mode: fields[0].to_string(),
        fix_type: fields[1].to_string(),
        satellites,
        pdop: parse_float("GSA", "PDOP", fields[14])?,
        hdop: parse_float("GSA", "HDOP", fields[15])?,
        vdop: parse_float("GSA", "VDOP", fields[16])?,
        system_id,
    })
}

fn decode_gsv(talker: &str, fields: &[&str]) -> Result<Gsv, DecodeError> {
    require_fields("GSV", fields, GSV_HEADER_FIELDS)?;

    let remainder = fields.len() - GSV_HEADER_FIELDS;
    let (blocks, system_id) = match remainder % GSV_BLOCK_FIELDS {
        0 => (&fields[GSV_HEADER_FIELDS..], 0),
        1 => {
            let last = fields.len() - 1;
            (
                &fields[GSV_HEADER_FIELDS..last],
                parse_int("GSV", "system ID", fields[last])?,
            )
        }
        _ => {
            return Err(DecodeError::FieldCount {
                sentence_type: "GSV".to_string(),
                expected: "3 + 4n, optionally followed by a system ID".to_string(),
                found: fields.len(),
            });
        }
    };

    let satellites = blocks
        .chunks_exact(GSV_BLOCK_FIELDS)
        .map(|block| -> Result<GsvSatellite, DecodeError> {
            Ok(GsvSatellite {
                prn: parse_int("GSV", "PRN", block[0])?,
                elevation: parse_int("GSV", "elevation", block[1])?,
                azimuth: parse_int("GSV", "azimuth", block[2])?,
                snr: parse_int("GSV", "SNR", block[3])?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Gsv {
        talker: talker.to_string(),
        message_count: parse_int("GSV", "total messages", fields[0])?,
        message_index: parse_int("GSV", "message number", fields[1])?,
        satellites_in_view: parse_int("GSV", "satellites in view", fields[2])?,
        satellites,
        system_id,
    })
}

fn decode_rmc(talker: &str, fields: &[&str]) -> Result<Rmc, DecodeError> {
    require_fields("RMC", fields, RMC_FIELDS)?;

    Ok(Rmc {
        talker: talker.to_string(),
        validity: fields[1].trim().to_string(),
    })
}

fn decode_gga(talker: &str, fields: &[&str]) -> Result<Gga, DecodeError> {
    require_fields("GGA", fields, GGA_FIELDS)?;

    Ok(Gga {
        talker: talker.to_string(),
        fix_quality: fields[5].trim().to_string(),
        satellites_used: parse_int("GGA", "satellites used", fields[6])?,
        hdop: parse_float("GGA", "HDOP", fields[7])?,
    })
}

fn decode_txt(talker: &str, fields: &[&str]) -> Result<Txt, DecodeError> {
    require_fields("TXT", fields, TXT_FIELDS)?;

    Ok(Txt {
        talker: talker.to_string(),
        total: parse_int("TXT", "total", fields[0])?,
        number: parse_int("TXT", "number", fields[1])?,
        id: parse_int("TXT", "id", fields[2])?,
        // The message itself may contain commas
        message: fields[3..].join(","),
    })
}
