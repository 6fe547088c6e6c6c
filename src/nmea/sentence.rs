//! Typed records for the supported sentence kinds

/// GNSS DOP and active satellites
#[derive(Debug, Clone, PartialEq)]
pub struct Gsa {
    pub talker: String,
    /// Selection mode, `M` manual or `A` automatic
    pub mode: String,
    /// 1 = no fix, 2 = 2D, 3 = 3D
    pub fix_type: String,
    /// PRNs of satellites used in the solution (empty slots dropped)
    pub satellites: Vec<String>,
    pub pdop: f64,
    pub hdop: f64,
    pub vdop: f64,
    /// NMEA 4.11 system ID, 0 when absent
    pub system_id: i64,
}

/// One satellite block inside a GSV sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GsvSatellite {
    pub prn: i64,
    pub elevation: i64,
    pub azimuth: i64,
    pub snr: i64,
}

/// GNSS satellites in view
#[derive(Debug, Clone, PartialEq)]
pub struct Gsv {
    pub talker: String,
    pub message_count: i64,
    pub message_index: i64,
    pub satellites_in_view: i64,
    pub satellites: Vec<GsvSatellite>,
    /// NMEA 4.11 signal/system ID, 0 when absent
    pub system_id: i64,
}

/// Recommended minimum navigation data
#[derive(Debug, Clone, PartialEq)]
pub struct Rmc {
    pub talker: String,
    /// Raw validity code, `A` valid or `V` warning
    pub validity: String,
}

impl Rmc {
    pub fn is_valid(&self) -> bool {
        self.validity == "A"
    }
}

/// Fix data
#[derive(Debug, Clone, PartialEq)]
pub struct Gga {
    pub talker: String,
    pub fix_quality: String,
    pub satellites_used: i64,
    pub hdop: f64,
}

/// Free-text receiver message
#[derive(Debug, Clone, PartialEq)]
pub struct Txt {
    pub talker: String,
    pub total: i64,
    pub number: i64,
    pub id: i64,
    pub message: String,
}

/// A successfully decoded sentence
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedSentence {
    Gsa(Gsa),
    Gsv(Gsv),
    Rmc(Rmc),
    Gga(Gga),
    Txt(Txt),
    /// Well-formed sentence of a type the exporter does not aggregate
    Unknown { talker: String, sentence_type: String },
}

impl DecodedSentence {
    /// Three-letter sentence type, e.g. `GSV`
    pub fn sentence_type(&self) -> &str {
        match self {
            DecodedSentence::Gsa(_) => "GSA",
            DecodedSentence::Gsv(_) => "GSV",
            DecodedSentence::Rmc(_) => "RMC",
            DecodedSentence::Gga(_) => "GGA",
            DecodedSentence::Txt(_) => "TXT",
            DecodedSentence::Unknown { sentence_type, .. } => sentence_type,
        }
    }
}
