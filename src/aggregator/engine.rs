//! Per-sentence update rules and the flush/reset transition

use super::unknown::UnknownSentenceLog;
use crate::identity::IdentityResolver;
use crate::models::{Epoch, OffsetReport, SatelliteSample};
use crate::nmea::{DecodedSentence, Gsa, Gsv};
use chrono::{DateTime, Utc};
use std::mem;
use tracing::debug;

/// Accumulates decoded sentences into the live epoch.
///
/// Not synchronized: feed it from a single task, in log order.
#[derive(Debug, Default)]
pub struct EpochAggregator {
    resolver: IdentityResolver,
    epoch: Epoch,
    unknown_types: UnknownSentenceLog,
}

impl EpochAggregator {
    pub fn new(resolver: IdentityResolver) -> Self {
        Self {
            resolver,
            epoch: Epoch::default(),
            unknown_types: UnknownSentenceLog::new(),
        }
    }

    /// The epoch currently being accumulated
    pub fn epoch(&self) -> &Epoch {
        &self.epoch
    }

    pub fn unknown_types(&self) -> &UnknownSentenceLog {
        &self.unknown_types
    }

    /// Fold one decoded sentence into the live epoch
    pub fn apply(&mut self, sentence: &DecodedSentence, arrival: DateTime<Utc>) {
        self.epoch.started_at.get_or_insert(arrival);

        match sentence {
            DecodedSentence::Gsa(gsa) => self.apply_gsa(gsa),
            DecodedSentence::Gsv(gsv) => self.apply_gsv(gsv),
            DecodedSentence::Rmc(rmc) => {
                debug!(validity = %rmc.validity, "Parsed RMC");
                self.epoch.locked = rmc.is_valid();
            }
            DecodedSentence::Gga(gga) => {
                debug!(
                    fix_quality = %gga.fix_quality,
                    satellites = gga.satellites_used,
                    hdop = gga.hdop,
                    "Parsed GGA"
                );
                self.epoch.total_satellites_used = gga.satellites_used;
                self.epoch.hdop_from_fix = gga.hdop;
            }
            DecodedSentence::Txt(txt) => {
                debug!(
                    seq = %format!("{} of {}", txt.number, txt.total),
                    message = %txt.message,
                    "Parsed TXT"
                );
            }
            DecodedSentence::Unknown {
                talker,
                sentence_type,
            } => {
                self.unknown_types.observe(talker, sentence_type);
            }
        }
    }

    /// Close the live epoch with `report` and start a new one.
    ///
    /// The returned epoch is owned by the caller; the live epoch is replaced
    /// before this returns.
    pub fn complete(&mut self, report: OffsetReport, arrival: DateTime<Utc>) -> Epoch {
        let next = Epoch::following(&report);
        let mut flushed = mem::replace(&mut self.epoch, next);

        flushed.started_at.get_or_insert(arrival);
        flushed.device = report.device;
        flushed.offset_ns = report.offset_ns;
        flushed.freq_ppb = report.freq_ppb;

        debug!(
            device = %flushed.device,
            offset = flushed.offset_ns,
            freq = flushed.freq_ppb,
            samples = flushed.samples.len(),
            "Epoch complete"
        );

        flushed
    }

    fn apply_gsa(&mut self, gsa: &Gsa) {
        let resolution = self.resolver.resolve(&gsa.talker, gsa.system_id);
        debug!(
            mode = %gsa.mode,
            fix_type = %gsa.fix_type,
            sv = ?gsa.satellites,
            pdop = gsa.pdop,
            hdop = gsa.hdop,
            vdop = gsa.vdop,
            system = %resolution.identity.name,
            band = %resolution.identity.band,
            "Parsed GSA"
        );

        self.epoch.pdop = gsa.pdop;
        self.epoch.vdop = gsa.vdop;
        self.epoch.hdop = gsa.hdop;
    }

    fn apply_gsv(&mut self, gsv: &Gsv) {
        let resolution = self.resolver.resolve(&gsv.talker, gsv.system_id);
        if !resolution.matched {
            debug!(
                talker = %resolution.talker,
                system_id = resolution.system_id,
                "No identity for GSV talker/system ID, counting under an empty identity"
            );
        }
        debug!(
            seq = %format!("{} of {}", gsv.message_index, gsv.message_count),
            in_view = gsv.satellites_in_view,
            reported = gsv.satellites.len(),
            system = %resolution.identity.name,
            band = %resolution.identity.band,
            "Parsed GSV"
        );

        let tracked = gsv.satellites.iter().filter(|sv| sv.snr > 0).count() as u64;

        self.epoch
            .samples
            .extend(gsv.satellites.iter().map(|sv| SatelliteSample {
                identity: resolution.identity.clone(),
                talker: resolution.talker.clone(),
                system_id: resolution.system_id,
                satellite_id: sv.prn,
                azimuth: sv.azimuth,
                elevation: sv.elevation,
                snr: sv.snr,
            }));

        *self
            .epoch
            .satellite_counts
            .entry(resolution.identity)
            .or_insert(0) += tracked;
    }
}
