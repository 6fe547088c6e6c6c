//! Tests for per-line processing

#![allow(clippy::float_cmp)]

use super::*;
use crate::aggregator::tests::at;
use crate::error::DecodeError;
use crate::models::SatelliteIdentity;
use crate::pipeline::LineOutcome;

fn gps_l1() -> SatelliteIdentity {
    SatelliteIdentity::new("GPS", "GPS L1", "1", "L1")
}

#[test]
fn test_end_to_end_epoch() {
    let (mut pipeline, sink) = recording_pipeline();

    for line in [GSA_LINE, GSV_LINE, GGA_LINE] {
        assert_eq!(pipeline.process_line(line, at(1)), LineOutcome::Aggregated);
    }
    let outcome = pipeline.process_line(OFFSET_LINE, at(2));

    let published = sink.published();
    assert_eq!(published.len(), 1);
    let epoch = &published[0];
    assert_eq!(outcome, LineOutcome::Flushed(epoch.clone()));

    assert_eq!(epoch.satellite_counts.get(&gps_l1()), Some(&3));
    assert_eq!(epoch.samples.len(), 4);
    assert_eq!(epoch.total_satellites_used, 3);
    assert_eq!(epoch.hdop, 1.1);
    assert_eq!(epoch.device, "/dev/ptp0");
    assert_eq!(epoch.offset_ns, -120);
    assert_eq!(epoch.freq_ppb, 340);
    assert_eq!(epoch.started_at, Some(at(1)));

    // Live epoch starts over, carrying only the closing report
    let live = pipeline.aggregator().epoch();
    assert!(live.satellite_counts.is_empty());
    assert!(live.samples.is_empty());
    assert_eq!(live.total_satellites_used, 0);
    assert_eq!(live.hdop, 0.0);
    assert_eq!(live.device, "/dev/ptp0");
    assert_eq!(live.offset_ns, -120);
    assert_eq!(live.freq_ppb, 340);
}

#[test]
fn test_malformed_offset_still_flushes() {
    let (mut pipeline, sink) = recording_pipeline();

    pipeline.process_line(RMC_LINE, at(1));
    let outcome = pipeline.process_line("ts2phc[1.0]: /dev/ptp1 offset bogus s2 freq +12", at(2));

    assert!(matches!(outcome, LineOutcome::Flushed(_)));
    let published = sink.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].device, "/dev/ptp1");
    assert_eq!(published[0].offset_ns, 0);
    assert_eq!(published[0].freq_ppb, 12);
    assert!(published[0].locked);
}

#[test]
fn test_decode_failure_leaves_epoch_untouched() {
    let (mut pipeline, _sink) = recording_pipeline();
    pipeline.process_line(GSV_LINE, at(1));
    let before = pipeline.aggregator().epoch().clone();

    let outcome = pipeline.process_line("x nmea sentence: GPGSV,1,1,04,02,45", at(2));
    assert!(matches!(
        outcome,
        LineOutcome::DecodeFailed(DecodeError::FieldCount { .. })
    ));
    assert_eq!(pipeline.aggregator().epoch(), &before);
    assert_eq!(pipeline.stats().decode_failures, 1);
}

#[test]
fn test_unknown_talker_is_counted_not_dropped() {
    let (mut pipeline, sink) = recording_pipeline();

    pipeline.process_line("nmea sentence: ZZGSV,1,1,02,07,10,200,33,08,12,210,0,9", at(1));
    pipeline.process_line(OFFSET_LINE, at(2));

    let epoch = &sink.published()[0];
    assert_eq!(epoch.samples.len(), 2);
    assert_eq!(epoch.samples[0].talker, "ZZ");
    assert_eq!(epoch.samples[0].system_id, 9);
    assert!(epoch.samples[0].identity.is_unresolved());
    assert_eq!(epoch.satellite_counts.get(&SatelliteIdentity::default()), Some(&1));
}

#[test]
fn test_unrelated_and_unknown_lines() {
    let (mut pipeline, sink) = recording_pipeline();

    assert_eq!(
        pipeline.process_line("ts2phc[1.0]: port 1: new foreign master", at(1)),
        LineOutcome::Ignored
    );
    assert_eq!(
        pipeline.process_line("nmea sentence: GNZDA,123519.00,01,05,2024,00,00", at(1)),
        LineOutcome::Aggregated
    );
    assert_eq!(
        pipeline.process_line("nmea sentence: GNZDA,123520.00,01,05,2024,00,00", at(1)),
        LineOutcome::Aggregated
    );

    assert!(sink.published().is_empty());
    assert!(pipeline.aggregator().unknown_types().contains("ZDA"));
    assert_eq!(pipeline.stats().unknown_sentences, 2);
    assert_eq!(pipeline.stats().unmatched_lines, 1);
}

#[test]
fn test_failing_sink_does_not_stop_ingestion() {
    let recording = RecordingSink::default();
    let mut pipeline = Pipeline::new(
        IdentityResolver::default(),
        vec![Box::new(FailingSink), Box::new(recording.clone())],
    )
    .unwrap();

    pipeline.process_line(GSV_LINE, at(1));
    pipeline.process_line(OFFSET_LINE, at(2));
    pipeline.process_line(GSV_LINE, at(3));
    pipeline.process_line(OFFSET_LINE, at(4));

    assert_eq!(recording.published().len(), 2);
    assert_eq!(pipeline.stats().sink_failures, 2);
    assert_eq!(pipeline.stats().epochs_flushed, 2);
}

#[test]
fn test_epochs_do_not_overlap() {
    let (mut pipeline, sink) = recording_pipeline();

    pipeline.process_line(GSV_LINE, at(1));
    pipeline.process_line(OFFSET_LINE, at(2));
    pipeline.process_line(GSV_LINE, at(3));
    pipeline.process_line(GSV_LINE, at(4));
    pipeline.process_line(OFFSET_LINE, at(5));

    let published = sink.published();
    assert_eq!(published[0].samples.len(), 4);
    assert_eq!(published[1].samples.len(), 8);
    assert_eq!(published[1].satellite_counts.get(&gps_l1()), Some(&6));
    assert_eq!(published[1].started_at, Some(at(3)));
}
