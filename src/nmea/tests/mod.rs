//! Tests for the NMEA decoder

pub mod decoder_tests;
pub mod fields_tests;

/// Sample sentences as logged by ts2phc from a u-blox F9T
pub const GSA_SENTENCE: &str = "GNGSA,A,3,02,05,13,15,18,20,23,24,29,,,,1.20,0.70,0.97,1";
pub const GSV_SENTENCE: &str =
    "GPGSV,3,1,10,02,45,120,38,05,30,250,0,13,60,080,42,15,10,310,,1";
pub const RMC_SENTENCE: &str =
    "GNRMC,123519.00,A,4807.03800,N,01131.00000,E,0.011,,230394,,,A,V";
pub const GGA_SENTENCE: &str =
    "GNGGA,123519.00,4807.03800,N,01131.00000,E,1,12,0.99,545.4,M,46.9,M,,";
pub const TXT_SENTENCE: &str = "GNTXT,01,01,02,u-blox AG - www.u-blox.com";
