//! # State Store
//!
//! The latest value asserted by any decoded sentence, one slot per exposed value.
//!
//! Every slot starts out as [`None`]. A decoder overwrites the slots its sentence type owns
//! and only those; a field the sentence left empty is not an assertion and leaves the slot
//! as it was.

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::nmea_content::{
    AlarmCondition, AlarmState, FaaMode, FixMode, Quality, Satellite, SelectionMode, SentenceId,
    SpeedUnit, Status, WindReference,
};

/// Maximum number of satellites kept from GSA and GSV sentences.
pub const MAX_SATELLITES: usize = 12;

/// Maximum length of the alarm description of ALR sentences.
pub const ALARM_TEXT_LEN: usize = 64;

/// Maximum length of an AIS payload.
pub const AIS_PAYLOAD_LEN: usize = 82;

/// Maximum length of the text of TXT sentences.
pub const TEXT_LEN: usize = 61;

/// The latest values decoded from any sentence.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct State {
    /// Talker identifier of the last decoded sentence
    pub talker: Option<heapless::String<2>>,
    /// Type of the last decoded sentence
    pub last_sentence: Option<SentenceId>,

    /// UTC time of the last fix or time report (GGA, GLL, RMC, ZDA)
    pub time: Option<time::Time>,
    /// UTC date (RMC, ZDA)
    pub date: Option<time::Date>,
    /// Local zone offset from UTC (ZDA)
    pub utc_offset: Option<time::UtcOffset>,

    /// Latitude in degrees, negative south (GGA, GLL, RMC)
    pub latitude: Option<f64>,
    /// Longitude in degrees, negative west (GGA, GLL, RMC)
    pub longitude: Option<f64>,
    /// GPS quality indicator (GGA)
    pub fix_quality: Option<Quality>,
    /// Number of satellites in use (GGA)
    pub satellites_used: Option<u8>,
    /// Horizontal dilution of precision (GGA, GSA)
    pub hdop: Option<f32>,
    /// Position dilution of precision (GSA)
    pub pdop: Option<f32>,
    /// Vertical dilution of precision (GSA)
    pub vdop: Option<f32>,
    /// Altitude above mean sea level in metres (GGA)
    pub altitude: Option<f32>,
    /// Geoidal separation in metres (GGA)
    pub geoidal_separation: Option<f32>,

    /// Status of the navigation data (GLL, RMC)
    pub status: Option<Status>,
    /// FAA mode indicator (GLL, RMC, VTG)
    pub faa_mode: Option<FaaMode>,
    /// Speed over ground in knots (RMC, VTG)
    pub speed_knots: Option<f32>,
    /// Speed over ground in kilometres per hour (VTG)
    pub speed_kmh: Option<f32>,
    /// Course over ground in degrees true (RMC, VTG)
    pub course_true: Option<f32>,
    /// Course over ground in degrees magnetic (VTG)
    pub course_magnetic: Option<f32>,
    /// Magnetic variation in degrees, negative west (RMC)
    pub magnetic_variation: Option<f32>,

    /// Satellite selection mode (GSA)
    pub selection_mode: Option<SelectionMode>,
    /// Fix mode (GSA)
    pub fix_mode: Option<FixMode>,
    /// PRNs of the satellites used in the fix (GSA)
    pub active_satellites: heapless::Vec<u8, MAX_SATELLITES>,
    /// Total number of satellites in view (GSV)
    pub satellites_in_view: Option<u8>,
    /// Satellites reported by the current GSV group (GSV)
    pub satellites: heapless::Vec<Satellite, MAX_SATELLITES>,

    /// Depth below the transducer in metres (DBT)
    pub depth_below_transducer: Option<f32>,
    /// Water depth relative to the transducer in metres (DPT)
    pub depth: Option<f32>,
    /// Offset from the transducer in metres (DPT)
    pub depth_offset: Option<f32>,

    /// Heading in degrees true (HDT)
    pub heading_true: Option<f32>,

    /// Wind angle in degrees (MWV)
    pub wind_angle: Option<f32>,
    /// Wind angle reference (MWV)
    pub wind_reference: Option<WindReference>,
    /// Wind speed, in [`State::wind_speed_unit`] (MWV)
    pub wind_speed: Option<f32>,
    /// Wind speed unit (MWV)
    pub wind_speed_unit: Option<SpeedUnit>,

    /// Time the alarm condition changed (ALR)
    pub alarm_time: Option<time::Time>,
    /// Alarm identifier (ALR)
    pub alarm_id: Option<u16>,
    /// Alarm condition (ALR)
    pub alarm_condition: Option<AlarmCondition>,
    /// Alarm acknowledge state (ALR)
    pub alarm_state: Option<AlarmState>,
    /// Alarm description (ALR)
    pub alarm_text: Option<heapless::String<ALARM_TEXT_LEN>>,
    /// Identifier of the last acknowledged alarm (ACK)
    pub acknowledged_alarm_id: Option<u16>,

    /// Number of fragments of the current AIS message (VDM, VDO)
    pub ais_fragments: Option<u8>,
    /// Fragment number of the last AIS fragment (VDM, VDO)
    pub ais_fragment: Option<u8>,
    /// Sequential message identifier of the last AIS fragment, [`None`] when it carried
    /// none (VDM, VDO)
    pub ais_sequence: Option<u8>,
    /// AIS radio channel (VDM, VDO)
    pub ais_channel: Option<char>,
    /// Armored AIS payload (VDM, VDO)
    pub ais_payload: Option<heapless::String<AIS_PAYLOAD_LEN>>,
    /// Number of fill bits of the AIS payload (VDM, VDO)
    pub ais_fill_bits: Option<u8>,
    /// Whether the last AIS fragment reports the own vessel (VDO) or another one (VDM)
    pub ais_own_ship: Option<bool>,

    /// Text identifier (TXT)
    pub text_id: Option<u8>,
    /// Text message (TXT)
    pub text: Option<heapless::String<TEXT_LEN>>,
}

impl State {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Overwrites `slot` when the sentence reported a value.
pub(crate) fn update<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}
