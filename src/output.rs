//! # Output Serializer
//!
//! Renders a [`State`] into a caller-supplied buffer, either as a fixed-size binary
//! snapshot ([`OutputMode::Raw`]) or as a fixed-schema JSON object ([`OutputMode::Json`]).
//!
//! Rendering only reads the store; a failed read leaves it as it was.

use serde::Serialize;
use zerocopy::{
    FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout, Unaligned,
    little_endian::{F32, F64, I16, U16, U32, U64},
};

use crate::{
    Error,
    config::OutputMode,
    nmea_content::Satellite,
    state::{AIS_PAYLOAD_LEN, ALARM_TEXT_LEN, MAX_SATELLITES, State, TEXT_LEN},
};

/// Renders `state` into `buf` and returns the number of bytes written.
///
/// * [`OutputMode::Raw`] writes exactly [`RawSnapshot::SIZE`] bytes.
/// * [`OutputMode::Json`] writes the JSON text followed by a NUL terminator, and returns the
///   length of the text alone.
///
/// # Errors
///
/// [`Error::BufferTooSmall`] if the rendering (terminator included) does not fit.
///
/// # Examples
///
/// ```rust
/// use nmea0183_ingest::{OutputMode, State, output::{self, RawSnapshot}};
///
/// let state = State::default();
///
/// let mut buf = [0u8; RawSnapshot::SIZE];
/// assert_eq!(output::write(&state, OutputMode::Raw, &mut buf), Ok(RawSnapshot::SIZE));
///
/// let mut buf = [0u8; 2048];
/// let len = output::write(&state, OutputMode::Json, &mut buf).unwrap();
/// assert!(buf[..len].starts_with(b"{\"talker\":null"));
/// assert_eq!(buf[len], 0);
/// ```
pub fn write(state: &State, mode: OutputMode, buf: &mut [u8]) -> Result<usize, Error> {
    match mode {
        OutputMode::Raw => write_raw(state, buf),
        OutputMode::Json => write_json(state, buf),
    }
}

fn write_raw(state: &State, buf: &mut [u8]) -> Result<usize, Error> {
    let available = buf.len();

    RawSnapshot::from(state)
        .write_to_prefix(buf)
        .map_err(|_| Error::BufferTooSmall {
            required: RawSnapshot::SIZE,
            available,
        })?;

    Ok(RawSnapshot::SIZE)
}

fn write_json(state: &State, buf: &mut [u8]) -> Result<usize, Error> {
    let json = serde_json::to_vec(&JsonView::from(state))
        .map_err(|e| Error::Render(e.to_string()))?;

    let required = json.len() + 1;
    if buf.len() < required {
        return Err(Error::BufferTooSmall {
            required,
            available: buf.len(),
        });
    }

    buf[..json.len()].copy_from_slice(&json);
    buf[json.len()] = 0;

    Ok(json.len())
}

/// Bits of [`RawSnapshot::presence`], one per optional store value.
pub mod presence {
    pub const TALKER: u64 = 1 << 0;
    pub const LAST_SENTENCE: u64 = 1 << 1;
    pub const TIME: u64 = 1 << 2;
    pub const DATE: u64 = 1 << 3;
    pub const UTC_OFFSET: u64 = 1 << 4;
    pub const LATITUDE: u64 = 1 << 5;
    pub const LONGITUDE: u64 = 1 << 6;
    pub const FIX_QUALITY: u64 = 1 << 7;
    pub const SATELLITES_USED: u64 = 1 << 8;
    pub const HDOP: u64 = 1 << 9;
    pub const PDOP: u64 = 1 << 10;
    pub const VDOP: u64 = 1 << 11;
    pub const ALTITUDE: u64 = 1 << 12;
    pub const GEOIDAL_SEPARATION: u64 = 1 << 13;
    pub const STATUS: u64 = 1 << 14;
    pub const FAA_MODE: u64 = 1 << 15;
    pub const SPEED_KNOTS: u64 = 1 << 16;
    pub const SPEED_KMH: u64 = 1 << 17;
    pub const COURSE_TRUE: u64 = 1 << 18;
    pub const COURSE_MAGNETIC: u64 = 1 << 19;
    pub const MAGNETIC_VARIATION: u64 = 1 << 20;
    pub const SELECTION_MODE: u64 = 1 << 21;
    pub const FIX_MODE: u64 = 1 << 22;
    pub const SATELLITES_IN_VIEW: u64 = 1 << 23;
    pub const DEPTH_BELOW_TRANSDUCER: u64 = 1 << 24;
    pub const DEPTH: u64 = 1 << 25;
    pub const DEPTH_OFFSET: u64 = 1 << 26;
    pub const HEADING_TRUE: u64 = 1 << 27;
    pub const WIND_ANGLE: u64 = 1 << 28;
    pub const WIND_REFERENCE: u64 = 1 << 29;
    pub const WIND_SPEED: u64 = 1 << 30;
    pub const WIND_SPEED_UNIT: u64 = 1 << 31;
    pub const ALARM_TIME: u64 = 1 << 32;
    pub const ALARM_ID: u64 = 1 << 33;
    pub const ALARM_CONDITION: u64 = 1 << 34;
    pub const ALARM_STATE: u64 = 1 << 35;
    pub const ALARM_TEXT: u64 = 1 << 36;
    pub const ACKNOWLEDGED_ALARM_ID: u64 = 1 << 37;
    pub const AIS_FRAGMENTS: u64 = 1 << 38;
    pub const AIS_FRAGMENT: u64 = 1 << 39;
    pub const AIS_SEQUENCE: u64 = 1 << 40;
    pub const AIS_CHANNEL: u64 = 1 << 41;
    pub const AIS_PAYLOAD: u64 = 1 << 42;
    pub const AIS_FILL_BITS: u64 = 1 << 43;
    pub const AIS_OWN_SHIP: u64 = 1 << 44;
    pub const TEXT_ID: u64 = 1 << 45;
    pub const TEXT: u64 = 1 << 46;
}

/// Satellite slot of a [`RawSnapshot`].
///
/// Unreported values hold [`RawSatellite::NOT_REPORTED`] (all bits set).
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct RawSatellite {
    pub prn: u8,
    pub elevation: u8,
    pub azimuth: U16,
    pub snr: u8,
}

impl RawSatellite {
    pub const NOT_REPORTED: u8 = u8::MAX;
}

impl From<&Satellite> for RawSatellite {
    fn from(satellite: &Satellite) -> Self {
        Self {
            prn: satellite.prn,
            elevation: satellite.elevation.unwrap_or(Self::NOT_REPORTED),
            azimuth: U16::new(satellite.azimuth.unwrap_or(u16::MAX)),
            snr: satellite.snr.unwrap_or(Self::NOT_REPORTED),
        }
    }
}

/// Binary snapshot of a [`State`].
///
/// The layout is `#[repr(C)]` over byte-aligned little-endian fields, so it has no padding
/// and reads the same on every target. A value is meaningful only when its bit is set in
/// [`RawSnapshot::presence`] (see [`presence`]); unset values are zero.
///
/// * Times are milliseconds since midnight, UTC offsets are whole minutes.
/// * Indicator enums are their ASCII character, [`SentenceId`](crate::SentenceId) is its
///   three letter code.
/// * Strings are NUL padded.
///
/// ```rust
/// use nmea0183_ingest::{Config, NmeaContext, output::{RawSnapshot, presence}};
/// use zerocopy::FromBytes;
///
/// let mut context = NmeaContext::new(Config::new()).unwrap();
/// context.ingest("$HEHDT,274.07,T*19").unwrap();
///
/// let mut buf = [0u8; RawSnapshot::SIZE];
/// context.read(&mut buf).unwrap();
///
/// let snapshot = RawSnapshot::ref_from_bytes(&buf).unwrap();
/// assert!(snapshot.is_present(presence::HEADING_TRUE));
/// assert!(!snapshot.is_present(presence::LATITUDE));
/// assert_eq!(snapshot.heading_true.get(), 274.07);
/// assert_eq!(&snapshot.talker, b"HE");
/// ```
#[derive(Debug, Clone, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct RawSnapshot {
    pub presence: U64,

    pub talker: [u8; 2],
    pub last_sentence: [u8; 3],

    pub time_ms: U32,
    pub date_year: I16,
    pub date_month: u8,
    pub date_day: u8,
    pub utc_offset_minutes: I16,

    pub latitude: F64,
    pub longitude: F64,
    pub fix_quality: u8,
    pub satellites_used: u8,
    pub hdop: F32,
    pub pdop: F32,
    pub vdop: F32,
    pub altitude: F32,
    pub geoidal_separation: F32,

    pub status: u8,
    pub faa_mode: u8,
    pub speed_knots: F32,
    pub speed_kmh: F32,
    pub course_true: F32,
    pub course_magnetic: F32,
    pub magnetic_variation: F32,

    pub selection_mode: u8,
    pub fix_mode: u8,
    pub active_satellite_count: u8,
    pub active_satellites: [u8; MAX_SATELLITES],
    pub satellites_in_view: u8,
    pub satellite_count: u8,
    pub satellites: [RawSatellite; MAX_SATELLITES],

    pub depth_below_transducer: F32,
    pub depth: F32,
    pub depth_offset: F32,
    pub heading_true: F32,

    pub wind_angle: F32,
    pub wind_reference: u8,
    pub wind_speed: F32,
    pub wind_speed_unit: u8,

    pub alarm_time_ms: U32,
    pub alarm_id: U16,
    pub alarm_condition: u8,
    pub alarm_state: u8,
    pub alarm_text: [u8; ALARM_TEXT_LEN],
    pub acknowledged_alarm_id: U16,

    pub ais_fragments: u8,
    pub ais_fragment: u8,
    pub ais_sequence: u8,
    pub ais_channel: u8,
    pub ais_payload: [u8; AIS_PAYLOAD_LEN],
    pub ais_fill_bits: u8,
    pub ais_own_ship: u8,

    pub text_id: u8,
    pub text: [u8; TEXT_LEN],
}

impl RawSnapshot {
    /// Size of the snapshot in bytes.
    pub const SIZE: usize = size_of::<RawSnapshot>();

    /// Whether the value behind `bit` was reported.
    pub fn is_present(&self, bit: u64) -> bool {
        self.presence.get() & bit != 0
    }
}

/// Collects presence bits while converting store values.
struct Presence(u64);

impl Presence {
    /// Converts a reported value and sets its bit; an unreported value is zero.
    fn mark<T, R: FromZeros>(&mut self, bit: u64, value: Option<T>, convert: impl FnOnce(T) -> R) -> R {
        match value {
            Some(value) => {
                self.0 |= bit;
                convert(value)
            }
            None => R::new_zeroed(),
        }
    }
}

fn millis(time: time::Time) -> U32 {
    let (hour, minute, second, millisecond) = time.as_hms_milli();
    U32::new(
        ((u32::from(hour) * 60 + u32::from(minute)) * 60 + u32::from(second)) * 1000
            + u32::from(millisecond),
    )
}

fn padded<const N: usize>(text: &str) -> [u8; N] {
    let mut bytes = [0u8; N];
    for (byte, src) in bytes.iter_mut().zip(text.bytes()) {
        *byte = src;
    }
    bytes
}

impl From<&State> for RawSnapshot {
    fn from(state: &State) -> Self {
        use presence::*;

        let mut p = Presence(0);

        let talker = p.mark(TALKER, state.talker.as_deref(), padded);
        let last_sentence = p.mark(LAST_SENTENCE, state.last_sentence, |id| padded(id.as_str()));

        let time_ms = p.mark(TIME, state.time, millis);
        let date_year = p.mark(DATE, state.date, |date| I16::new(date.year() as i16));
        let date_month = state.date.map_or(0, |date| u8::from(date.month()));
        let date_day = state.date.map_or(0, |date| date.day());
        let utc_offset_minutes = p.mark(UTC_OFFSET, state.utc_offset, |offset| {
            I16::new(offset.whole_minutes())
        });

        let mut active_satellites = [0u8; MAX_SATELLITES];
        active_satellites[..state.active_satellites.len()].copy_from_slice(&state.active_satellites);

        let mut satellites = [RawSatellite::new_zeroed(); MAX_SATELLITES];
        for (slot, satellite) in satellites.iter_mut().zip(&state.satellites) {
            *slot = RawSatellite::from(satellite);
        }

        Self {
            talker,
            last_sentence,
            time_ms,
            date_year,
            date_month,
            date_day,
            utc_offset_minutes,

            latitude: p.mark(LATITUDE, state.latitude, F64::new),
            longitude: p.mark(LONGITUDE, state.longitude, F64::new),
            fix_quality: p.mark(FIX_QUALITY, state.fix_quality, |q| q.as_char() as u8),
            satellites_used: p.mark(SATELLITES_USED, state.satellites_used, |n| n),
            hdop: p.mark(HDOP, state.hdop, F32::new),
            pdop: p.mark(PDOP, state.pdop, F32::new),
            vdop: p.mark(VDOP, state.vdop, F32::new),
            altitude: p.mark(ALTITUDE, state.altitude, F32::new),
            geoidal_separation: p.mark(GEOIDAL_SEPARATION, state.geoidal_separation, F32::new),

            status: p.mark(STATUS, state.status, |s| s.as_char() as u8),
            faa_mode: p.mark(FAA_MODE, state.faa_mode, |m| m.as_char() as u8),
            speed_knots: p.mark(SPEED_KNOTS, state.speed_knots, F32::new),
            speed_kmh: p.mark(SPEED_KMH, state.speed_kmh, F32::new),
            course_true: p.mark(COURSE_TRUE, state.course_true, F32::new),
            course_magnetic: p.mark(COURSE_MAGNETIC, state.course_magnetic, F32::new),
            magnetic_variation: p.mark(MAGNETIC_VARIATION, state.magnetic_variation, F32::new),

            selection_mode: p.mark(SELECTION_MODE, state.selection_mode, |m| m.as_char() as u8),
            fix_mode: p.mark(FIX_MODE, state.fix_mode, |m| m.as_char() as u8),
            active_satellite_count: state.active_satellites.len() as u8,
            active_satellites,
            satellites_in_view: p.mark(SATELLITES_IN_VIEW, state.satellites_in_view, |n| n),
            satellite_count: state.satellites.len() as u8,
            satellites,

            depth_below_transducer: p.mark(
                DEPTH_BELOW_TRANSDUCER,
                state.depth_below_transducer,
                F32::new,
            ),
            depth: p.mark(DEPTH, state.depth, F32::new),
            depth_offset: p.mark(DEPTH_OFFSET, state.depth_offset, F32::new),
            heading_true: p.mark(HEADING_TRUE, state.heading_true, F32::new),

            wind_angle: p.mark(WIND_ANGLE, state.wind_angle, F32::new),
            wind_reference: p.mark(WIND_REFERENCE, state.wind_reference, |r| r.as_char() as u8),
            wind_speed: p.mark(WIND_SPEED, state.wind_speed, F32::new),
            wind_speed_unit: p.mark(WIND_SPEED_UNIT, state.wind_speed_unit, |u| u.as_char() as u8),

            alarm_time_ms: p.mark(ALARM_TIME, state.alarm_time, millis),
            alarm_id: p.mark(ALARM_ID, state.alarm_id, U16::new),
            alarm_condition: p.mark(ALARM_CONDITION, state.alarm_condition, |c| c.as_char() as u8),
            alarm_state: p.mark(ALARM_STATE, state.alarm_state, |s| s.as_char() as u8),
            alarm_text: p.mark(ALARM_TEXT, state.alarm_text.as_deref(), padded),
            acknowledged_alarm_id: p.mark(
                ACKNOWLEDGED_ALARM_ID,
                state.acknowledged_alarm_id,
                U16::new,
            ),

            ais_fragments: p.mark(AIS_FRAGMENTS, state.ais_fragments, |n| n),
            ais_fragment: p.mark(AIS_FRAGMENT, state.ais_fragment, |n| n),
            ais_sequence: p.mark(AIS_SEQUENCE, state.ais_sequence, |n| n),
            ais_channel: p.mark(AIS_CHANNEL, state.ais_channel, |c| c as u8),
            ais_payload: p.mark(AIS_PAYLOAD, state.ais_payload.as_deref(), padded),
            ais_fill_bits: p.mark(AIS_FILL_BITS, state.ais_fill_bits, |n| n),
            ais_own_ship: p.mark(AIS_OWN_SHIP, state.ais_own_ship, u8::from),

            text_id: p.mark(TEXT_ID, state.text_id, |n| n),
            text: p.mark(TEXT, state.text.as_deref(), padded),

            presence: U64::new(p.0),
        }
    }
}

/// Satellite entry of the JSON rendering.
#[derive(Debug, Serialize)]
struct JsonSatellite {
    prn: u8,
    elevation: Option<u8>,
    azimuth: Option<u16>,
    snr: Option<u8>,
}

/// The fixed JSON schema: every key is always present, `null` when unreported.
///
/// Times render as `hh:mm:ss.sss`, dates as `YYYY-MM-DD`, UTC offsets as `+hh:mm`, and
/// indicator enums as their one character code.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonView<'a> {
    talker: Option<&'a str>,
    last_sentence: Option<&'static str>,

    time: Option<String>,
    date: Option<String>,
    utc_offset: Option<String>,

    latitude: Option<f64>,
    longitude: Option<f64>,
    fix_quality: Option<char>,
    satellites_used: Option<u8>,
    hdop: Option<f32>,
    pdop: Option<f32>,
    vdop: Option<f32>,
    altitude: Option<f32>,
    geoidal_separation: Option<f32>,

    status: Option<char>,
    faa_mode: Option<char>,
    speed_knots: Option<f32>,
    speed_kmh: Option<f32>,
    course_true: Option<f32>,
    course_magnetic: Option<f32>,
    magnetic_variation: Option<f32>,

    selection_mode: Option<char>,
    fix_mode: Option<char>,
    active_satellites: &'a [u8],
    satellites_in_view: Option<u8>,
    satellites: Vec<JsonSatellite>,

    depth_below_transducer: Option<f32>,
    depth: Option<f32>,
    depth_offset: Option<f32>,
    heading_true: Option<f32>,

    wind_angle: Option<f32>,
    wind_reference: Option<char>,
    wind_speed: Option<f32>,
    wind_speed_unit: Option<char>,

    alarm_time: Option<String>,
    alarm_id: Option<u16>,
    alarm_condition: Option<char>,
    alarm_state: Option<char>,
    alarm_text: Option<&'a str>,
    acknowledged_alarm_id: Option<u16>,

    ais_fragments: Option<u8>,
    ais_fragment: Option<u8>,
    ais_sequence: Option<u8>,
    ais_channel: Option<char>,
    ais_payload: Option<&'a str>,
    ais_fill_bits: Option<u8>,
    ais_own_ship: Option<bool>,

    text_id: Option<u8>,
    text: Option<&'a str>,
}

fn format_time(time: time::Time) -> String {
    let (hour, minute, second, millisecond) = time.as_hms_milli();
    format!("{hour:02}:{minute:02}:{second:02}.{millisecond:03}")
}

fn format_date(date: time::Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

fn format_offset(offset: time::UtcOffset) -> String {
    let sign = if offset.is_negative() { '-' } else { '+' };
    let (hours, minutes, _) = offset.as_hms();
    format!("{sign}{:02}:{:02}", hours.unsigned_abs(), minutes.unsigned_abs())
}

impl<'a> From<&'a State> for JsonView<'a> {
    fn from(state: &'a State) -> Self {
        Self {
            talker: state.talker.as_deref(),
            last_sentence: state.last_sentence.map(|id| id.as_str()),

            time: state.time.map(format_time),
            date: state.date.map(format_date),
            utc_offset: state.utc_offset.map(format_offset),

            latitude: state.latitude,
            longitude: state.longitude,
            fix_quality: state.fix_quality.map(|q| q.as_char()),
            satellites_used: state.satellites_used,
            hdop: state.hdop,
            pdop: state.pdop,
            vdop: state.vdop,
            altitude: state.altitude,
            geoidal_separation: state.geoidal_separation,

            status: state.status.map(|s| s.as_char()),
            faa_mode: state.faa_mode.map(|m| m.as_char()),
            speed_knots: state.speed_knots,
            speed_kmh: state.speed_kmh,
            course_true: state.course_true,
            course_magnetic: state.course_magnetic,
            magnetic_variation: state.magnetic_variation,

            selection_mode: state.selection_mode.map(|m| m.as_char()),
            fix_mode: state.fix_mode.map(|m| m.as_char()),
            active_satellites: &state.active_satellites,
            satellites_in_view: state.satellites_in_view,
            satellites: state
                .satellites
                .iter()
                .map(|satellite| JsonSatellite {
                    prn: satellite.prn,
                    elevation: satellite.elevation,
                    azimuth: satellite.azimuth,
                    snr: satellite.snr,
                })
                .collect(),

            depth_below_transducer: state.depth_below_transducer,
            depth: state.depth,
            depth_offset: state.depth_offset,
            heading_true: state.heading_true,

            wind_angle: state.wind_angle,
            wind_reference: state.wind_reference.map(|r| r.as_char()),
            wind_speed: state.wind_speed,
            wind_speed_unit: state.wind_speed_unit.map(|u| u.as_char()),

            alarm_time: state.alarm_time.map(format_time),
            alarm_id: state.alarm_id,
            alarm_condition: state.alarm_condition.map(|c| c.as_char()),
            alarm_state: state.alarm_state.map(|s| s.as_char()),
            alarm_text: state.alarm_text.as_deref(),
            acknowledged_alarm_id: state.acknowledged_alarm_id,

            ais_fragments: state.ais_fragments,
            ais_fragment: state.ais_fragment,
            ais_sequence: state.ais_sequence,
            ais_channel: state.ais_channel,
            ais_payload: state.ais_payload.as_deref(),
            ais_fill_bits: state.ais_fill_bits,
            ais_own_ship: state.ais_own_ship,

            text_id: state.text_id,
            text: state.text.as_deref(),
        }
    }
}
