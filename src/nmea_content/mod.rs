//! # NMEA 0183 Sentence Content
//!
//! Strongly-typed sentence records, the per-sentence decode contract, and the closed
//! [`SentenceId`] dispatch that connects the registry to the decoders.
//!
//! Every decoder follows the same shape:
//! 1. Check the token count against [`Sentence::MIN_FIELDS`], failing with
//!    [`Error::InsufficientFields`] and touching nothing.
//! 2. Convert every field into the typed record. A field that is present but does not
//!    parse fails the whole sentence with [`Error::InvalidField`]; nothing is committed.
//! 3. [`Sentence::commit`] the record, writing only the store values the type owns.

mod parse;
mod sentences;

pub use parse::Fields;
pub use sentences::*;

use std::{fmt, str::FromStr};

use nom::{IResult, Parser};
use serde::{Deserialize, Serialize};

use crate::{Error, NmeaParse, state::State};

/// The decode contract implemented by every sentence record.
///
/// # Example
///
/// ```rust
/// use nmea0183_ingest::{
///     State,
///     nmea_content::{HDT, Sentence},
/// };
///
/// let mut state = State::default();
/// let hdt = HDT::decode_tokens(&["GPHDT", "274.07", "T"]).unwrap();
/// hdt.commit(&mut state);
///
/// assert_eq!(state.heading_true, Some(274.07));
/// ```
pub trait Sentence: Sized {
    /// The sentence identifier this record decodes.
    const ID: SentenceId;

    /// Minimum number of tokens, address field included.
    const MIN_FIELDS: usize;

    /// Converts the fields of one sentence into the typed record.
    ///
    /// Called with at least [`Sentence::MIN_FIELDS`] tokens.
    fn decode(fields: &Fields<'_>) -> Result<Self, Error>;

    /// Writes the record into the store, touching only the values this type owns.
    fn commit(self, state: &mut State);

    /// Checks the token count, then decodes the record.
    fn decode_tokens(tokens: &[&str]) -> Result<Self, Error> {
        if tokens.len() < Self::MIN_FIELDS {
            return Err(Error::InsufficientFields {
                sentence: Self::ID,
                found: tokens.len(),
                required: Self::MIN_FIELDS,
            });
        }

        Self::decode(&Fields::new(Self::ID, tokens))
    }
}

macro_rules! sentence_ids {
    (
        $(
            $(#[$meta:meta])*
            $id:ident
        ),* $(,)?
    ) => {
        /// Identifier of every sentence type this crate decodes.
        ///
        /// The variants double as the tags of [`NmeaSentence`], so dispatching on an
        /// identifier is an exhaustive `match`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum SentenceId {
            $(
                $(#[$meta])*
                $id,
            )*
        }

        impl SentenceId {
            /// Every supported sentence identifier.
            pub const ALL: &'static [SentenceId] = &[$(SentenceId::$id),*];

            /// Returns the three letter code of the sentence.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(SentenceId::$id => stringify!($id),)*
                }
            }

            /// Returns the minimum number of tokens, address field included.
            pub const fn min_fields(self) -> usize {
                match self {
                    $(SentenceId::$id => <$id as Sentence>::MIN_FIELDS,)*
                }
            }
        }

        /// A unified enum over every decoded sentence record.
        #[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, PartialEq)]
        pub enum NmeaSentence {
            $(
                $(#[$meta])*
                $id($id),
            )*
        }

        impl NmeaSentence {
            /// Decodes the tokens of one sentence as the type `id` names.
            ///
            /// # Example
            ///
            /// ```rust
            /// use nmea0183_ingest::nmea_content::{NmeaSentence, SentenceId};
            ///
            /// let tokens = ["GPGGA", "123519", "4807.038", "N", "01131.000", "E"];
            /// let sentence = NmeaSentence::decode(SentenceId::GGA, &tokens).unwrap();
            /// assert_eq!(sentence.id(), SentenceId::GGA);
            ///
            /// let sentence = NmeaSentence::decode(SentenceId::GGA, &tokens[..3]);
            /// assert!(sentence.is_err());
            /// ```
            pub fn decode(id: SentenceId, tokens: &[&str]) -> Result<Self, Error> {
                match id {
                    $(SentenceId::$id => $id::decode_tokens(tokens).map(Self::$id),)*
                }
            }

            /// Returns the identifier of the record.
            pub fn id(&self) -> SentenceId {
                match self {
                    $(Self::$id(_) => SentenceId::$id,)*
                }
            }

            /// Writes the record into the store.
            pub fn commit(self, state: &mut State) {
                match self {
                    $(Self::$id(sentence) => sentence.commit(state),)*
                }
            }
        }
    };
}

sentence_ids! {
    /// Acknowledge alarm
    ACK,
    /// Set alarm state
    ALR,
    /// Depth below transducer
    DBT,
    /// Depth of water
    DPT,
    /// Global Positioning System fix data
    GGA,
    /// Geographic position, latitude/longitude
    GLL,
    /// GPS DOP and active satellites
    GSA,
    /// Satellites in view
    GSV,
    /// Heading, true
    HDT,
    /// Wind speed and angle
    MWV,
    /// Recommended minimum navigation information
    RMC,
    /// Text transmission
    TXT,
    /// AIS VHF data-link message
    VDM,
    /// AIS VHF data-link own-vessel report
    VDO,
    /// Track made good and ground speed
    VTG,
    /// Time and date, UTC and local time zone
    ZDA,
}

impl fmt::Display for SentenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentenceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SentenceId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| Error::UnrecognizedSentence(s.to_owned()))
    }
}

macro_rules! parsable_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $char:literal => $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Returns the indicator character as transmitted.
            pub const fn as_char(self) -> char {
                match self {
                    $(Self::$variant => $char,)*
                }
            }
        }

        impl NmeaParse for $name {
            fn parse(i: &str) -> IResult<&str, Self> {
                nom::branch::alt(($(
                    nom::character::complete::char($char).map(|_| Self::$variant),
                )*)).parse(i)
            }
        }
    };
}

parsable_enum! {
    /// Status Mode Indicator
    pub enum Status {
        /// A - Valid
        'A' => Valid,
        /// V - Invalid
        'V' => Invalid,
    }
}

parsable_enum! {
    /// FAA Mode Indicator
    ///
    /// <https://gpsd.gitlab.io/gpsd/NMEA.html#_sentence_mixes_and_nmea_variations>
    pub enum FaaMode {
        /// A - Autonomous mode
        'A' => Autonomous,
        /// C - Quectel Querk, "Caution"
        'C' => Caution,
        /// D - Differential Mode
        'D' => Differential,
        /// E - Estimated (dead-reckoning) mode
        'E' => Estimated,
        /// F - RTK Float mode
        'F' => FloatRtk,
        /// M - Manual Input Mode
        'M' => Manual,
        /// N - Data Not Valid
        'N' => DataNotValid,
        /// P - Precise
        'P' => Precise,
        /// R - RTK Integer mode
        'R' => FixedRtk,
        /// S - Simulated Mode
        'S' => Simulator,
        /// U - Quectel Querk, "Unsafe"
        'U' => Unsafe,
    }
}

parsable_enum! {
    /// Quality of the GPS fix
    pub enum Quality {
        /// 0 - Fix not available
        '0' => NoFix,
        /// 1 - GPS fix
        '1' => GPSFix,
        /// 2 - Differential GPS fix
        '2' => DGPSFix,
        /// 3 - PPS fix
        '3' => PPSFix,
        /// 4 - Real Time Kinematic
        '4' => RTK,
        /// 5 - Float RTK
        '5' => FloatRTK,
        /// 6 - estimated (dead reckoning)
        '6' => Estimated,
        /// 7 - Manual input mode
        '7' => Manual,
        /// 8 - Simulation mode
        '8' => Simulation,
    }
}

parsable_enum! {
    /// Selection Mode
    pub enum SelectionMode {
        /// A - Automatic, 2D/3D
        'A' => Automatic,
        /// M - Manual, forced to operate in 2D or 3D
        'M' => Manual,
    }
}

parsable_enum! {
    /// Fix Mode
    pub enum FixMode {
        /// 1 - No fix
        '1' => NoFix,
        /// 2 - 2D Fix
        '2' => Fix2D,
        /// 3 - 3D Fix
        '3' => Fix3D,
    }
}

parsable_enum! {
    /// Reference of a wind angle
    pub enum WindReference {
        /// R - Relative to the vessel's bow
        'R' => Relative,
        /// T - Theoretical, calculated as if the vessel were stationary
        'T' => True,
    }
}

parsable_enum! {
    /// Unit of a speed field
    pub enum SpeedUnit {
        /// K - Kilometres per hour
        'K' => KilometersPerHour,
        /// M - Metres per second
        'M' => MetersPerSecond,
        /// N - Knots
        'N' => Knots,
        /// S - Statute miles per hour
        'S' => StatuteMilesPerHour,
    }
}

parsable_enum! {
    /// Condition of an alarm
    pub enum AlarmCondition {
        /// A - Threshold exceeded
        'A' => Exceeded,
        /// V - Threshold not exceeded
        'V' => NotExceeded,
    }
}

parsable_enum! {
    /// Acknowledge state of an alarm
    pub enum AlarmState {
        /// A - Acknowledged
        'A' => Acknowledged,
        /// V - Unacknowledged
        'V' => Unacknowledged,
    }
}

/// Satellite information used in [`GSV`] sentences
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Satellite {
    pub prn: u8,
    pub elevation: Option<u8>,
    pub azimuth: Option<u16>,
    pub snr: Option<u8>,
}

impl Satellite {
    /// Decodes the four fields of one satellite starting at token `index`.
    ///
    /// Returns [`None`] when the satellite slot is empty.
    fn decode(fields: &Fields<'_>, index: usize) -> Result<Option<Self>, Error> {
        let Some(prn) = fields.parse::<u8>(index)? else {
            return Ok(None);
        };

        Ok(Some(Self {
            prn,
            elevation: fields.parse(index + 1)?,
            azimuth: fields.parse(index + 2)?,
            snr: fields.parse(index + 3)?,
        }))
    }
}
