//! # Error Types
//!
//! This module defines the error types used throughout the ingestion pipeline.
//!
//! Every stage reports its own error kind, and [`Error`] gathers them into the single
//! result returned by [`NmeaContext`](crate::NmeaContext). Each kind maps to a distinct
//! negative code through [`Error::code`] for callers that speak integer status codes.

use thiserror::Error;

use crate::nmea_content::SentenceId;

/// Represents all possible errors that can occur while ingesting or reading NMEA data.
///
/// Malformed input is an expected condition in a streaming feed, so none of these are
/// fatal: the store is left untouched and the caller decides whether to retry.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// The sentence framing (start character, checksum trailer, line ending) was invalid.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// The sentence body could not be split into fields.
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    /// The address field does not name a sentence type known to the registry.
    ///
    /// Contains the address field that caused the error.
    #[error("unrecognized sentence type in address field `{0}`")]
    UnrecognizedSentence(String),

    /// The sentence carries fewer fields than its type requires.
    #[error("{sentence} requires at least {required} fields, found {found}")]
    InsufficientFields {
        /// The sentence type being decoded
        sentence: SentenceId,
        /// Number of tokens found, address field included
        found: usize,
        /// Minimum number of tokens, address field included
        required: usize,
    },

    /// A field in the sentence does not conform to the expected format or value range.
    ///
    /// `index` is the token index, the address field being index 0.
    #[error("{sentence} field {index} is invalid")]
    InvalidField {
        /// The sentence type being decoded
        sentence: SentenceId,
        /// Token index of the offending field
        index: usize,
    },

    /// A text field is longer than the store can hold.
    #[error("{sentence} field {index} exceeds {max} characters")]
    FieldTooLong {
        /// The sentence type being decoded
        sentence: SentenceId,
        /// Token index of the offending field
        index: usize,
        /// Capacity of the store value
        max: usize,
    },

    /// The caller's output buffer cannot hold the requested rendering.
    #[error("output needs {required} bytes but the buffer holds {available}")]
    BufferTooSmall {
        /// Bytes needed, terminator included for JSON output
        required: usize,
        /// Capacity of the caller's buffer
        available: usize,
    },

    /// The state could not be rendered in the configured output mode.
    #[error("output could not be rendered: {0}")]
    Render(String),

    /// The configuration could not be applied.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The decode registry could not be built.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl Error {
    /// Returns the negative status code for this error kind.
    ///
    /// | Code | Kind                                      |
    /// |-----:|-------------------------------------------|
    /// |   -1 | Malformed frame                           |
    /// |   -2 | Tokenization failure                      |
    /// |   -3 | Unrecognized sentence type                |
    /// |   -4 | Insufficient fields                       |
    /// |   -5 | Output buffer too small, or not rendered  |
    /// |   -6 | Invalid configuration (registry included) |
    /// |   -7 | Invalid field                             |
    /// |   -8 | Field too long                            |
    pub fn code(&self) -> i32 {
        match self {
            Error::Frame(_) => -1,
            Error::Tokenize(_) => -2,
            Error::UnrecognizedSentence(_) => -3,
            Error::InsufficientFields { .. } => -4,
            Error::BufferTooSmall { .. } | Error::Render(_) => -5,
            Error::Config(_) | Error::Registry(_) => -6,
            Error::InvalidField { .. } => -7,
            Error::FieldTooLong { .. } => -8,
        }
    }
}

/// An error validating the outer frame of a sentence.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum FrameError {
    /// The provided input contains non-ASCII characters.
    ///
    /// NMEA sentences must be ASCII-only for proper parsing and checksum calculation.
    #[error("sentence contains non-ASCII characters")]
    NonAscii,

    /// The sentence does not start with `$` or `!`.
    #[error("sentence does not start with `$` or `!`")]
    MissingStart,

    /// No `*` checksum delimiter was found while the checksum is required.
    #[error("sentence has no checksum trailer")]
    MissingChecksum,

    /// The checksum trailer does not start with two hexadecimal digits.
    #[error("checksum trailer does not start with two hexadecimal digits")]
    InvalidChecksum,

    /// The body contains a reserved delimiter.
    #[error("reserved character `{0}` inside the sentence body")]
    Reserved(char),

    /// The line ending does not match the configured [`LineEndingMode`](crate::LineEndingMode).
    #[error("line ending does not match the configured mode")]
    LineEnding,

    /// The checksum of the sentence was corrupt or incorrect.
    #[error("checksum mismatch: calculated {expected:02X}, found {found:02X}")]
    ChecksumMismatch {
        /// The checksum calculated from the sentence content
        expected: u8,
        /// The checksum found in the sentence
        found: u8,
    },
}

/// An error splitting a sentence into fields.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum TokenizeError {
    /// The input produced no tokens.
    #[error("sentence is empty")]
    Empty,

    /// The sentence has more fields than the token capacity.
    #[error("sentence has more than {max} fields")]
    TooManyFields {
        /// Token capacity
        max: usize,
    },
}

/// An error building the decode registry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    /// The same sentence identifier was registered twice.
    #[error("sentence `{0}` is registered more than once")]
    Duplicate(&'static str),

    /// The table is too small for the number of entries.
    #[error("{entries} entries exceed the load factor of a {capacity} slot table")]
    Overloaded {
        /// Number of entries to register
        entries: usize,
        /// Number of slots in the table
        capacity: usize,
    },
}

/// An error in the context configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// The requested output mode is not supported.
    #[error("unsupported output mode `{0}`")]
    UnsupportedOutputMode(String),

    /// The configuration document could not be read.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            Error::Frame(FrameError::MissingStart),
            Error::Tokenize(TokenizeError::Empty),
            Error::UnrecognizedSentence("XXZZZ".into()),
            Error::InsufficientFields {
                sentence: SentenceId::GGA,
                found: 3,
                required: 6,
            },
            Error::BufferTooSmall {
                required: 10,
                available: 9,
            },
            Error::Config(ConfigError::UnsupportedOutputMode("xml".into())),
            Error::InvalidField {
                sentence: SentenceId::RMC,
                index: 7,
            },
            Error::FieldTooLong {
                sentence: SentenceId::TXT,
                index: 4,
                max: 61,
            },
        ];

        let mut codes: Vec<i32> = errors.iter().map(Error::code).collect();
        assert!(codes.iter().all(|code| *code < 0));
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_registry_error_is_configuration() {
        let error = Error::from(RegistryError::Duplicate("GGA"));
        assert_eq!(error.code(), -6);
    }
}
