//! # NMEA 0183 Frame Validator
//!
//! This module validates the outer frame of NMEA 0183 sentences before any field is looked at.
//! It handles the standard NMEA 0183 format: `$HHHHH,D1,D2,...,Dn*CC\r\n`, and the
//! encapsulation format used by AIS: `!HHHHH,D1,D2,...,Dn*CC\r\n`.
//!
//! The validator is configurable to handle variations in:
//! - Checksum requirements (required or optional)
//! - Line ending requirements (CRLF required, forbidden or optional)
//!
//! The body between the start delimiter and the checksum trailer may not contain the
//! reserved delimiters `$`, `!` and `*`.

use log::trace;
use nom::{
    IResult, Parser,
    bytes::complete::take_while_m_n,
    character::complete::one_of,
    combinator::map_res,
};
use serde::Deserialize;

use crate::error::FrameError;

/// Defines how the validator should handle NMEA sentence checksums.
///
/// NMEA 0183 sentences can include a checksum in the format `*CC` where
/// CC is a two-digit hexadecimal value representing the XOR of all bytes in the
/// sentence content (excluding the `$`/`!` prefix and `*` delimiter).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumMode {
    #[default]
    /// Checksum is required and must be present.
    ///
    /// The validator will fail if no `*CC` checksum is found at the end of the sentence.
    /// If a checksum is present, it will be validated against the calculated checksum.
    Required,

    /// Checksum is optional but will be validated if present.
    ///
    /// Use this mode when working with mixed sources or legacy equipment
    /// that may not always include checksums.
    Optional,
}

/// Defines how the validator should handle line endings.
///
/// NMEA 0183 sentences typically end with a carriage return and line feed (`\r\n`),
/// but most feeds hand over lines that have already been stripped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEndingMode {
    /// CRLF line ending is required and must be present.
    ///
    /// Use this mode when parsing standard NMEA log files or serial port data.
    Required,

    /// CRLF line ending is forbidden and must not be present.
    Forbidden,

    #[default]
    /// A trailing `\r\n` (or a bare `\n` or `\r`) is accepted and ignored.
    Optional,
}

/// The validated frame of a sentence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    /// Start delimiter, `$` for data sentences and `!` for encapsulated sentences
    pub start: char,
    /// Everything between the start delimiter and the checksum delimiter
    pub body: &'a str,
    /// The checksum found in the sentence, [`None`] when absent and optional
    pub checksum: Option<u8>,
}

/// Validates the outer frame of NMEA 0183 sentences.
///
/// It uses the builder pattern to allow for flexible configuration of the validator settings.
///
/// # Examples
///
/// ```rust
/// use nmea0183_ingest::{ChecksumMode, FrameParser, LineEndingMode};
///
/// // Strict: checksum and CRLF both required
/// let strict = FrameParser::new()
///     .checksum_mode(ChecksumMode::Required)
///     .line_ending_mode(LineEndingMode::Required);
/// assert!(strict.parse("$GPGGA,data*6A\r\n").is_ok());
/// assert!(strict.parse("$GPGGA,data*6A").is_err()); // (missing CRLF)
/// assert!(strict.parse("$GPGGA,data\r\n").is_err()); // (missing checksum)
///
/// // Lenient: checksum optional, CRLF forbidden
/// let lenient = FrameParser::new()
///     .checksum_mode(ChecksumMode::Optional)
///     .line_ending_mode(LineEndingMode::Forbidden);
/// assert!(lenient.parse("$GPGGA,data*6A").is_ok()); // (with valid checksum)
/// assert!(lenient.parse("$GPGGA,data").is_ok()); // (without checksum)
/// assert!(lenient.parse("$GPGGA,data*99").is_err()); // (invalid checksum)
/// assert!(lenient.parse("$GPGGA,data\r\n").is_err()); // (CRLF present)
/// ```
#[must_use]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameParser {
    /// Checksum mode for the validator.
    checksum_mode: ChecksumMode,

    /// Line ending mode for the validator.
    line_ending_mode: LineEndingMode,
}

impl FrameParser {
    /// Creates a new frame validator with default settings.
    ///
    /// The default settings are:
    /// - Checksum mode: [`ChecksumMode::Required`]
    /// - Line ending mode: [`LineEndingMode::Optional`]
    pub fn new() -> Self {
        FrameParser {
            checksum_mode: ChecksumMode::Required,
            line_ending_mode: LineEndingMode::Optional,
        }
    }

    /// Sets the checksum mode for the validator.
    pub fn checksum_mode(mut self, mode: ChecksumMode) -> Self {
        self.checksum_mode = mode;
        self
    }

    /// Sets the line ending mode for the validator.
    pub fn line_ending_mode(mut self, mode: LineEndingMode) -> Self {
        self.line_ending_mode = mode;
        self
    }

    /// Validates the frame of `sentence` and returns its body.
    ///
    /// The validator will:
    /// * Validate that the input is ASCII-only
    /// * Strip the line ending according to the configured mode
    /// * Expect the sentence to start with `$` or `!`
    /// * Split the body from the checksum trailer at the last `*`
    /// * Reject reserved delimiters (`$`, `!`, `*`) inside the body
    /// * Parse the first two characters of the trailer as hexadecimal digits, in either
    ///   case, ignoring anything after them
    /// * Compare them with the checksum calculated over the body
    pub fn parse<'a>(&self, i: &'a str) -> Result<Frame<'a>, FrameError> {
        if !i.is_ascii() {
            return Err(FrameError::NonAscii);
        }

        let i = line_ending(i, self.line_ending_mode)?;

        let start: IResult<&str, char> = one_of("$!").parse(i);
        let (i, start) = start.map_err(|_| FrameError::MissingStart)?;

        let (body, found) = match i.rfind('*') {
            Some(at) => (&i[..at], Some(checksum_digits(&i[at + 1..])?)),
            None if self.checksum_mode == ChecksumMode::Optional => (i, None),
            None => return Err(FrameError::MissingChecksum),
        };

        if let Some(reserved) = body.chars().find(|c| matches!(*c, '$' | '!' | '*')) {
            return Err(FrameError::Reserved(reserved));
        }

        let expected = checksum(body);

        if let Some(found) = found
            && found != expected
        {
            return Err(FrameError::ChecksumMismatch { expected, found });
        }

        trace!("framed {start}{body} (checksum {found:02X?})");

        Ok(Frame {
            start,
            body,
            checksum: found,
        })
    }
}

/// Checks the frame of a sentence with the default [`FrameParser`] settings.
///
/// Returns `true` iff the sentence starts with `$` or `!`, carries at least two hex digits
/// after its last `*`, and the first two of them equal the XOR of the body.
///
/// # Examples
///
/// ```rust
/// use nmea0183_ingest::validate;
///
/// assert!(validate("$GPGGA,123456,data*41"));
/// assert!(validate("$GPGGA,data*6a\r\n"));
/// assert!(validate("$GPGGA,data*6A\r"));
/// assert!(!validate("$GPGGA,123456,data*42"));
/// assert!(!validate("$GPGGA,123456,data"));
/// ```
pub fn validate(sentence: &str) -> bool {
    FrameParser::new().parse(sentence).is_ok()
}

/// Calculates the NMEA 0183 checksum of a sentence.
///
/// The checksum is the XOR of every byte strictly between the leading `$`/`!` and the
/// last `*`. Both delimiters are optional, so a bare body can be passed as well.
///
/// # Examples
///
/// ```rust
/// use nmea0183_ingest::checksum;
///
/// assert_eq!(checksum("GPGGA,123456,data"), 0x41);
/// assert_eq!(checksum("$GPGGA,123456,data*41\r\n"), 0x41);
/// ```
pub fn checksum(sentence: &str) -> u8 {
    let body = sentence
        .strip_prefix(|c: char| c == '$' || c == '!')
        .unwrap_or(sentence);
    let body = body.rfind('*').map_or(body, |at| &body[..at]);

    body.as_bytes()
        .iter()
        .fold(0u8, |accumulated_xor, &byte| accumulated_xor ^ byte)
}

/// Strips the line ending according to `mode`.
pub(crate) fn line_ending(i: &str, mode: LineEndingMode) -> Result<&str, FrameError> {
    match mode {
        LineEndingMode::Required => i.strip_suffix("\r\n").ok_or(FrameError::LineEnding),
        LineEndingMode::Forbidden if i.ends_with('\n') => Err(FrameError::LineEnding),
        LineEndingMode::Forbidden => Ok(i),
        LineEndingMode::Optional => Ok(i
            .strip_suffix("\r\n")
            .or_else(|| i.strip_suffix('\n'))
            .or_else(|| i.strip_suffix('\r'))
            .unwrap_or(i)),
    }
}

/// Parses the leading two hexadecimal digits of a checksum trailer.
///
/// Whatever follows the digits is not part of the checksum and is ignored.
pub(crate) fn checksum_digits(i: &str) -> Result<u8, FrameError> {
    let digits: IResult<&str, u8> = map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
        |digits| u8::from_str_radix(digits, 16),
    )
    .parse(i);

    let (rest, cc) = digits.map_err(|_| FrameError::InvalidChecksum)?;
    if !rest.is_empty() {
        trace!("ignored {rest:?} after checksum {cc:02X}");
    }

    Ok(cc)
}

#[cfg(test)]
mod tests {
    mod checksum;
    mod crlf;
}
