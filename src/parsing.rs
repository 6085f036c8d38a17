//! # Tokenizer
//!
//! This module splits a validated sentence into its comma separated fields, and provides
//! the utility parser ensuring complete consumption of a field.

use log::trace;
use nom::{
    Err, IResult, Input, Parser,
    bytes::complete::take_till,
    character::complete::char,
    combinator::{opt, rest_len, verify},
    error::{ErrorKind, ParseError},
    sequence::terminated,
};

use crate::error::TokenizeError;

/// Maximum number of fields, address field included, a sentence may carry.
///
/// A sentence is at most 82 characters long, so this is never reached by a
/// well-formed sentence.
pub const MAX_TOKENS: usize = 40;

/// The ordered fields of one sentence, borrowed from it.
///
/// Index 0 is the address field (talker identifier followed by sentence identifier).
pub type Tokens<'a> = heapless::Vec<&'a str, MAX_TOKENS>;

/// Splits a sentence into its fields.
///
/// The input may be a frame body (`GPGGA,123519,...`) or a whole sentence
/// (`$GPGGA,123519,...*47`): a leading `$`/`!` is dropped, and so is everything from the
/// last `*` on. Fields are split on `,` only; empty fields are kept.
///
/// The input is never modified, so splitting the same input twice yields the same tokens.
///
/// # Errors
///
/// * [`TokenizeError::Empty`] if there is nothing left to split
/// * [`TokenizeError::TooManyFields`] if there are more than [`MAX_TOKENS`] fields
///
/// # Examples
///
/// ```rust
/// use nmea0183_ingest::tokenize;
///
/// let tokens = tokenize("$GPHDT,274.07,T*03").unwrap();
/// assert_eq!(tokens.as_slice(), ["GPHDT", "274.07", "T"]);
///
/// let tokens = tokenize("GPDPT,10.5,,").unwrap();
/// assert_eq!(tokens.as_slice(), ["GPDPT", "10.5", "", ""]);
/// ```
pub fn tokenize(input: &str) -> Result<Tokens<'_>, TokenizeError> {
    let body = input
        .strip_prefix(|c: char| c == '$' || c == '!')
        .unwrap_or(input);
    let body = body.rfind('*').map_or(body, |at| &body[..at]);

    split_fields(body)
}

/// Splits a frame body into its fields exactly as given.
///
/// Unlike [`tokenize`], no delimiter is stripped: a `$`, `!` or `*` in the body stays part
/// of its field. This is the splitter for bodies returned by
/// [`FrameParser::parse`](crate::FrameParser::parse).
///
/// # Examples
///
/// ```rust
/// use nmea0183_ingest::split_fields;
///
/// let tokens = split_fields("GPHDT,274.07,T").unwrap();
/// assert_eq!(tokens.as_slice(), ["GPHDT", "274.07", "T"]);
///
/// let tokens = split_fields("$GPHDT,274.07").unwrap();
/// assert_eq!(tokens[0], "$GPHDT");
/// ```
pub fn split_fields(body: &str) -> Result<Tokens<'_>, TokenizeError> {
    if body.is_empty() {
        return Err(TokenizeError::Empty);
    }

    let mut tokens = Tokens::new();
    let mut i = body;

    loop {
        let (rest, token) = field(i)?;
        tokens
            .push(token)
            .map_err(|_| TokenizeError::TooManyFields { max: MAX_TOKENS })?;

        let (rest, separator) = separator(rest)?;
        if separator.is_none() {
            break;
        }

        i = rest;
    }

    trace!("split {body} into {} tokens", tokens.len());

    Ok(tokens)
}

fn field(i: &str) -> Result<(&str, &str), TokenizeError> {
    let res: IResult<&str, &str> = take_till(|c: char| c == ',').parse(i);
    res.map_err(|_| TokenizeError::Empty)
}

fn separator(i: &str) -> Result<(&str, Option<char>), TokenizeError> {
    let res: IResult<&str, Option<char>> = opt(char(',')).parse(i);
    res.map_err(|_| TokenizeError::Empty)
}

/// Ensures that the parser consumes all input.
///
/// This is a convenience function for the common case of wanting to ensure that
/// a parser consumes the entire input with no remainder, as every field parser does.
///
/// # Arguments
///
/// * `f` - The parser to run
/// * `e` - Error kind to return if input is not fully consumed
pub(crate) fn consumed<I, E: ParseError<I>, F>(
    f: F,
    e: ErrorKind,
) -> impl Parser<I, Output = <F as Parser<I>>::Output, Error = E>
where
    I: Input,
    F: Parser<I, Error = E>,
{
    terminated(
        f,
        verify(rest_len, |len| len == &0)
            .or(move |i| Err(Err::Error(nom::error::make_error(i, e)))),
    )
}
