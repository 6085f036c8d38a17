use std::iter;

use nom::{
    IResult, Parser,
    bytes::complete::take,
    character::complete::{anychar, char, digit1},
    combinator::{map_res, opt, verify},
    error::{ErrorKind, make_error},
    number::complete::recognize_float,
    sequence::preceded,
};

use crate::parsing::consumed;

/// Trait for parsing types from a single NMEA 0183 field.
///
/// The `NmeaParse` trait provides a generic interface for converting the text of one
/// field into its semantic type. Implementations are provided for primitive types,
/// [`time::Time`] (`hhmmss.ss`) and [`time::Date`] (`ddmmyy`), and the single character
/// indicator enums of the [`nmea_content`](crate::nmea_content) module.
///
/// # Examples
///
/// ```rust
/// use nmea0183_ingest::NmeaParse;
///
/// // Parsing a single integer field
/// let result = u8::parse("42");
/// assert_eq!(result, Ok(("", 42)));
///
/// // Parsing a time field
/// let (_, time) = time::Time::parse("123519.25").unwrap();
/// assert_eq!(time.millisecond(), 250);
/// ```
///
/// # Implementing for Custom Types
///
/// ```rust
/// use nmea0183_ingest::NmeaParse;
/// use nom::{IResult, Parser, character::complete::char};
///
/// struct Tenths(u16);
///
/// impl NmeaParse for Tenths {
///     fn parse(i: &str) -> IResult<&str, Self> {
///         let (i, (whole, _, tenth)) = (u16::parse, char('.'), u8::parse).parse(i)?;
///         Ok((i, Tenths(whole * 10 + u16::from(tenth))))
///     }
/// }
/// ```
pub trait NmeaParse: Sized {
    /// Parses the input and returns a result.
    ///
    /// Returns a tuple of `(remaining_input, parsed_value)` on success. Field parsers
    /// are run through a completeness check, so any remaining input fails the field.
    fn parse(i: &str) -> IResult<&str, Self>;
}

macro_rules! impl_ints_type {
    ($($t:tt),*) => ($(
        impl NmeaParse for $t {
            fn parse(i: &str) -> IResult<&str, Self> {
                nom::character::complete::$t.parse(i)
            }
        }
    )*)
}

impl_ints_type!(u8, u16, u32, i8, i16, i32);

// Only digit based decimals: `nan` and `inf` are not numbers in a sentence, and an
// overflowing exponent is rejected rather than stored as infinity.
macro_rules! impl_float_type {
    ($($t:ty),*) => ($(
        impl NmeaParse for $t {
            fn parse(i: &str) -> IResult<&str, Self> {
                verify(map_res(recognize_float, str::parse::<$t>), |value: &$t| {
                    value.is_finite()
                })
                .parse(i)
            }
        }
    )*)
}

impl_float_type!(f32, f64);

impl NmeaParse for char {
    fn parse(i: &str) -> IResult<&str, Self> {
        anychar.parse(i)
    }
}

/// Takes exactly `count` characters and parses all of them as `T`.
pub(crate) fn with_take<'a, T: NmeaParse>(
    count: usize,
) -> impl Parser<&'a str, Output = T, Error = nom::error::Error<&'a str>> {
    take(count).and_then(consumed(T::parse, ErrorKind::Digit))
}

fn verify_error(i: &str) -> nom::Err<nom::error::Error<&str>> {
    nom::Err::Error(make_error(i, ErrorKind::Verify))
}

impl NmeaParse for time::Time {
    fn parse(i: &str) -> IResult<&str, Self> {
        let (i, (hour, minute, second)) = (
            with_take::<u8>(2),
            with_take::<u8>(2),
            with_take::<u8>(2),
        )
            .parse(i)?;
        let (i, fraction) = opt(preceded(char('.'), digit1)).parse(i)?;

        // hundredths are the norm, anything past milliseconds is dropped
        let millisecond = fraction.map_or(0, |digits: &str| {
            digits
                .bytes()
                .chain(iter::repeat(b'0'))
                .take(3)
                .fold(0u16, |acc, digit| acc * 10 + u16::from(digit - b'0'))
        });

        let time = time::Time::from_hms_milli(hour, minute, second, millisecond)
            .map_err(|_| verify_error(i))?;

        Ok((i, time))
    }
}

impl NmeaParse for time::Date {
    fn parse(i: &str) -> IResult<&str, Self> {
        let (i, (day, month, year)) = (
            with_take::<u8>(2),
            with_take::<u8>(2),
            with_take::<u16>(2),
        )
            .parse(i)?;

        let month = time::Month::try_from(month)
            .map_err(|_| verify_error(i))?;

        let year = match year {
            83..=99 => year + 1900,
            _ => year + 2000,
        };

        let date = time::Date::from_calendar_date(i32::from(year), month, day)
            .map_err(|_| verify_error(i))?;

        Ok((i, date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbers() {
        assert_eq!(u8::parse("08"), Ok(("", 8)));
        assert_eq!(i8::parse("-3"), Ok(("", -3)));
        assert_eq!(f32::parse("545.4"), Ok(("", 545.4)));
        assert_eq!(f64::parse("-21.3"), Ok(("", -21.3)));
        assert!(u8::parse("A8").is_err());
        assert!(u8::parse("").is_err());
    }

    #[test]
    fn test_parse_floats_are_finite_decimals() {
        assert_eq!(f32::parse("274.07"), Ok(("", 274.07)));
        assert_eq!(f32::parse(".5"), Ok(("", 0.5)));
        assert_eq!(f32::parse("1e2"), Ok(("", 100.0)));
        assert_eq!(f64::parse("4807.038,N"), Ok((",N", 4807.038)));

        for field in ["nan", "NaN", "inf", "-inf", "Infinity", "", "."] {
            assert!(f32::parse(field).is_err(), "{field:?}");
            assert!(f64::parse(field).is_err(), "{field:?}");
        }

        assert!(f32::parse("1e999").is_err());
        assert!(f64::parse("1e999").is_err());
    }

    #[test]
    fn test_parse_time() {
        let (i, time) = time::Time::parse("123519").unwrap();
        assert_eq!(i, "");
        assert_eq!(time.as_hms(), (12, 35, 19));

        let (_, time) = time::Time::parse("092725.00").unwrap();
        assert_eq!(time.as_hms_milli(), (9, 27, 25, 0));

        let (_, time) = time::Time::parse("092725.1").unwrap();
        assert_eq!(time.millisecond(), 100);

        let (_, time) = time::Time::parse("092725.12345").unwrap();
        assert_eq!(time.millisecond(), 123);

        assert!(time::Time::parse("25444").is_err());
        assert!(time::Time::parse("246000").is_err());
        assert!(time::Time::parse("12a519").is_err());
    }

    #[test]
    fn test_parse_date() {
        let (_, date) = time::Date::parse("230394").unwrap();
        assert_eq!(date.to_calendar_date(), (1994, time::Month::March, 23));

        let (_, date) = time::Date::parse("010125").unwrap();
        assert_eq!(date.to_calendar_date(), (2025, time::Month::January, 1));

        assert!(time::Date::parse("321294").is_err());
        assert!(time::Date::parse("011394").is_err());
        assert!(time::Date::parse("0101").is_err());
    }
}
