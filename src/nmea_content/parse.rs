use nom::{IResult, Parser, error::ErrorKind};

use crate::{
    Error, NmeaParse,
    nmea_content::SentenceId,
    parse::with_take,
    parsing::consumed,
};

/// The tokens of one sentence, with typed accessors for its fields.
///
/// Field accessors share one policy: an empty field (or a field past the end of the
/// sentence) is not reported and yields `Ok(None)`, while a field that is present but
/// does not convert fails with [`Error::InvalidField`] carrying its token index.
///
/// # Examples
///
/// ```rust
/// use nmea0183_ingest::nmea_content::{Fields, SentenceId};
///
/// let tokens = ["GPGGA", "123519", "4807.038", "N", "01131.000", "E", "1", "", "x"];
/// let fields = Fields::new(SentenceId::GGA, &tokens);
///
/// assert_eq!(fields.parse::<u8>(6), Ok(Some(1)));
/// assert_eq!(fields.parse::<u8>(7), Ok(None));
/// assert_eq!(fields.parse::<u8>(42), Ok(None));
/// assert!(fields.parse::<u8>(8).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    sentence: SentenceId,
    tokens: &'a [&'a str],
}

impl<'a> Fields<'a> {
    /// Wraps the tokens of a sentence of type `sentence`.
    pub fn new(sentence: SentenceId, tokens: &'a [&'a str]) -> Self {
        Self { sentence, tokens }
    }

    /// The type of the sentence the tokens belong to.
    pub fn sentence(&self) -> SentenceId {
        self.sentence
    }

    /// Number of tokens, address field included.
    pub fn count(&self) -> usize {
        self.tokens.len()
    }

    /// Returns the text of a field, [`None`] when absent or empty.
    pub fn raw(&self, index: usize) -> Option<&'a str> {
        self.tokens
            .get(index)
            .copied()
            .filter(|field| !field.is_empty())
    }

    /// Parses a whole field as `T`.
    pub fn parse<T: NmeaParse>(&self, index: usize) -> Result<Option<T>, Error> {
        self.raw(index)
            .map(|field| {
                let parsed: IResult<&str, T> =
                    consumed(T::parse, ErrorKind::Complete).parse(field);
                parsed
                    .map(|(_, value)| value)
                    .map_err(|_| self.invalid(index))
            })
            .transpose()
    }

    /// Copies a field into a bounded string.
    ///
    /// A field longer than `N` fails with [`Error::FieldTooLong`].
    pub fn text<const N: usize>(&self, index: usize) -> Result<Option<heapless::String<N>>, Error> {
        self.raw(index)
            .map(|field| {
                heapless::String::try_from(field).map_err(|_| Error::FieldTooLong {
                    sentence: self.sentence,
                    index,
                    max: N,
                })
            })
            .transpose()
    }

    /// Parses a value followed by its unit field.
    ///
    /// An empty unit field is accepted; any unit other than `unit` fails the unit field.
    pub fn with_unit<T: NmeaParse>(&self, index: usize, unit: char) -> Result<Option<T>, Error> {
        let value = self.parse::<T>(index)?;

        match self.parse::<char>(index + 1)? {
            Some(found) if found != unit => Err(self.invalid(index + 1)),
            _ => Ok(value),
        }
    }

    /// Parses a `ddmm.mm,N|S` latitude pair into signed decimal degrees.
    pub fn latitude(&self, index: usize) -> Result<Option<f64>, Error> {
        self.coordinate(index, 2, ('N', 'S'), 90.0)
    }

    /// Parses a `dddmm.mm,E|W` longitude pair into signed decimal degrees.
    pub fn longitude(&self, index: usize) -> Result<Option<f64>, Error> {
        self.coordinate(index, 3, ('E', 'W'), 180.0)
    }

    /// Parses a `x.x,E|W` magnetic variation pair, negative west.
    pub fn magnetic_variation(&self, index: usize) -> Result<Option<f32>, Error> {
        let value = self.parse::<f32>(index)?;
        let direction = self.parse::<char>(index + 1)?;

        match (value, direction) {
            (None, _) => Ok(None),
            (Some(value), Some('E')) => Ok(Some(value)),
            (Some(value), Some('W')) => Ok(Some(-value)),
            (Some(_), _) => Err(self.invalid(index + 1)),
        }
    }

    fn coordinate(
        &self,
        index: usize,
        degree_digits: usize,
        (positive, negative): (char, char),
        max: f64,
    ) -> Result<Option<f64>, Error> {
        let sign = match self.parse::<char>(index + 1)? {
            Some(c) if c == positive => Some(1.0),
            Some(c) if c == negative => Some(-1.0),
            Some(_) => return Err(self.invalid(index + 1)),
            None => None,
        };

        let Some(field) = self.raw(index) else {
            return Ok(None);
        };
        let Some(sign) = sign else {
            return Err(self.invalid(index + 1));
        };

        let parsed: IResult<&str, (u8, f64)> = consumed(
            (with_take::<u8>(degree_digits), f64::parse),
            ErrorKind::Float,
        )
        .parse(field);
        let (_, (degrees, minutes)) = parsed.map_err(|_| self.invalid(index))?;

        if !(0.0..60.0).contains(&minutes) {
            return Err(self.invalid(index));
        }

        let value = f64::from(degrees) + minutes / 60.0;
        if value > max {
            return Err(self.invalid(index));
        }

        Ok(Some(sign * value))
    }

    pub(crate) fn invalid(&self, index: usize) -> Error {
        Error::InvalidField {
            sentence: self.sentence,
            index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gga<'a>(tokens: &'a [&'a str]) -> Fields<'a> {
        Fields::new(SentenceId::GGA, tokens)
    }

    #[test]
    fn test_location() {
        let tokens = ["GPGGA", "123519", "4807.038", "N", "01131.000", "W"];
        let fields = gga(&tokens);

        let latitude = fields.latitude(2).unwrap().unwrap();
        let longitude = fields.longitude(4).unwrap().unwrap();
        assert!((latitude - 48.1173).abs() < 1e-9);
        assert!((longitude + 11.516_666_666).abs() < 1e-6);

        let tokens = ["GPGGA", "", "", "", "", ""];
        let fields = gga(&tokens);
        assert_eq!(fields.latitude(2), Ok(None));
        assert_eq!(fields.longitude(4), Ok(None));
    }

    #[test]
    fn test_location_errors() {
        let invalid = |tokens: &[&str], index: usize| {
            let fields = Fields::new(SentenceId::GLL, tokens);
            assert_eq!(
                fields.latitude(1),
                Err(Error::InvalidField {
                    sentence: SentenceId::GLL,
                    index,
                }),
                "{tokens:?}"
            );
        };

        invalid(&["GPGLL", "4807.038", "X"], 2);
        invalid(&["GPGLL", "4807.038", ""], 2);
        invalid(&["GPGLL", "9116.45", "N"], 1);
        invalid(&["GPGLL", "4861.00", "N"], 1);
        invalid(&["GPGLL", "48a7.038", "N"], 1);
        invalid(&["GPGLL", "4", "N"], 1);
    }

    #[test]
    fn test_with_unit() {
        let tokens = ["GPDBT", "12.34", "f", "3.76", "", "2.05", "x"];
        let fields = Fields::new(SentenceId::DBT, &tokens);

        assert_eq!(fields.with_unit::<f32>(1, 'f'), Ok(Some(12.34)));
        assert_eq!(fields.with_unit::<f32>(3, 'M'), Ok(Some(3.76)));
        assert_eq!(fields.with_unit::<f32>(7, 'M'), Ok(None));
        assert_eq!(
            fields.with_unit::<f32>(5, 'F'),
            Err(Error::InvalidField {
                sentence: SentenceId::DBT,
                index: 6,
            })
        );
    }

    #[test]
    fn test_magnetic_variation() {
        let tokens = ["GPRMC", "004.2", "W", "1.5", "E", "", "", "3.0", "N"];
        let fields = Fields::new(SentenceId::RMC, &tokens);

        assert_eq!(fields.magnetic_variation(1), Ok(Some(-4.2)));
        assert_eq!(fields.magnetic_variation(3), Ok(Some(1.5)));
        assert_eq!(fields.magnetic_variation(5), Ok(None));
        assert!(fields.magnetic_variation(7).is_err());
    }

    #[test]
    fn test_text() {
        let tokens = ["GPTXT", "short", "far too long"];
        let fields = Fields::new(SentenceId::TXT, &tokens);

        assert_eq!(fields.text::<8>(1).unwrap().unwrap().as_str(), "short");
        assert_eq!(
            fields.text::<8>(2),
            Err(Error::FieldTooLong {
                sentence: SentenceId::TXT,
                index: 2,
                max: 8,
            })
        );
        assert_eq!(fields.text::<8>(3), Ok(None));
        assert_eq!(fields.count(), 3);
        assert_eq!(fields.sentence(), SentenceId::TXT);
    }
}
