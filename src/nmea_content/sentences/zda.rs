#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    nmea_content::{Fields, Sentence, SentenceId},
    state::{State, update},
};

/// ZDA - Time & Date - UTC, day, month, year and local time zone
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_zda_time_date_utc_day_month_year_and_local_time_zone>
///
/// ```text
///         1         2  3  4    5  6
///         |         |  |  |    |  |
///  $--ZDA,hhmmss.ss,xx,xx,xxxx,xx,xx*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct ZDA {
    /// UTC time
    pub time: Option<time::Time>,
    /// UTC date, reported only when day, month and year are all present
    pub date: Option<time::Date>,
    /// Local zone offset from UTC
    pub utc_offset: Option<time::UtcOffset>,
}

impl Sentence for ZDA {
    const ID: SentenceId = SentenceId::ZDA;
    const MIN_FIELDS: usize = 5;

    fn decode(fields: &Fields<'_>) -> Result<Self, Error> {
        Ok(Self {
            time: fields.parse(1)?,
            date: date(fields)?,
            utc_offset: utc_offset(fields)?,
        })
    }

    fn commit(self, state: &mut State) {
        update(&mut state.time, self.time);
        update(&mut state.date, self.date);
        update(&mut state.utc_offset, self.utc_offset);
    }
}

fn date(fields: &Fields<'_>) -> Result<Option<time::Date>, Error> {
    let (Some(day), Some(month), Some(year)) = (
        fields.parse::<u8>(2)?,
        fields.parse::<u8>(3)?,
        fields.parse::<u16>(4)?,
    ) else {
        return Ok(None);
    };

    let month = time::Month::try_from(month).map_err(|_| fields.invalid(3))?;

    time::Date::from_calendar_date(i32::from(year), month, day)
        .map(Some)
        .map_err(|_| fields.invalid(2))
}

fn utc_offset(fields: &Fields<'_>) -> Result<Option<time::UtcOffset>, Error> {
    let Some(hours) = fields.parse::<i8>(5)? else {
        return Ok(None);
    };
    let minutes = fields.parse::<i8>(6)?.unwrap_or(0);

    // minutes carry the sign of the hours, including "-00"
    let negative = fields.raw(5).is_some_and(|hours| hours.starts_with('-'));
    let minutes = if negative { -minutes } else { minutes };

    time::UtcOffset::from_hms(hours, minutes, 0)
        .map(Some)
        .map_err(|_| fields.invalid(5))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(sentence: &str) -> Result<ZDA, Error> {
        let tokens: Vec<&str> = sentence.split(',').collect();
        ZDA::decode_tokens(&tokens)
    }

    #[test]
    fn test_zda_parsing() {
        let zda = decode("GPZDA,160012.71,11,03,2004,-1,00").unwrap();
        assert_eq!(
            zda.time,
            Some(time::Time::from_hms_milli(16, 0, 12, 710).unwrap())
        );
        assert_eq!(
            zda.date,
            Some(time::Date::from_calendar_date(2004, time::Month::March, 11).unwrap())
        );
        assert_eq!(zda.utc_offset, Some(time::UtcOffset::from_hms(-1, 0, 0).unwrap()));

        let zda = decode("GPZDA,100000,15,03,2024,+01,30").unwrap();
        assert_eq!(zda.utc_offset, Some(time::UtcOffset::from_hms(1, 30, 0).unwrap()));

        let zda = decode("GPZDA,100000,15,03,2024,-00,30").unwrap();
        assert_eq!(zda.utc_offset, Some(time::UtcOffset::from_hms(0, -30, 0).unwrap()));

        let zda = decode("GPZDA,123519,,07,2025").unwrap();
        assert_eq!(zda.date, None);
        assert_eq!(zda.utc_offset, None);
    }

    #[test]
    fn test_zda_invalid_fields() {
        let invalid = |sentence: &str, index: usize| {
            assert_eq!(
                decode(sentence),
                Err(Error::InvalidField {
                    sentence: SentenceId::ZDA,
                    index,
                }),
                "{sentence}"
            );
        };

        invalid("GPZDA,123519,32,07,2025,,", 2);
        invalid("GPZDA,123519,31,04,2025,,", 2);
        invalid("GPZDA,123519,04,13,2025,,", 3);
        invalid("GPZDA,123519,04,07,2025,XX,", 5);
        invalid("GPZDA,123519,04,07,2025,30,00", 5);
    }
}
