#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    nmea_content::{Fields, Sentence, SentenceId, SpeedUnit, Status, WindReference},
    state::{State, update},
};

/// MWV - Wind Speed and Angle
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_mwv_wind_speed_and_angle>
///
/// ```text
///         1   2 3   4 5
///         |   | |   | |
///  $--MWV,x.x,a,x.x,a,a*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct MWV {
    /// Wind angle, 0 to 359 degrees
    pub wind_angle: Option<f32>,
    /// Reference of the wind angle
    pub reference: Option<WindReference>,
    /// Wind speed
    pub wind_speed: Option<f32>,
    /// Wind speed units
    pub wind_speed_unit: Option<SpeedUnit>,
    /// Status of the data
    pub status: Option<Status>,
}

impl Sentence for MWV {
    const ID: SentenceId = SentenceId::MWV;
    const MIN_FIELDS: usize = 6;

    fn decode(fields: &Fields<'_>) -> Result<Self, Error> {
        Ok(Self {
            wind_angle: fields.parse(1)?,
            reference: fields.parse(2)?,
            wind_speed: fields.parse(3)?,
            wind_speed_unit: fields.parse(4)?,
            status: fields.parse(5)?,
        })
    }

    /// Only valid readings reach the store.
    fn commit(self, state: &mut State) {
        if self.status != Some(Status::Valid) {
            return;
        }

        update(&mut state.wind_angle, self.wind_angle);
        update(&mut state.wind_reference, self.reference);
        update(&mut state.wind_speed, self.wind_speed);
        update(&mut state.wind_speed_unit, self.wind_speed_unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mwv_parsing() {
        let mwv = MWV::decode_tokens(&["WIMWV", "214.8", "R", "0.1", "K", "A"]).unwrap();
        assert_eq!(
            mwv,
            MWV {
                wind_angle: Some(214.8),
                reference: Some(WindReference::Relative),
                wind_speed: Some(0.1),
                wind_speed_unit: Some(SpeedUnit::KilometersPerHour),
                status: Some(Status::Valid),
            }
        );

        assert!(MWV::decode_tokens(&["WIMWV", "214.8", "X", "0.1", "K", "A"]).is_err());
        assert!(MWV::decode_tokens(&["WIMWV", "214.8", "R", "0.1", "Q", "A"]).is_err());
    }

    #[test]
    fn test_mwv_commit_requires_valid_status() {
        let mut state = State::default();

        MWV::decode_tokens(&["WIMWV", "045.0", "T", "12.5", "N", "V"])
            .unwrap()
            .commit(&mut state);
        assert_eq!(state, State::default());

        MWV::decode_tokens(&["WIMWV", "045.0", "T", "12.5", "N", "A"])
            .unwrap()
            .commit(&mut state);
        assert_eq!(state.wind_angle, Some(45.0));
        assert_eq!(state.wind_reference, Some(WindReference::True));
        assert_eq!(state.wind_speed, Some(12.5));
        assert_eq!(state.wind_speed_unit, Some(SpeedUnit::Knots));
    }
}
