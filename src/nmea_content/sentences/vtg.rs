#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    nmea_content::{FaaMode, Fields, Sentence, SentenceId},
    state::{State, update},
};

/// VTG - Track made good and Ground speed
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_vtg_track_made_good_and_ground_speed>
///
/// ```text
///          1  2  3  4  5  6  7  8 9
///          |  |  |  |  |  |  |  | |
///  $--VTG,x.x,T,x.x,M,x.x,N,x.x,K,m*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct VTG {
    /// Course over ground in degrees true
    pub course_over_ground: Option<f32>,
    /// Course over ground in degrees magnetic
    pub course_over_ground_magnetic: Option<f32>,
    /// Speed over ground in knots
    pub speed_over_ground: Option<f32>,
    /// Speed over ground in kilometers per hour
    pub speed_over_ground_kph: Option<f32>,
    /// FAA mode indicator (NMEA 2.3 and later)
    pub faa_mode: Option<FaaMode>,
}

impl Sentence for VTG {
    const ID: SentenceId = SentenceId::VTG;
    const MIN_FIELDS: usize = 9;

    fn decode(fields: &Fields<'_>) -> Result<Self, Error> {
        Ok(Self {
            course_over_ground: fields.with_unit(1, 'T')?,
            course_over_ground_magnetic: fields.with_unit(3, 'M')?,
            speed_over_ground: fields.with_unit(5, 'N')?,
            speed_over_ground_kph: fields.with_unit(7, 'K')?,
            faa_mode: fields.parse(9)?,
        })
    }

    fn commit(self, state: &mut State) {
        update(&mut state.course_true, self.course_over_ground);
        update(&mut state.course_magnetic, self.course_over_ground_magnetic);
        update(&mut state.speed_knots, self.speed_over_ground);
        update(&mut state.speed_kmh, self.speed_over_ground_kph);
        update(&mut state.faa_mode, self.faa_mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vtg_parsing() {
        let tokens = ["GPVTG", "054.7", "T", "034.4", "M", "005.5", "N", "010.2", "K", "A"];
        let vtg = VTG::decode_tokens(&tokens).unwrap();

        assert_eq!(
            vtg,
            VTG {
                course_over_ground: Some(54.7),
                course_over_ground_magnetic: Some(34.4),
                speed_over_ground: Some(5.5),
                speed_over_ground_kph: Some(10.2),
                faa_mode: Some(FaaMode::Autonomous),
            }
        );

        // Units are fixed per position
        let tokens = ["GPVTG", "054.7", "M", "034.4", "M", "005.5", "N", "010.2", "K"];
        assert_eq!(
            VTG::decode_tokens(&tokens),
            Err(Error::InvalidField {
                sentence: SentenceId::VTG,
                index: 2,
            })
        );
    }

    #[test]
    fn test_vtg_commit() {
        let mut state = State::default();
        let tokens = ["GPVTG", "", "T", "", "M", "005.5", "N", "010.2", "K"];
        VTG::decode_tokens(&tokens).unwrap().commit(&mut state);

        assert_eq!(state.course_true, None);
        assert_eq!(state.speed_knots, Some(5.5));
        assert_eq!(state.speed_kmh, Some(10.2));
    }
}
