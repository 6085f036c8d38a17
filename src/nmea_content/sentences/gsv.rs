#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    nmea_content::{Fields, Satellite, Sentence, SentenceId},
    state::{State, update},
};

/// GSV - Satellites in View
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsv_satellites_in_view>
///
/// ```text
///         1 2 3 4 5 6 7     n
///         | | | | | | |     |
///  $--GSV,x,x,x,x,x,x,x,...,x*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GSV {
    /// Total number of GSV sentences to be transmitted in this group
    pub total_messages: Option<u8>,
    /// Sentence number of this GSV message within current group
    pub message_number: Option<u8>,
    /// Total number of satellites in view
    pub satellites_in_view: Option<u8>,
    /// Satellite information
    pub satellites: heapless::Vec<Satellite, 4>,
}

impl Sentence for GSV {
    const ID: SentenceId = SentenceId::GSV;
    const MIN_FIELDS: usize = 4;

    fn decode(fields: &Fields<'_>) -> Result<Self, Error> {
        let mut satellites = heapless::Vec::new();
        for index in (4..20).step_by(4) {
            if let Some(satellite) = Satellite::decode(fields, index)? {
                satellites
                    .push(satellite)
                    .map_err(|_| fields.invalid(index))?;
            }
        }

        Ok(Self {
            total_messages: fields.parse(1)?,
            message_number: fields.parse(2)?,
            satellites_in_view: fields.parse(3)?,
            satellites,
        })
    }

    /// The first message of a group restarts the satellite table, later messages append
    /// to it. Satellites past the table capacity are not kept.
    fn commit(self, state: &mut State) {
        update(&mut state.satellites_in_view, self.satellites_in_view);

        if self.message_number == Some(1) {
            state.satellites.clear();
        }

        for satellite in self.satellites {
            if state.satellites.push(satellite).is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(sentence: &str) -> Result<GSV, Error> {
        let tokens: Vec<&str> = sentence.split(',').collect();
        GSV::decode_tokens(&tokens)
    }

    #[test]
    fn test_gsv_parsing() {
        let cases = [
            "1,1,00",
            "1,1,00,",
            "1,1,01,05,45,120,38",
            "1,1,04,01,60,150,45,02,30,090,30,03,70,270,50,04,10,010,20",
            "1,1,01,05,45,120,",
            "1,1,01,06,30,,40",
            "1,1,01,07,,070,35",
            "1,1,01,08,,,30",
            "1,1,01,09,,180,",
            "1,1,01,11,,,",
            "1,1,03,01,60,150,45,02,30,,30,03,,270,",
            "1,1,04,01,60,150,45,02,30,090,30,03,70,270,50,04,10,010,20,1",
        ];

        for &input in &cases {
            let result = decode(&format!("GPGSV,{input}"));
            assert!(result.is_ok(), "Failed: {input:?}\n\t{result:?}");
        }

        let gsv = decode("GPGSV,3,1,11,03,03,111,00,04,15,270,00,06,01,010,,13,06,292,00").unwrap();
        assert_eq!(gsv.satellites.len(), 4);
        assert_eq!(
            gsv.satellites[2],
            Satellite {
                prn: 6,
                elevation: Some(1),
                azimuth: Some(10),
                snr: None,
            }
        );

        let cases = [
            "1,1,01,05,45,120,XX",
            "1,1,01,05,-45,120,38",
            "X,1,00",
        ];

        for &input in &cases {
            let result = decode(&format!("GPGSV,{input}"));
            assert!(result.is_err(), "Failed: {input:?}\n\t{result:?}");
        }
    }

    #[test]
    fn test_gsv_group_restarts_table() {
        let mut state = State::default();

        decode("GPGSV,2,1,06,01,60,150,45,02,30,090,30,03,70,270,50,04,10,010,20")
            .unwrap()
            .commit(&mut state);
        decode("GPGSV,2,2,06,05,45,120,38,06,30,,40")
            .unwrap()
            .commit(&mut state);

        assert_eq!(state.satellites_in_view, Some(6));
        let prns: Vec<u8> = state.satellites.iter().map(|sat| sat.prn).collect();
        assert_eq!(prns, [1, 2, 3, 4, 5, 6]);

        decode("GPGSV,1,1,01,07,,070,35")
            .unwrap()
            .commit(&mut state);

        assert_eq!(state.satellites_in_view, Some(1));
        assert_eq!(state.satellites.len(), 1);
        assert_eq!(state.satellites[0].prn, 7);
    }
}
