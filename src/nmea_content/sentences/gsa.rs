#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    nmea_content::{Fields, FixMode, Sentence, SentenceId, SelectionMode},
    state::{MAX_SATELLITES, State, update},
};

/// GSA - GPS DOP and active satellites
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsa_gps_dop_and_active_satellites>
///
/// ```text
///         1 2 3                        14 15  16  17
///         | | |                         |  |   |   |
///  $--GSA,a,a,x,x,x,x,x,x,x,x,x,x,x,x,x,x,x.x,x.x,x.x*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GSA {
    /// Selection mode
    pub selection_mode: Option<SelectionMode>,
    /// Fix mode
    pub fix_mode: Option<FixMode>,
    /// PRNs of the satellites used for the fix, in transmission order
    pub fix_sats_prn: heapless::Vec<u8, MAX_SATELLITES>,
    /// Position Dilution of Precision
    pub pdop: Option<f32>,
    /// Horizontal Dilution of Precision
    pub hdop: Option<f32>,
    /// Vertical Dilution of Precision
    pub vdop: Option<f32>,
}

impl Sentence for GSA {
    const ID: SentenceId = SentenceId::GSA;
    const MIN_FIELDS: usize = 18;

    fn decode(fields: &Fields<'_>) -> Result<Self, Error> {
        let selection_mode = fields.parse(1)?;
        let fix_mode = fields.parse(2)?;

        let mut fix_sats_prn = heapless::Vec::new();
        for index in 3..3 + MAX_SATELLITES {
            if let Some(prn) = fields.parse::<u8>(index)? {
                fix_sats_prn
                    .push(prn)
                    .map_err(|_| fields.invalid(index))?;
            }
        }

        Ok(Self {
            selection_mode,
            fix_mode,
            fix_sats_prn,
            pdop: fields.parse(15)?,
            hdop: fields.parse(16)?,
            vdop: fields.parse(17)?,
        })
    }

    /// The active satellite list is replaced as a whole, an empty list included.
    fn commit(self, state: &mut State) {
        update(&mut state.selection_mode, self.selection_mode);
        update(&mut state.fix_mode, self.fix_mode);
        state.active_satellites = self.fix_sats_prn;
        update(&mut state.pdop, self.pdop);
        update(&mut state.hdop, self.hdop);
        update(&mut state.vdop, self.vdop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(sentence: &str) -> Result<GSA, Error> {
        let tokens: Vec<&str> = sentence.split(',').collect();
        GSA::decode_tokens(&tokens)
    }

    #[test]
    fn test_gsa_parsing() {
        let gsa = decode("GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1").unwrap();

        assert_eq!(gsa.selection_mode, Some(SelectionMode::Automatic));
        assert_eq!(gsa.fix_mode, Some(FixMode::Fix3D));
        assert_eq!(gsa.fix_sats_prn.as_slice(), [4, 5, 9, 12, 24]);
        assert_eq!(gsa.pdop, Some(2.5));
        assert_eq!(gsa.hdop, Some(1.3));
        assert_eq!(gsa.vdop, Some(2.1));

        // NMEA 4.11 appends the system ID
        let gsa = decode("GNGSA,A,3,80,71,73,79,69,,,,,,,,1.83,1.09,1.47,2").unwrap();
        assert_eq!(gsa.fix_sats_prn.as_slice(), [80, 71, 73, 79, 69]);
    }

    #[test]
    fn test_gsa_commit_replaces_satellites() {
        let mut state = State::default();

        decode("GPGSA,A,3,01,02,03,04,05,06,07,08,09,10,11,12,1.5,1.0,2.0")
            .unwrap()
            .commit(&mut state);
        assert_eq!(state.active_satellites.len(), 12);

        decode("GPGSA,M,1,,,,,,,,,,,,,,,")
            .unwrap()
            .commit(&mut state);
        assert!(state.active_satellites.is_empty());
        assert_eq!(state.fix_mode, Some(FixMode::NoFix));
        assert_eq!(state.pdop, Some(1.5));
    }
}
