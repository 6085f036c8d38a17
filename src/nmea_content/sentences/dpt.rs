#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    nmea_content::{Fields, Sentence, SentenceId},
    state::{State, update},
};

/// DPT - Depth of Water
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_dpt_depth_of_water>
///
/// ```text
///         1   2   3
///         |   |   |
///  $--DPT,x.x,x.x,x.x*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct DPT {
    /// Water depth relative to transducer in meters
    pub water_depth: Option<f32>,
    /// Offset from transducer in meters, positive means distance from transducer to water line,
    /// negative means distance from transducer to keel
    pub offset_from_transducer: Option<f32>,
    /// Maximum range scale in use (NMEA 3.0 and later)
    pub max_range_scale: Option<f32>,
}

impl Sentence for DPT {
    const ID: SentenceId = SentenceId::DPT;
    const MIN_FIELDS: usize = 2;

    fn decode(fields: &Fields<'_>) -> Result<Self, Error> {
        Ok(Self {
            water_depth: fields.parse(1)?,
            offset_from_transducer: fields.parse(2)?,
            max_range_scale: fields.parse(3)?,
        })
    }

    fn commit(self, state: &mut State) {
        update(&mut state.depth, self.water_depth);
        update(&mut state.depth_offset, self.offset_from_transducer);
    }
}
