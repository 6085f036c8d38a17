#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    nmea_content::{Fields, Sentence, SentenceId},
    state::{State, update},
};

const METERS_PER_FOOT: f32 = 0.3048;
const METERS_PER_FATHOM: f32 = 1.8288;

/// DBT - Depth Below Transducer
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_dbt_depth_below_transducer>
///
/// ```text
///         1   2 3   4 5   6
///         |   | |   | |   |
///  $--DBT,x.x,f,x.x,M,x.x,F*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct DBT {
    /// Water depth in feet
    pub water_depth_feet: Option<f32>,
    /// Water depth in meters
    pub water_depth_meters: Option<f32>,
    /// Water depth in fathoms
    pub water_depth_fathoms: Option<f32>,
}

impl DBT {
    /// Depth in meters, converted from feet or fathoms when meters are not reported.
    pub fn depth_meters(&self) -> Option<f32> {
        self.water_depth_meters
            .or(self.water_depth_feet.map(|feet| feet * METERS_PER_FOOT))
            .or(self.water_depth_fathoms.map(|fathoms| fathoms * METERS_PER_FATHOM))
    }
}

impl Sentence for DBT {
    const ID: SentenceId = SentenceId::DBT;
    const MIN_FIELDS: usize = 7;

    fn decode(fields: &Fields<'_>) -> Result<Self, Error> {
        Ok(Self {
            water_depth_feet: fields.with_unit(1, 'f')?,
            water_depth_meters: fields.with_unit(3, 'M')?,
            water_depth_fathoms: fields.with_unit(5, 'F')?,
        })
    }

    fn commit(self, state: &mut State) {
        update(&mut state.depth_below_transducer, self.depth_meters());
    }
}
