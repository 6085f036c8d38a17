#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    nmea_content::{FaaMode, Fields, Sentence, SentenceId, Status},
    state::{State, update},
};

/// GLL - Geographic Position - Latitude/Longitude
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gll_geographic_position_latitudelongitude>
///
/// ```text
///         1       2 3        4 5         6 7
///         |       | |        | |         | |
///  $--GLL,ddmm.mm,a,dddmm.mm,a,hhmmss.ss,a,m*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GLL {
    /// Latitude in degrees, negative south
    pub latitude: Option<f64>,
    /// Longitude in degrees, negative west
    pub longitude: Option<f64>,
    /// Fix time in UTC
    pub fix_time: Option<time::Time>,
    /// Status Mode Indicator
    pub status: Option<Status>,
    /// FAA mode indicator (NMEA 2.3 and later)
    pub faa_mode: Option<FaaMode>,
}

impl Sentence for GLL {
    const ID: SentenceId = SentenceId::GLL;
    const MIN_FIELDS: usize = 5;

    fn decode(fields: &Fields<'_>) -> Result<Self, Error> {
        Ok(Self {
            latitude: fields.latitude(1)?,
            longitude: fields.longitude(3)?,
            fix_time: fields.parse(5)?,
            status: fields.parse(6)?,
            faa_mode: fields.parse(7)?,
        })
    }

    fn commit(self, state: &mut State) {
        update(&mut state.latitude, self.latitude);
        update(&mut state.longitude, self.longitude);
        update(&mut state.time, self.fix_time);
        update(&mut state.status, self.status);
        update(&mut state.faa_mode, self.faa_mode);
    }
}
