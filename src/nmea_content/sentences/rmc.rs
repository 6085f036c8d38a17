#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    nmea_content::{FaaMode, Fields, Sentence, SentenceId, Status},
    state::{State, update},
};

/// RMC - Recommended Minimum Navigation Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
///
/// ```text
///                                                            12
///         1         2 3       4 5        6 7   8   9    10 11|
///         |         | |       | |        | |   |   |    |  | |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a,m*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct RMC {
    /// Fix time in UTC
    pub fix_time: Option<time::Time>,
    /// Status Mode Indicator
    pub status: Option<Status>,
    /// Latitude in degrees, negative south
    pub latitude: Option<f64>,
    /// Longitude in degrees, negative west
    pub longitude: Option<f64>,
    /// Speed over ground in knots
    pub speed_over_ground: Option<f32>,
    /// Course over ground in degrees true
    pub course_over_ground: Option<f32>,
    /// Fix date in UTC
    pub fix_date: Option<time::Date>,
    /// Magnetic variation in degrees, negative west
    pub magnetic_variation: Option<f32>,
    /// FAA mode indicator (NMEA 2.3 and later)
    pub faa_mode: Option<FaaMode>,
}

impl Sentence for RMC {
    const ID: SentenceId = SentenceId::RMC;
    const MIN_FIELDS: usize = 10;

    fn decode(fields: &Fields<'_>) -> Result<Self, Error> {
        Ok(Self {
            fix_time: fields.parse(1)?,
            status: fields.parse(2)?,
            latitude: fields.latitude(3)?,
            longitude: fields.longitude(5)?,
            speed_over_ground: fields.parse(7)?,
            course_over_ground: fields.parse(8)?,
            fix_date: fields.parse(9)?,
            magnetic_variation: fields.magnetic_variation(10)?,
            faa_mode: fields.parse(12)?,
        })
    }

    fn commit(self, state: &mut State) {
        update(&mut state.time, self.fix_time);
        update(&mut state.status, self.status);
        update(&mut state.latitude, self.latitude);
        update(&mut state.longitude, self.longitude);
        update(&mut state.speed_knots, self.speed_over_ground);
        update(&mut state.course_true, self.course_over_ground);
        update(&mut state.date, self.fix_date);
        update(&mut state.magnetic_variation, self.magnetic_variation);
        update(&mut state.faa_mode, self.faa_mode);
    }
}
