#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    nmea_content::{Fields, Quality, Sentence, SentenceId},
    state::{State, update},
};

/// GGA - Global Positioning System Fix Data
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
///
/// ```text
///                                                      11
///         1         2       3 4        5 6 7  8   9  10 |  12 13  14
///         |         |       | |        | | |  |   |   | |   | |   |
///  $--GGA,hhmmss.ss,ddmm.mm,a,dddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GGA {
    /// Fix time in UTC
    pub fix_time: Option<time::Time>,
    /// Latitude in degrees, negative south
    pub latitude: Option<f64>,
    /// Longitude in degrees, negative west
    pub longitude: Option<f64>,
    /// GPS Quality Indicator
    pub fix_quality: Option<Quality>,
    /// Number of satellites in use
    pub satellite_count: Option<u8>,
    /// Horizontal Dilution of Precision
    pub hdop: Option<f32>,
    /// Altitude above/below mean sea level (geoid) in meters
    pub altitude: Option<f32>,
    /// Geoidal separation in meters, the difference between the WGS-84 earth ellipsoid and mean sea level (geoid),
    /// negative values indicate that the geoid is below the ellipsoid
    pub geoidal_separation: Option<f32>,
    /// Age of Differential GPS data in seconds, null field when DGPS is not used
    pub age_of_dgps: Option<f32>,
    /// Differential reference station ID
    pub ref_station_id: Option<u16>,
}

impl Sentence for GGA {
    const ID: SentenceId = SentenceId::GGA;
    const MIN_FIELDS: usize = 6;

    fn decode(fields: &Fields<'_>) -> Result<Self, Error> {
        Ok(Self {
            fix_time: fields.parse(1)?,
            latitude: fields.latitude(2)?,
            longitude: fields.longitude(4)?,
            fix_quality: fields.parse(6)?,
            satellite_count: fields.parse(7)?,
            hdop: fields.parse(8)?,
            altitude: fields.with_unit(9, 'M')?,
            geoidal_separation: fields.with_unit(11, 'M')?,
            age_of_dgps: fields.parse(13)?,
            ref_station_id: fields.parse(14)?,
        })
    }

    fn commit(self, state: &mut State) {
        update(&mut state.time, self.fix_time);
        update(&mut state.latitude, self.latitude);
        update(&mut state.longitude, self.longitude);
        update(&mut state.fix_quality, self.fix_quality);
        update(&mut state.satellites_used, self.satellite_count);
        update(&mut state.hdop, self.hdop);
        update(&mut state.altitude, self.altitude);
        update(&mut state.geoidal_separation, self.geoidal_separation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(sentence: &str) -> Result<GGA, Error> {
        let tokens: Vec<&str> = sentence.split(',').collect();
        GGA::decode_tokens(&tokens)
    }

    #[test]
    fn test_gga_parsing() {
        let cases = [",,", ",42.0,", ",,69", ",42.0,69"];

        for &input in &cases {
            let i = format!(
                "GPGGA,001043.00,4404.14036,N,12118.85961,W,1,12,0.98,1113.0,M,-21.3,M{}",
                input
            );

            let result = decode(&i);
            assert!(result.is_ok(), "Failed: {input:?}\n\t{result:?}");
        }

        let gga = decode("GPGGA,001043.00,4404.14036,N,12118.85961,W,1,12,0.98,1113.0,M,-21.3,M,42.0,69")
            .unwrap();
        assert_eq!(gga.fix_quality, Some(Quality::GPSFix));
        assert_eq!(gga.satellite_count, Some(12));
        assert_eq!(gga.altitude, Some(1113.0));
        assert_eq!(gga.geoidal_separation, Some(-21.3));
        assert_eq!(gga.age_of_dgps, Some(42.0));
        assert_eq!(gga.ref_station_id, Some(69));

        let cases = [
            ",42.0,x",  // Non-numeric station id
            ",abc,",    // Non-numeric age of DGPS
        ];

        for &input in &cases {
            let i = format!(
                "GPGGA,001043.00,4404.14036,N,12118.85961,W,1,12,0.98,1113.0,M,-21.3,M{}",
                input
            );

            let result = decode(&i);
            assert!(result.is_err(), "Failed: {input:?}\n\t{result:?}");
        }
    }

    #[test]
    fn test_gga_commit_keeps_unreported_values() {
        let mut state = State::default();
        state.altitude = Some(12.5);
        state.heading_true = Some(90.0);

        decode("GPGGA,123519,4807.038,N,01131.000,E")
            .unwrap()
            .commit(&mut state);

        assert_eq!(
            state.time,
            Some(time::Time::from_hms(12, 35, 19).unwrap())
        );
        assert!(state.latitude.is_some());
        assert!(state.longitude.is_some());
        assert_eq!(state.altitude, Some(12.5));
        assert_eq!(state.heading_true, Some(90.0));
        assert_eq!(state.fix_quality, None);
    }

    #[test]
    fn test_gga_insufficient_fields() {
        assert_eq!(
            decode("GPGGA,123519,4807.038,N,01131.000"),
            Err(Error::InsufficientFields {
                sentence: SentenceId::GGA,
                found: 5,
                required: 6,
            })
        );
    }
}
