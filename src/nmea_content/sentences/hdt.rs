#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    nmea_content::{Fields, Sentence, SentenceId},
    state::{State, update},
};

/// HDT - Heading - True
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_hdt_heading_true>
///
/// ```text
///         1   2
///         |   |
///  $--HDT,x.x,T*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct HDT {
    /// Heading in degrees true
    pub heading: Option<f32>,
}

impl Sentence for HDT {
    const ID: SentenceId = SentenceId::HDT;
    const MIN_FIELDS: usize = 2;

    fn decode(fields: &Fields<'_>) -> Result<Self, Error> {
        Ok(Self {
            heading: fields.with_unit(1, 'T')?,
        })
    }

    fn commit(self, state: &mut State) {
        update(&mut state.heading_true, self.heading);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hdt_parsing() {
        assert_eq!(
            HDT::decode_tokens(&["HEHDT", "274.07", "T"]),
            Ok(HDT {
                heading: Some(274.07)
            })
        );
        assert_eq!(
            HDT::decode_tokens(&["HEHDT", "274.07"]),
            Ok(HDT {
                heading: Some(274.07)
            })
        );
        assert_eq!(
            HDT::decode_tokens(&["HEHDT", "274.07", "M"]),
            Err(Error::InvalidField {
                sentence: SentenceId::HDT,
                index: 2,
            })
        );
        assert!(HDT::decode_tokens(&["HEHDT", "north", "T"]).is_err());
    }
}
