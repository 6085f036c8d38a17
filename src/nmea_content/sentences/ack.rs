#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    nmea_content::{Fields, Sentence, SentenceId},
    state::{State, update},
};

/// ACK - Acknowledge Alarm
///
/// ```text
///         1
///         |
///  $--ACK,xxx*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct ACK {
    /// Unique alarm number (identifier) at alarm source
    pub alarm_id: Option<u16>,
}

impl Sentence for ACK {
    const ID: SentenceId = SentenceId::ACK;
    const MIN_FIELDS: usize = 2;

    fn decode(fields: &Fields<'_>) -> Result<Self, Error> {
        Ok(Self {
            alarm_id: fields.parse(1)?,
        })
    }

    fn commit(self, state: &mut State) {
        update(&mut state.acknowledged_alarm_id, self.alarm_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_parsing() {
        assert_eq!(
            ACK::decode_tokens(&["IIACK", "001"]),
            Ok(ACK { alarm_id: Some(1) })
        );
        assert_eq!(
            ACK::decode_tokens(&["IIACK", "one"]),
            Err(Error::InvalidField {
                sentence: SentenceId::ACK,
                index: 1,
            })
        );
        assert_eq!(
            ACK::decode_tokens(&["IIACK"]),
            Err(Error::InsufficientFields {
                sentence: SentenceId::ACK,
                found: 1,
                required: 2,
            })
        );
    }
}
