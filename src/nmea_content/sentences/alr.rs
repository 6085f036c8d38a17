#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    nmea_content::{AlarmCondition, AlarmState, Fields, Sentence, SentenceId},
    state::{ALARM_TEXT_LEN, State, update},
};

/// ALR - Set Alarm State
///
/// ```text
///         1         2   3 4 5
///         |         |   | | |
///  $--ALR,hhmmss.ss,xxx,A,A,c--c*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct ALR {
    /// Time of alarm condition change, UTC
    pub time: Option<time::Time>,
    /// Unique alarm number (identifier) at alarm source
    pub alarm_id: Option<u16>,
    /// Alarm condition
    pub condition: Option<AlarmCondition>,
    /// Alarm's acknowledge state
    pub state: Option<AlarmState>,
    /// Alarm's description text
    pub description: Option<heapless::String<ALARM_TEXT_LEN>>,
}

impl Sentence for ALR {
    const ID: SentenceId = SentenceId::ALR;
    const MIN_FIELDS: usize = 6;

    fn decode(fields: &Fields<'_>) -> Result<Self, Error> {
        Ok(Self {
            time: fields.parse(1)?,
            alarm_id: fields.parse(2)?,
            condition: fields.parse(3)?,
            state: fields.parse(4)?,
            description: fields.text(5)?,
        })
    }

    fn commit(self, state: &mut State) {
        update(&mut state.alarm_time, self.time);
        update(&mut state.alarm_id, self.alarm_id);
        update(&mut state.alarm_condition, self.condition);
        update(&mut state.alarm_state, self.state);
        update(&mut state.alarm_text, self.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alr_parsing() {
        let alr = ALR::decode_tokens(&["IIALR", "123519", "001", "A", "V", "Bilge level high"])
            .unwrap();

        assert_eq!(alr.alarm_id, Some(1));
        assert_eq!(alr.condition, Some(AlarmCondition::Exceeded));
        assert_eq!(alr.state, Some(AlarmState::Unacknowledged));
        assert_eq!(alr.description.as_deref(), Some("Bilge level high"));

        let mut state = State::default();
        alr.commit(&mut state);
        assert_eq!(
            state.alarm_time,
            Some(time::Time::from_hms(12, 35, 19).unwrap())
        );
        assert_eq!(state.alarm_text.as_deref(), Some("Bilge level high"));
    }

    #[test]
    fn test_alr_description_too_long() {
        let description = "x".repeat(ALARM_TEXT_LEN + 1);
        let result = ALR::decode_tokens(&["IIALR", "123519", "001", "A", "V", description.as_str()]);

        assert_eq!(
            result,
            Err(Error::FieldTooLong {
                sentence: SentenceId::ALR,
                index: 5,
                max: ALARM_TEXT_LEN,
            })
        );

        let description = "x".repeat(ALARM_TEXT_LEN);
        let result = ALR::decode_tokens(&["IIALR", "123519", "001", "A", "V", description.as_str()]);
        assert!(result.is_ok());
    }
}
