#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    nmea_content::{Fields, Sentence, SentenceId},
    state::{State, TEXT_LEN, update},
};

/// TXT - Text Transmission
///
/// ```text
///         1  2  3  4
///         |  |  |  |
///  $--TXT,xx,xx,xx,c--c*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct TXT {
    /// Total number of sentences of the message
    pub total_messages: Option<u8>,
    /// Sentence number within the message
    pub message_number: Option<u8>,
    /// Text identifier
    pub text_id: Option<u8>,
    /// Text message
    pub text: Option<heapless::String<TEXT_LEN>>,
}

impl Sentence for TXT {
    const ID: SentenceId = SentenceId::TXT;
    const MIN_FIELDS: usize = 5;

    fn decode(fields: &Fields<'_>) -> Result<Self, Error> {
        Ok(Self {
            total_messages: fields.parse(1)?,
            message_number: fields.parse(2)?,
            text_id: fields.parse(3)?,
            text: fields.text(4)?,
        })
    }

    fn commit(self, state: &mut State) {
        update(&mut state.text_id, self.text_id);
        update(&mut state.text, self.text);
    }
}
