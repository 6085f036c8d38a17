#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    nmea_content::{Fields, Sentence, SentenceId},
    state::{AIS_PAYLOAD_LEN, State, update},
};

const MAX_FILL_BITS: u8 = 5;

/// One fragment of an AIS message, as carried by VDM and VDO sentences.
///
/// ```text
///         1 2 3 4 5    6
///         | | | | |    |
///  !--VDM,x,x,x,a,s--s,x*hh<CR><LF>
/// ```
///
/// The payload is kept in its six-bit armored form.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct AisFragment {
    /// Number of fragments of the message
    pub fragment_count: Option<u8>,
    /// Number of this fragment, starting at 1
    pub fragment_number: Option<u8>,
    /// Sequential message ID, shared by the fragments of one message
    pub message_id: Option<u8>,
    /// Radio channel, `A`/`B` (or `1`/`2`)
    pub channel: Option<char>,
    /// Armored payload
    pub payload: Option<heapless::String<AIS_PAYLOAD_LEN>>,
    /// Number of fill bits appended to the payload, 0 to 5
    pub fill_bits: Option<u8>,
}

impl AisFragment {
    fn decode(fields: &Fields<'_>) -> Result<Self, Error> {
        let fill_bits = fields.parse::<u8>(6)?;
        if fill_bits.is_some_and(|bits| bits > MAX_FILL_BITS) {
            return Err(fields.invalid(6));
        }

        Ok(Self {
            fragment_count: fields.parse(1)?,
            fragment_number: fields.parse(2)?,
            message_id: fields.parse(3)?,
            channel: fields.parse(4)?,
            payload: fields.text(5)?,
            fill_bits,
        })
    }

    fn commit(self, state: &mut State, own_ship: bool) {
        update(&mut state.ais_fragments, self.fragment_count);
        update(&mut state.ais_fragment, self.fragment_number);
        // empty on single fragment messages, which carry no sequence
        state.ais_sequence = self.message_id;
        update(&mut state.ais_channel, self.channel);
        update(&mut state.ais_payload, self.payload);
        update(&mut state.ais_fill_bits, self.fill_bits);
        state.ais_own_ship = Some(own_ship);
    }
}

/// VDM - AIS VHF Data-Link Message, reports received from other vessels
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VDM(pub AisFragment);

/// VDO - AIS VHF Data-Link Own-Vessel Report
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VDO(pub AisFragment);

impl Sentence for VDM {
    const ID: SentenceId = SentenceId::VDM;
    const MIN_FIELDS: usize = 7;

    fn decode(fields: &Fields<'_>) -> Result<Self, Error> {
        AisFragment::decode(fields).map(Self)
    }

    fn commit(self, state: &mut State) {
        self.0.commit(state, false);
    }
}

impl Sentence for VDO {
    const ID: SentenceId = SentenceId::VDO;
    const MIN_FIELDS: usize = 7;

    fn decode(fields: &Fields<'_>) -> Result<Self, Error> {
        AisFragment::decode(fields).map(Self)
    }

    fn commit(self, state: &mut State) {
        self.0.commit(state, true);
    }
}
