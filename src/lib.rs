//! # NMEA 0183 Ingest
//!
//! This library decodes NMEA 0183 sentences with the format `$HHHHH,D1,D2,...,Dn*CC\r\n`
//! (or `!HHHHH,...` for encapsulated AIS sentences) into a store of the latest reported
//! values, and renders that store as a raw binary snapshot or as JSON.
//!
//! Each sentence runs through the same pipeline:
//! 1. [`FrameParser`] checks the start delimiter, checksum trailer and line ending.
//! 2. [`split_fields`] splits the body into fields.
//! 3. [`Registry`] maps the sentence code of the address field to a [`SentenceId`].
//! 4. The matching decoder in [`nmea_content`] converts the fields and commits them to
//!    the [`State`] of the context, or rejects the sentence without touching it.
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_ingest::{Config, NmeaContext, OutputMode, SentenceId};
//!
//! let mut context = NmeaContext::new(Config::new().output_mode(OutputMode::Json)).unwrap();
//!
//! let id = context
//!     .ingest("$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n")
//!     .unwrap();
//! assert_eq!(id, SentenceId::GGA);
//! assert_eq!(context.state().satellites_used, Some(8));
//!
//! // Unknown sentence types are reported, not decoded
//! let error = context.ingest("$XXZZZ,1,2,3*46").unwrap_err();
//! assert_eq!(error.code(), -3);
//!
//! let mut buf = [0u8; 2048];
//! let len = context.read(&mut buf).unwrap();
//! let json = std::str::from_utf8(&buf[..len]).unwrap();
//! assert!(json.contains("\"altitude\":545.4"));
//! ```

pub mod config;
pub mod error;
mod nmea0183;
pub mod nmea_content;
pub mod output;
mod parse;
pub mod parsing;
pub mod registry;
pub mod state;

pub use config::{Config, OutputMode};
pub use error::Error;
pub use nmea0183::*;
pub use nmea_content::SentenceId;
pub use parse::NmeaParse;
pub use parsing::{MAX_TOKENS, Tokens, split_fields, tokenize};
pub use registry::Registry;
pub use state::State;

use std::sync::Arc;

use log::debug;

use crate::nmea_content::NmeaSentence;

/// An ingestion pipeline and the store it feeds.
///
/// Every context owns its store, so independent contexts never observe each other's
/// sentences. The decode registry is shared between contexts that decode every supported
/// sentence type.
#[derive(Debug, Clone)]
pub struct NmeaContext {
    config: Config,
    frame_parser: FrameParser,
    registry: Arc<Registry>,
    state: State,
}

impl NmeaContext {
    /// Creates a context with an empty store.
    ///
    /// # Errors
    ///
    /// [`Error::Registry`] if the sentence inclusion list names a type twice.
    pub fn new(config: Config) -> Result<Self, Error> {
        let registry = config.registry()?;

        debug!(
            "created context: {:?} output, {} sentence types",
            config.output_mode,
            registry.len()
        );

        Ok(Self {
            frame_parser: config.frame_parser(),
            registry,
            config,
            state: State::new(),
        })
    }

    /// Releases the context.
    ///
    /// A context holds no external resources, so this is the same as dropping it.
    pub fn close(self) {}

    /// The configuration the context was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The latest decoded values.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Clears the store.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Validates, decodes and commits one complete sentence.
    ///
    /// On success the sentence type is returned and the store holds every value the
    /// sentence reported, along with its talker and type. On failure the store is left
    /// exactly as it was.
    ///
    /// # Errors
    ///
    /// * [`Error::Frame`] if the frame or checksum is invalid
    /// * [`Error::Tokenize`] if the body cannot be split into fields
    /// * [`Error::UnrecognizedSentence`] if the address field names no registered type
    /// * [`Error::InsufficientFields`], [`Error::InvalidField`] or [`Error::FieldTooLong`]
    ///   if the decoder rejects the fields
    pub fn ingest(&mut self, sentence: &str) -> Result<SentenceId, Error> {
        let result = self.decode(sentence);

        if let Err(error) = &result {
            debug!("rejected {:?}: {error}", sentence.trim_end());
        }

        result
    }

    fn decode(&mut self, sentence: &str) -> Result<SentenceId, Error> {
        let frame = self.frame_parser.parse(sentence)?;
        let tokens = split_fields(frame.body)?;

        let address = tokens.first().copied().unwrap_or_default();
        let (talker, code) = split_address(address)
            .ok_or_else(|| Error::UnrecognizedSentence(address.to_owned()))?;
        let id = self
            .registry
            .lookup(code)
            .ok_or_else(|| Error::UnrecognizedSentence(address.to_owned()))?;

        NmeaSentence::decode(id, &tokens)?.commit(&mut self.state);
        self.state.talker = Some(talker);
        self.state.last_sentence = Some(id);

        debug!("committed {id} from talker {}", address.get(..2).unwrap_or_default());

        Ok(id)
    }

    /// Renders the store into `buf` in the configured output mode.
    ///
    /// Returns the number of bytes written; see [`output::write`].
    pub fn read(&self, buf: &mut [u8]) -> Result<usize, Error> {
        output::write(&self.state, self.config.output_mode, buf)
    }
}

/// Splits a five character address field into talker and sentence code.
fn split_address(address: &str) -> Option<(heapless::String<2>, &str)> {
    if address.len() != 5 || !address.is_ascii() {
        return None;
    }

    let (talker, code) = address.split_at(2);
    let talker = heapless::String::try_from(talker).ok()?;

    Some((talker, code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_address() {
        let (talker, code) = split_address("GPGGA").unwrap();
        assert_eq!(talker.as_str(), "GP");
        assert_eq!(code, "GGA");

        assert_eq!(split_address(""), None);
        assert_eq!(split_address("GGA"), None);
        assert_eq!(split_address("PGRME"), Some(("PG".try_into().unwrap(), "RME")));
        assert_eq!(split_address("GPGGAX"), None);
    }

    #[test]
    fn test_rejected_sentence_leaves_state() {
        let mut context = NmeaContext::new(Config::new()).unwrap();
        context.ingest("$GPHDT,274.07,T*03").unwrap();
        let before = context.state().clone();

        let rejected = [
            "$GPHDT,274.07,T*04",
            "GPHDT,274.07,T*03",
            "$GPHDT,north,T*74",
            "$GPGGA,123519,4807.038,N,01131.000*27",
            "$XXZZZ,1,2,3*46",
            "$*00",
        ];

        for sentence in rejected {
            assert!(context.ingest(sentence).is_err(), "{sentence}");
            assert_eq!(context.state(), &before, "{sentence}");
        }
    }

    #[test]
    fn test_last_sentence_and_talker() {
        let mut context = NmeaContext::new(Config::new()).unwrap();

        assert_eq!(context.ingest("$GPHDT,274.07,T*03"), Ok(SentenceId::HDT));
        assert_eq!(context.state().last_sentence, Some(SentenceId::HDT));
        assert_eq!(context.state().talker.as_deref(), Some("GP"));

        context.reset();
        assert_eq!(context.state(), &State::default());
    }
}
