//! # Configuration
//!
//! Settings of an [`NmeaContext`](crate::NmeaContext), fixed when the context is created.
//!
//! A configuration is built with the builder methods or loaded from JSON:
//!
//! ```rust
//! use nmea0183_ingest::{ChecksumMode, Config, OutputMode, SentenceId};
//!
//! let config = Config::from_json(r#"{ "outputMode": "json", "sentences": ["GGA", "RMC"] }"#).unwrap();
//!
//! assert_eq!(
//!     config,
//!     Config::new()
//!         .output_mode(OutputMode::Json)
//!         .sentences([SentenceId::GGA, SentenceId::RMC])
//! );
//! assert_eq!(config.checksum_mode, ChecksumMode::Required);
//! ```

use std::{str::FromStr, sync::Arc};

use serde::Deserialize;

use crate::{
    ChecksumMode, FrameParser, LineEndingMode,
    error::{ConfigError, Error},
    nmea_content::SentenceId,
    registry::Registry,
};

/// Rendering produced by [`NmeaContext::read`](crate::NmeaContext::read).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    /// Fixed-size little-endian snapshot, see [`RawSnapshot`](crate::output::RawSnapshot).
    Raw,

    /// Fixed-schema JSON object followed by a NUL terminator.
    Json,
}

impl FromStr for OutputMode {
    type Err = ConfigError;

    /// Parses an output mode name, ignoring ASCII case.
    ///
    /// ```rust
    /// use nmea0183_ingest::{OutputMode, error::ConfigError};
    ///
    /// assert_eq!("JSON".parse(), Ok(OutputMode::Json));
    /// assert_eq!(
    ///     "xml".parse::<OutputMode>(),
    ///     Err(ConfigError::UnsupportedOutputMode("xml".into()))
    /// );
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("raw") {
            Ok(OutputMode::Raw)
        } else if s.eq_ignore_ascii_case("json") {
            Ok(OutputMode::Json)
        } else {
            Err(ConfigError::UnsupportedOutputMode(s.to_owned()))
        }
    }
}

/// Settings of an ingestion context.
///
/// The default configuration renders raw snapshots, requires a checksum, accepts an
/// optional line ending and decodes every supported sentence type.
#[must_use]
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Output rendering
    pub output_mode: OutputMode,
    /// Checksum requirement of the frame validator
    pub checksum_mode: ChecksumMode,
    /// Line ending requirement of the frame validator
    pub line_ending_mode: LineEndingMode,
    /// Sentence types to decode, [`None`] for every supported type
    pub sentences: Option<Vec<SentenceId>>,
}

impl Config {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a JSON document.
    ///
    /// Missing keys keep their default; unknown keys are rejected.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Sets the output rendering.
    pub fn output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }

    /// Sets the checksum requirement.
    pub fn checksum_mode(mut self, mode: ChecksumMode) -> Self {
        self.checksum_mode = mode;
        self
    }

    /// Sets the line ending requirement.
    pub fn line_ending_mode(mut self, mode: LineEndingMode) -> Self {
        self.line_ending_mode = mode;
        self
    }

    /// Restricts decoding to the given sentence types.
    pub fn sentences(mut self, ids: impl IntoIterator<Item = SentenceId>) -> Self {
        self.sentences = Some(ids.into_iter().collect());
        self
    }

    /// Builds the frame validator these settings describe.
    pub fn frame_parser(&self) -> FrameParser {
        FrameParser::new()
            .checksum_mode(self.checksum_mode)
            .line_ending_mode(self.line_ending_mode)
    }

    /// Returns the registry over the configured sentence types.
    ///
    /// Without an inclusion list the shared standard registry is returned.
    pub fn registry(&self) -> Result<Arc<Registry>, Error> {
        let registry = match &self.sentences {
            None => Registry::standard()?,
            Some(ids) => Arc::new(Registry::from_ids(ids)?),
        };

        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;

    #[test]
    fn test_output_mode_from_str() {
        assert_eq!("raw".parse(), Ok(OutputMode::Raw));
        assert_eq!("Raw".parse(), Ok(OutputMode::Raw));
        assert_eq!("json".parse(), Ok(OutputMode::Json));
        assert_eq!(
            "".parse::<OutputMode>(),
            Err(ConfigError::UnsupportedOutputMode(String::new()))
        );
    }

    #[test]
    fn test_from_json() {
        assert_eq!(Config::from_json("{}"), Ok(Config::default()));

        let config = Config::from_json(
            r#"{
                "outputMode": "raw",
                "checksumMode": "optional",
                "lineEndingMode": "forbidden"
            }"#,
        )
        .unwrap();
        assert_eq!(
            config,
            Config::new()
                .checksum_mode(ChecksumMode::Optional)
                .line_ending_mode(LineEndingMode::Forbidden)
        );

        for json in [
            r#"{ "outputMode": "xml" }"#,
            r#"{ "sentences": ["ZZZ"] }"#,
            r#"{ "verbose": true }"#,
            "not json",
        ] {
            assert!(
                matches!(Config::from_json(json), Err(ConfigError::Invalid(_))),
                "{json}"
            );
        }
    }

    #[test]
    fn test_registry() {
        let registry = Config::new().registry().unwrap();
        assert_eq!(registry.len(), SentenceId::ALL.len());

        let registry = Config::new()
            .sentences([SentenceId::GGA, SentenceId::HDT])
            .registry()
            .unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(SentenceId::HDT));
        assert!(!registry.contains(SentenceId::RMC));

        let registry = Config::new()
            .sentences([SentenceId::GGA, SentenceId::GGA])
            .registry();
        assert_eq!(
            registry.map(|registry| registry.len()),
            Err(Error::Registry(RegistryError::Duplicate("GGA")))
        );
    }
}
