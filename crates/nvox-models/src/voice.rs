//! Synthesis voice identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Recognized synthesis voices.
///
/// The serde form is the wire identifier the speech endpoints accept.
/// Unknown identifiers are rejected at the configuration boundary, so
/// the engine never sees an unvalidated voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Voice {
    #[serde(rename = "en_us_001")]
    UsFemale1,
    #[serde(rename = "en_us_002")]
    UsFemale2,
    #[default]
    #[serde(rename = "en_us_006")]
    UsMale1,
    #[serde(rename = "en_us_007")]
    UsMale2,
    #[serde(rename = "en_us_009")]
    UsMale3,
    #[serde(rename = "en_us_010")]
    UsMale4,
    #[serde(rename = "en_uk_001")]
    UkMale1,
    #[serde(rename = "en_uk_003")]
    UkMale2,
    #[serde(rename = "en_au_001")]
    AuFemale1,
    #[serde(rename = "en_au_002")]
    AuMale1,
}

impl Voice {
    /// All recognized voices, in a stable order.
    pub const ALL: &'static [Voice] = &[
        Voice::UsFemale1,
        Voice::UsFemale2,
        Voice::UsMale1,
        Voice::UsMale2,
        Voice::UsMale3,
        Voice::UsMale4,
        Voice::UkMale1,
        Voice::UkMale2,
        Voice::AuFemale1,
        Voice::AuMale1,
    ];

    /// Wire identifier sent to the speech endpoints.
    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::UsFemale1 => "en_us_001",
            Voice::UsFemale2 => "en_us_002",
            Voice::UsMale1 => "en_us_006",
            Voice::UsMale2 => "en_us_007",
            Voice::UsMale3 => "en_us_009",
            Voice::UsMale4 => "en_us_010",
            Voice::UkMale1 => "en_uk_001",
            Voice::UkMale2 => "en_uk_003",
            Voice::AuFemale1 => "en_au_001",
            Voice::AuMale1 => "en_au_002",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a voice identifier is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized voice identifier: {0}")]
pub struct UnknownVoice(pub String);

impl FromStr for Voice {
    type Err = UnknownVoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Voice::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownVoice(s.to_string()))
    }
}
