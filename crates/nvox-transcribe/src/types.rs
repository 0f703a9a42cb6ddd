//! Wire types for the transcription service.

use serde::{Deserialize, Serialize};

/// One transcribed word with its timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSegment {
    /// The transcribed word
    pub word: String,
    /// Start offset in seconds
    pub start: f64,
    /// End offset in seconds
    pub end: f64,
}

/// Response body from the transcription endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    /// Word-level segments in spoken order
    pub words: Vec<WordSegment>,
}
